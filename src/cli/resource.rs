//
//  chatbridge
//  cli/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CRUD commands shared by contacts, audiences, templates and campaigns.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use super::fields::{parse_fields, parse_query};
use super::GlobalOptions;
use crate::api::common::decode;
use crate::api::resources::{Endpoint, Resource};
use crate::output::{TableOutput, TableRow};

/// Manage one resource family
#[derive(Args, Debug)]
pub struct ResourceCommand {
    #[command(subcommand)]
    pub command: ResourceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ResourceSubcommand {
    /// List items
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one item
    #[command(visible_alias = "view")]
    Get(GetArgs),

    /// Create an item
    Create(CreateArgs),

    /// Update an item
    #[command(visible_alias = "edit")]
    Update(UpdateArgs),

    /// Delete an item
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Query parameter as key=value (repeatable)
    #[arg(long = "query", short = 'q', value_name = "KEY=VALUE")]
    pub query: Vec<String>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Item ID
    pub id: String,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "query", short = 'q', value_name = "KEY=VALUE")]
    pub query: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Field as key=value; JSON values are parsed (repeatable)
    #[arg(long = "field", short = 'F', value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Local file to upload (templates only)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Item ID
    pub id: String,

    /// Field as key=value; JSON values are parsed (repeatable)
    #[arg(long = "field", short = 'F', value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Local file to upload (templates only)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Item ID
    pub id: String,
}

impl ResourceCommand {
    /// Runs the subcommand against the endpoint `E`.
    pub fn run<E>(&self, global: &GlobalOptions) -> Result<()>
    where
        E: Endpoint,
        E::Model: Serialize + TableOutput + TableRow,
    {
        let client = global.client()?;
        let resource = Resource::<E>::new(client.http_client());
        let output = global.output();

        match &self.command {
            ResourceSubcommand::List(args) => {
                let data = resource.list(&parse_query(&args.query)?)?;
                if output.is_json() {
                    output.write_value(&data)?;
                } else {
                    let items: Vec<E::Model> = decode(data)?;
                    output.write_list(&items)?;
                }
            }
            ResourceSubcommand::Get(args) => {
                let data = resource.get_with(&args.id, &parse_query(&args.query)?)?;
                write_item::<E>(global, data)?;
            }
            ResourceSubcommand::Create(args) => {
                let fields = body::<E>(&args.fields, args.file.as_ref())?;
                let data = resource.create(fields)?;
                write_item::<E>(global, data)?;
                output.write_success(&format!("Created in {}", E::PATH));
            }
            ResourceSubcommand::Update(args) => {
                let fields = body::<E>(&args.fields, args.file.as_ref())?;
                if fields.is_empty() {
                    bail!("Nothing to update. Pass at least one --field or --file");
                }
                let data = resource.update(&args.id, fields)?;
                write_item::<E>(global, data)?;
                output.write_success(&format!("Updated {}/{}", E::PATH, args.id));
            }
            ResourceSubcommand::Delete(args) => {
                let envelope = resource.delete(&args.id)?;
                if output.is_json() {
                    output.write_value(&envelope)?;
                } else {
                    output.write_success(&format!("Deleted {}/{}", E::PATH, args.id));
                }
            }
        }

        Ok(())
    }
}

/// Builds the request body, placing `--file` under the endpoint's attachment field.
fn body<E: Endpoint>(pairs: &[String], file: Option<&PathBuf>) -> Result<crate::Fields> {
    let mut fields = parse_fields(pairs)?;

    if let Some(path) = file {
        let Some(field) = E::ATTACHMENT_FIELD else {
            bail!("--file is not supported for {}", E::PATH);
        };
        fields.insert(
            field.to_string(),
            Value::String(path.to_string_lossy().into_owned()),
        );
    }

    Ok(fields)
}

fn write_item<E>(global: &GlobalOptions, data: Value) -> Result<()>
where
    E: Endpoint,
    E::Model: Serialize + TableOutput,
{
    let output = global.output();
    if output.is_json() {
        output.write_value(&data)
    } else {
        let item: E::Model = decode(data)?;
        output.write(&item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::resources::{Contacts, Templates};
    use serde_json::json;

    #[test]
    fn test_body_places_file_under_attachment_field() {
        let file = PathBuf::from("/tmp/banner.png");
        let fields = body::<Templates>(&["name=Promo".to_string()], Some(&file)).unwrap();
        assert_eq!(
            Value::Object(fields),
            json!({"name": "Promo", "file": "/tmp/banner.png"})
        );
    }

    #[test]
    fn test_body_rejects_file_without_attachment_field() {
        let file = PathBuf::from("/tmp/x.csv");
        assert!(body::<Contacts>(&[], Some(&file)).is_err());
    }
}
