//
//  chatbridge
//  cli/whatsapp.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! WhatsApp instance commands
//!
//! Lists and pairs instances, and sends plain, media and template messages.
//! Send commands report the remaining message quota from the response.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::{json, Map, Value};

use super::fields::parse_fields;
use super::GlobalOptions;
use crate::api::request::{Fields, QueryParams};
use crate::api::resources::{SendResult, MESSAGE_ATTACHMENT_FIELD};
use crate::output::OutputWriter;

/// Manage WhatsApp instances and send messages
#[derive(Args, Debug)]
pub struct WhatsAppCommand {
    #[command(subcommand)]
    pub command: WhatsAppSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum WhatsAppSubcommand {
    /// List instances
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one instance
    #[command(visible_alias = "view")]
    Get(InstanceArgs),

    /// Create a new instance
    Create,

    /// Show the pairing QR code of an instance
    Qr(InstanceArgs),

    /// Send a message, optionally with a media file
    Send(SendArgs),

    /// Send a template message
    #[command(name = "send-template")]
    SendTemplate(SendTemplateArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by status (e.g. qr_ready, authenticated)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args, Debug)]
pub struct InstanceArgs {
    /// Instance UUID
    pub uuid: String,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Instance UUID
    pub uuid: String,

    /// Recipient phone number
    #[arg(long)]
    pub to: String,

    /// Message text
    #[arg(long, short = 'm')]
    pub message: String,

    /// Image or document to attach
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SendTemplateArgs {
    /// Instance UUID
    pub uuid: String,

    /// Recipient phone number
    #[arg(long)]
    pub to: String,

    /// Template ID
    #[arg(long)]
    pub template_id: String,

    /// Template parameter as key=value (repeatable)
    #[arg(long = "param", short = 'P', value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

impl WhatsAppCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            WhatsAppSubcommand::List(args) => self.list(args, global),
            WhatsAppSubcommand::Get(args) => self.get(args, global),
            WhatsAppSubcommand::Create => self.create(global),
            WhatsAppSubcommand::Qr(args) => self.qr(args, global),
            WhatsAppSubcommand::Send(args) => self.send(args, global),
            WhatsAppSubcommand::SendTemplate(args) => self.send_template(args, global),
        }
    }

    /// List instances
    fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();

        let mut params = QueryParams::new();
        if let Some(status) = &args.status {
            params.insert("status".to_string(), status.clone());
        }

        if output.is_json() {
            output.write_value(&client.whatsapp().list(&params)?)
        } else {
            output.write_list(&client.whatsapp().list_instances(&params)?)
        }
    }

    /// Show one instance
    fn get(&self, args: &InstanceArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();

        if output.is_json() {
            return output.write_value(&client.whatsapp().get(&args.uuid)?);
        }

        let instance = client.whatsapp().instance(&args.uuid)?;
        output.write(&instance)?;
        if !instance.is_authenticated() {
            output.write_info("");
            output.write_info(&format!(
                "Not paired yet. Run 'chatbridge whatsapp qr {}' to get a QR code.",
                instance.instance_uuid
            ));
        }
        Ok(())
    }

    /// Create an instance
    fn create(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();

        let envelope = client.whatsapp().create()?;
        if output.is_json() {
            return output.write_value(&envelope);
        }

        let uuid = envelope
            .get("data")
            .and_then(|d| d.get("instance_uuid"))
            .and_then(Value::as_str);
        match uuid {
            Some(uuid) => output.write_success(&format!("Created instance {}", uuid)),
            None => output.write_value(&envelope)?,
        }
        Ok(())
    }

    /// Show the pairing QR code
    fn qr(&self, args: &InstanceArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();

        if output.is_json() {
            return output.write_value(&client.whatsapp().qr_code(&args.uuid)?);
        }

        let qr = client.whatsapp().qr(&args.uuid)?;
        output.write(&qr)?;
        output.write_info("Scan it from WhatsApp > Linked devices on your phone.");
        Ok(())
    }

    /// Send a message
    fn send(&self, args: &SendArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;

        let mut data = Fields::new();
        data.insert("to".to_string(), json!(args.to));
        data.insert("message".to_string(), json!(args.message));
        if let Some(file) = &args.file {
            data.insert(
                MESSAGE_ATTACHMENT_FIELD.to_string(),
                json!(file.to_string_lossy()),
            );
        }

        let envelope = client.whatsapp().send_message(&args.uuid, data)?;
        report_sent(&global.output(), &args.to, envelope)
    }

    /// Send a template message
    fn send_template(&self, args: &SendTemplateArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;

        let mut data = Fields::new();
        data.insert("to".to_string(), json!(args.to));
        data.insert(
            "template_id".to_string(),
            super::parse_value(&args.template_id),
        );
        if !args.params.is_empty() {
            let params: Map<String, Value> = parse_fields(&args.params)?;
            data.insert("parameters".to_string(), Value::Object(params));
        }

        let envelope = client.whatsapp().send_with_template(&args.uuid, data)?;
        report_sent(&global.output(), &args.to, envelope)
    }
}

fn report_sent(output: &OutputWriter, to: &str, envelope: Value) -> Result<()> {
    if output.is_json() {
        return output.write_value(&envelope);
    }

    let result = SendResult::from_envelope(envelope)?;
    output.write_success(&format!("Message sent to {}", to));
    output.write(&result)?;
    Ok(())
}
