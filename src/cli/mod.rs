//
//  chatbridge
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod config;
mod fields;
mod import;
mod resource;
mod whatsapp;

pub use config::ConfigCommand;
pub use fields::{parse_fields, parse_query, parse_value};
pub use import::ImportCommand;
pub use resource::ResourceCommand;
pub use whatsapp::WhatsAppCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::common::ApiError;
use crate::api::ChatBridgeClient;
use crate::config::ClientConfig;
use crate::output::{OutputFormat, OutputWriter};

/// ChatBridge CLI - Work with the ChatBridge messaging API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "chatbridge",
    version,
    about = "Work with the ChatBridge messaging API from the command line",
    long_about = "chatbridge manages contacts, audiences, templates and campaigns, \
                  and sends WhatsApp messages through ChatBridge instances.",
    propagate_version = true,
    after_help = "Use 'chatbridge <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// API token sent as a bearer token
    #[arg(long, global = true, env = "CHATBRIDGE_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, global = true, env = "CHATBRIDGE_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Connect timeout in seconds
    #[arg(long, global = true)]
    pub connect_timeout: Option<u64>,

    /// Log requests and responses
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Returns a writer for the selected output format.
    pub fn output(&self) -> OutputWriter {
        OutputWriter::new(if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        })
    }

    /// Loads the config file and applies command-line overrides on top.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::load()?;

        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            config = config.with_connect_timeout(connect_timeout);
        }
        if self.debug {
            config = config.with_debug(true);
        }

        Ok(config)
    }

    /// Builds an API client, failing with an authentication error when no
    /// token was given.
    pub fn client(&self) -> Result<ChatBridgeClient> {
        let token = self
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ApiError::authentication(Some(
                    "No API token. Pass --token or set CHATBRIDGE_API_TOKEN.".to_string(),
                ))
            })?;

        Ok(ChatBridgeClient::with_config(token, self.client_config()?)?)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage contacts
    #[command(visible_alias = "c")]
    Contacts(ResourceCommand),

    /// Manage audiences (contact groups)
    Audiences(ResourceCommand),

    /// Manage message templates
    Templates(ResourceCommand),

    /// Manage campaigns
    Campaigns(ResourceCommand),

    /// Manage WhatsApp instances and send messages
    #[command(visible_alias = "wa")]
    Whatsapp(WhatsAppCommand),

    /// Bulk import contacts from a CSV file
    Import(ImportCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_missing_token_is_authentication_error() {
        let global = GlobalOptions {
            token: Some("   ".to_string()),
            ..Default::default()
        };
        let err = global.client().unwrap_err();
        let api = err.downcast_ref::<ApiError>().unwrap();
        assert_eq!(api.status_code(), 401);
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from([
            "chatbridge",
            "--token",
            "abc",
            "--timeout",
            "5",
            "contacts",
            "list",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.global.token.as_deref(), Some("abc"));
        assert_eq!(cli.global.timeout, Some(5));
        assert!(cli.global.json);
        assert!(matches!(cli.command, Commands::Contacts(_)));
    }
}
