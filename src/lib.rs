//
//  chatbridge
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # ChatBridge SDK
//!
//! A client library and command-line tool for the ChatBridge messaging API:
//! contacts, audiences, templates, campaigns and WhatsApp instances.
//!
//! ## Overview
//!
//! The SDK turns method calls into authenticated HTTP requests, returns the
//! decoded JSON payloads, and maps HTTP failures onto a closed error type that
//! callers can match exhaustively.
//!
//! ## Features
//!
//! - **Bearer Authentication**: a static API token on every request
//! - **JSON and Multipart**: file uploads for templates and media messages
//! - **Typed Errors**: authentication, not-found, validation (with field
//!   errors), rate-limit (with retry-after) and generic failures
//! - **Blocking and Stateless**: one round trip per call, no hidden retries
//!
//! ## Module Structure
//!
//! - [`api`]: Client facade, resource wrappers, transport and error taxonomy
//! - [`config`]: Client configuration and the optional config file
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting for the CLI (table and JSON)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chatbridge::{ApiError, ChatBridgeClient, Fields};
//! use serde_json::json;
//!
//! let client = ChatBridgeClient::new("my-token")?;
//!
//! let mut message = Fields::new();
//! message.insert("to".into(), json!("6281234567890"));
//! message.insert("message".into(), json!("Hello from ChatBridge!"));
//!
//! match client.whatsapp().send_message("instance-uuid", message) {
//!     Ok(envelope) => println!("quota left: {}", envelope["data"]["message_quota_remaining"]),
//!     Err(ApiError::RateLimit { retry_after, .. }) => println!("retry in {}s", retry_after),
//!     Err(e) => println!("error {}: {}", e.status_code(), e),
//! }
//! # Ok::<(), ApiError>(())
//! ```

/// API client implementation for ChatBridge.
///
/// Provides the [`ChatBridgeClient`] facade, the five resource wrappers, the
/// request builder, the HTTP transport and the response interpreter.
pub mod api;

/// Command-line interface definitions.
///
/// Contains the `chatbridge` commands, arguments, and subcommands defined
/// using the clap derive API.
pub mod cli;

/// Client configuration.
///
/// Defaults, merging of caller overrides, and the optional TOML file stored
/// in the platform config directory.
pub mod config;

/// Output formatting for the CLI.
pub mod output;

pub use api::client::ChatBridgeClient;
pub use api::common::{ApiError, ErrorKind, FieldErrors};
pub use api::request::{Attachments, Fields, QueryParams};
pub use cli::Cli;
pub use config::ClientConfig;

/// Application name constant.
pub const APP_NAME: &str = "chatbridge";

/// Application version constant, taken from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Scripts can tell the failure kinds apart without parsing stderr.
///
/// # Example
///
/// ```rust
/// use chatbridge::{exit_codes, ApiError};
///
/// let err = ApiError::rate_limit(None, Some(30));
/// assert_eq!(exit_codes::for_error(&err), exit_codes::RATE_LIMIT);
/// ```
pub mod exit_codes {
    use crate::api::common::{ApiError, ErrorKind};

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// The API token is missing or was rejected.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested resource does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// The server rejected the submitted fields.
    pub const VALIDATION: i32 = 9;

    /// API rate limit exceeded. Wait for the retry-after period.
    pub const RATE_LIMIT: i32 = 32;

    /// Maps an API error onto its exit code.
    pub fn for_error(error: &ApiError) -> i32 {
        match error.kind() {
            ErrorKind::Authentication => AUTH_ERROR,
            ErrorKind::NotFound => NOT_FOUND,
            ErrorKind::Validation => VALIDATION,
            ErrorKind::RateLimit => RATE_LIMIT,
            ErrorKind::Generic => ERROR,
        }
    }
}
