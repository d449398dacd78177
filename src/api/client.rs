//
//  chatbridge
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # ChatBridge Client
//!
//! The entry point of the SDK. [`ChatBridgeClient`] captures the API token and
//! configuration at construction and exposes one accessor per resource
//! family. Every accessor borrows the same transport, so creating them is free.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chatbridge::{ApiError, ChatBridgeClient, QueryParams};
//!
//! let token = std::env::var("CHATBRIDGE_API_TOKEN").unwrap_or_default();
//! let client = ChatBridgeClient::new(token)?;
//!
//! match client.contacts().get(999999) {
//!     Ok(contact) => println!("{}", contact),
//!     Err(ApiError::NotFound { message, .. }) => println!("missing: {}", message),
//!     Err(ApiError::RateLimit { retry_after, .. }) => println!("wait {}s", retry_after),
//!     Err(e) => println!("failed ({}): {}", e.status_code(), e),
//! }
//! # Ok::<(), ApiError>(())
//! ```

use serde_json::Value;

use crate::api::common::Result;
use crate::api::resources::{
    AudienceResource, CampaignResource, ContactResource, Resource, TemplateResource, WhatsApp,
};
use crate::api::transport::HttpClient;
use crate::config::ClientConfig;

/// Client for the ChatBridge API.
///
/// Instances are independent of each other and immutable after construction.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use chatbridge::ChatBridgeClient;
/// use chatbridge::config::ClientConfig;
///
/// // Default endpoint and timeouts
/// let client = ChatBridgeClient::new("my-token")?;
///
/// // Custom configuration
/// let config = ClientConfig::default()
///     .with_base_url("https://staging.chatbridge.cloud/api/v1")
///     .with_timeout(60)
///     .with_debug(true);
/// let staging = ChatBridgeClient::with_config("my-token", config)?;
/// # Ok::<(), chatbridge::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChatBridgeClient {
    http: HttpClient,
}

impl ChatBridgeClient {
    /// Creates a client with the default configuration.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_config(api_token, ClientConfig::default())
    }

    /// Creates a client with an explicit configuration.
    pub fn with_config(api_token: impl Into<String>, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(api_token, config)?,
        })
    }

    /// WhatsApp instances, pairing and messaging.
    pub fn whatsapp(&self) -> WhatsApp<'_> {
        WhatsApp::new(&self.http)
    }

    /// Message templates.
    pub fn templates(&self) -> TemplateResource<'_> {
        Resource::new(&self.http)
    }

    /// Contact groups.
    pub fn audiences(&self) -> AudienceResource<'_> {
        Resource::new(&self.http)
    }

    /// Contacts.
    pub fn contacts(&self) -> ContactResource<'_> {
        Resource::new(&self.http)
    }

    /// Campaigns.
    pub fn campaigns(&self) -> CampaignResource<'_> {
        Resource::new(&self.http)
    }

    /// Returns the API token.
    pub fn api_token(&self) -> &str {
        self.http.token()
    }

    /// Returns the configuration captured at construction.
    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// Looks up a configuration value by key, including unrecognized keys.
    pub fn config_value(&self, key: &str) -> Option<Value> {
        self.http.config().get(key)
    }

    /// Returns the underlying transport, for endpoints without a wrapper.
    pub fn http_client(&self) -> &HttpClient {
        &self.http
    }
}
