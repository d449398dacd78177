//
//  chatbridge
//  api/resources/whatsapp.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! WhatsApp instances API.
//!
//! An instance is one linked WhatsApp account, identified by a UUID. It moves
//! through a pairing lifecycle:
//!
//! * `initializing` - Just created, not ready for pairing yet
//! * `qr_ready` - A QR code is available to scan from the phone
//! * `authenticated` / `ready` - Paired, messages can be sent
//!
//! Messaging calls return the full response envelope rather than just `data`,
//! since callers read quota counters from it.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatbridge::{ChatBridgeClient, Fields};
//! use chatbridge::api::resources::SendResult;
//! use serde_json::json;
//!
//! let client = ChatBridgeClient::new("my-token")?;
//!
//! let mut message = Fields::new();
//! message.insert("to".into(), json!("6281234567890"));
//! message.insert("message".into(), json!("Here is our catalog"));
//! message.insert("file".into(), json!("/srv/assets/catalog.pdf"));
//!
//! let envelope = client.whatsapp().send_message("instance-uuid", message)?;
//! let result = SendResult::from_envelope(envelope)?;
//! println!("quota left: {:?}", result.message_quota_remaining);
//! # Ok::<(), chatbridge::ApiError>(())
//! ```

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{flexible_bool, flexible_string, item_path, split_attachment, Endpoint, Resource};
use crate::api::common::{data_object, decode, Result};
use crate::api::request::{Attachments, Fields, QueryParams};
use crate::api::transport::HttpClient;

/// Body field that carries a media file path on send calls.
pub const MESSAGE_ATTACHMENT_FIELD: &str = "file";

/// Endpoint marker for `/whatsapp`.
pub struct Instances;

impl Endpoint for Instances {
    const PATH: &'static str = "whatsapp";
    type Model = WhatsAppInstance;
}

/// A linked WhatsApp account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppInstance {
    pub instance_uuid: String,

    /// Pairing state, e.g. `qr_ready` or `authenticated`.
    #[serde(default)]
    pub status: Option<String>,

    /// Phone number the instance is paired with.
    #[serde(default, deserialize_with = "flexible_string")]
    pub logged_number: Option<String>,

    #[serde(default, deserialize_with = "flexible_bool")]
    pub activate_autoresponse: Option<bool>,
}

impl WhatsAppInstance {
    /// Returns `true` once the instance can send messages.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.status.as_deref(), Some("authenticated") | Some("ready"))
    }
}

/// QR code payload for pairing an instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QrCode {
    #[serde(default)]
    pub qr_url: Option<String>,
}

/// Counters returned alongside a sent message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendResult {
    #[serde(default)]
    pub message_quota_remaining: Option<i64>,

    /// Media storage used by the account, in bytes.
    #[serde(default)]
    pub storage_used: Option<u64>,
}

impl SendResult {
    /// Reads the counters from a send envelope's `data` member.
    pub fn from_envelope(envelope: Value) -> Result<Self> {
        decode(data_object(envelope))
    }
}

/// Wrapper over `/whatsapp`.
pub struct WhatsApp<'a> {
    http: &'a HttpClient,
    instances: Resource<'a, Instances>,
}

impl<'a> WhatsApp<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self {
            http,
            instances: Resource::new(http),
        }
    }

    /// Lists instances (`data` member).
    pub fn list(&self, params: &QueryParams) -> Result<Value> {
        self.instances.list(params)
    }

    /// Fetches one instance by UUID (`data` member).
    pub fn get(&self, instance_uuid: impl Display) -> Result<Value> {
        self.instances.get(instance_uuid)
    }

    /// Creates a new instance. Sends no body; returns the full envelope.
    pub fn create(&self) -> Result<Value> {
        self.http.post(Instances::PATH, Fields::new(), Attachments::new())
    }

    /// Fetches the pairing QR code of an instance (`data` member).
    pub fn qr_code(&self, instance_uuid: impl Display) -> Result<Value> {
        let path = format!("{}/qrcode", item_path(Instances::PATH, instance_uuid));
        Ok(data_object(self.http.get(&path, &QueryParams::new())?))
    }

    /// Sends a message; a `file` path in `data` is uploaded as media.
    ///
    /// Returns the full envelope.
    pub fn send_message(&self, instance_uuid: impl Display, data: Fields) -> Result<Value> {
        self.send(instance_uuid, "send-message", data)
    }

    /// Sends a template message; returns the full envelope.
    pub fn send_with_template(&self, instance_uuid: impl Display, data: Fields) -> Result<Value> {
        self.send(instance_uuid, "send-template", data)
    }

    /// Lists instances decoded into [`WhatsAppInstance`].
    pub fn list_instances(&self, params: &QueryParams) -> Result<Vec<WhatsAppInstance>> {
        self.instances.list_models(params)
    }

    /// Fetches one instance decoded into [`WhatsAppInstance`].
    pub fn instance(&self, instance_uuid: impl Display) -> Result<WhatsAppInstance> {
        self.instances.get_model(instance_uuid)
    }

    /// Fetches the pairing QR code decoded into [`QrCode`].
    pub fn qr(&self, instance_uuid: impl Display) -> Result<QrCode> {
        decode(self.qr_code(instance_uuid)?)
    }

    fn send(&self, instance_uuid: impl Display, action: &str, data: Fields) -> Result<Value> {
        let path = format!("{}/{}", item_path(Instances::PATH, instance_uuid), action);
        let (data, files) = split_attachment(data, Some(MESSAGE_ATTACHMENT_FIELD));
        self.http.post(&path, data, files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_instance_decoding() {
        let instance: WhatsAppInstance = decode(json!({
            "instance_uuid": "9b2c",
            "status": "ready",
            "logged_number": "6281234567890",
            "activate_autoresponse": 1
        }))
        .unwrap();
        assert!(instance.is_authenticated());
        assert_eq!(instance.activate_autoresponse, Some(true));

        let pending: WhatsAppInstance =
            decode(json!({"instance_uuid": "x", "status": "qr_ready"})).unwrap();
        assert!(!pending.is_authenticated());
    }

    #[test]
    fn test_send_result_from_envelope() {
        let result = SendResult::from_envelope(json!({
            "success": true,
            "data": {"message_quota_remaining": 41, "storage_used": 2048}
        }))
        .unwrap();
        assert_eq!(result.message_quota_remaining, Some(41));
        assert_eq!(result.storage_used, Some(2048));

        let empty = SendResult::from_envelope(json!({"success": true})).unwrap();
        assert_eq!(empty, SendResult::default());
    }
}
