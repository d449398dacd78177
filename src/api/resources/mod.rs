//
//  chatbridge
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! ChatBridge resource wrappers.
//!
//! Each resource family binds the shared transport to a fixed endpoint
//! segment. Contacts, audiences, templates and campaigns are all the same
//! CRUD shape, so they share one generic wrapper, [`Resource`], parameterized
//! by an [`Endpoint`] marker type. WhatsApp instances add lifecycle and
//! messaging calls and get their own wrapper, [`WhatsApp`].
//!
//! # Module Organization
//!
//! - [`contacts`] - Contact records
//! - [`audiences`] - Named contact groups
//! - [`templates`] - Message templates, optionally with a media file
//! - [`campaigns`] - Scheduled template sends to an audience
//! - [`whatsapp`] - WhatsApp instances, QR pairing and message sending
//!
//! # Return Values
//!
//! | Operation | Returns |
//! |-----------|---------|
//! | `list` | `data` member, `[]` when absent |
//! | `get`, `create`, `update` | `data` member, `{}` when absent |
//! | `delete` | full envelope |
//!
//! # Example
//!
//! ```rust,no_run
//! use chatbridge::{ChatBridgeClient, Fields, QueryParams};
//! use serde_json::json;
//!
//! let client = ChatBridgeClient::new("my-token")?;
//!
//! let mut contact = Fields::new();
//! contact.insert("name".into(), json!("John Doe"));
//! contact.insert("phone".into(), json!("6281234567890"));
//! let created = client.contacts().create(contact)?;
//!
//! let first_page = client.contacts().list(&QueryParams::new())?;
//! println!("{} -> {}", created["id"], first_page);
//! # Ok::<(), chatbridge::ApiError>(())
//! ```

use std::fmt::Display;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::api::common::{data_list, data_object, decode, Result};
use crate::api::request::{Attachments, Fields, QueryParams};
use crate::api::transport::HttpClient;

pub mod audiences;
pub mod campaigns;
pub mod contacts;
pub mod templates;
pub mod whatsapp;

pub use audiences::*;
pub use campaigns::*;
pub use contacts::*;
pub use templates::*;
pub use whatsapp::*;

/// Binds a resource wrapper to its endpoint.
pub trait Endpoint {
    /// Endpoint segment relative to the base URL, e.g. `"contacts"`.
    const PATH: &'static str;

    /// Body field that carries a local file path to upload, if any.
    const ATTACHMENT_FIELD: Option<&'static str> = None;

    /// Typed model of a single item.
    type Model: DeserializeOwned;
}

/// Generic CRUD wrapper over one endpoint.
///
/// Borrowed from a [`ChatBridgeClient`](crate::ChatBridgeClient); cheap to
/// create and holds no state of its own.
pub struct Resource<'a, E: Endpoint> {
    http: &'a HttpClient,
    endpoint: PhantomData<E>,
}

impl<'a, E: Endpoint> Resource<'a, E> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self {
            http,
            endpoint: PhantomData,
        }
    }

    /// Returns the endpoint segment this wrapper targets.
    pub fn endpoint(&self) -> &'static str {
        E::PATH
    }

    /// Lists items, passing `params` as the query string.
    pub fn list(&self, params: &QueryParams) -> Result<Value> {
        Ok(data_list(self.http.get(E::PATH, params)?))
    }

    /// Fetches one item.
    pub fn get(&self, id: impl Display) -> Result<Value> {
        self.get_with(id, &QueryParams::new())
    }

    /// Fetches one item with extra query parameters.
    pub fn get_with(&self, id: impl Display, params: &QueryParams) -> Result<Value> {
        Ok(data_object(self.http.get(&item_path(E::PATH, id), params)?))
    }

    /// Creates an item.
    ///
    /// When the endpoint declares an attachment field and `data` holds a path
    /// under it, that file is uploaded and the request goes out as multipart.
    pub fn create(&self, data: Fields) -> Result<Value> {
        let (data, files) = split_attachment(data, E::ATTACHMENT_FIELD);
        Ok(data_object(self.http.post(E::PATH, data, files)?))
    }

    /// Updates an item. Attachments are handled as in [`Resource::create`].
    pub fn update(&self, id: impl Display, data: Fields) -> Result<Value> {
        let (data, files) = split_attachment(data, E::ATTACHMENT_FIELD);
        Ok(data_object(self.http.put(&item_path(E::PATH, id), data, files)?))
    }

    /// Deletes an item and returns the full response envelope.
    pub fn delete(&self, id: impl Display) -> Result<Value> {
        self.http.delete(&item_path(E::PATH, id))
    }

    /// Lists items decoded into the endpoint's model.
    pub fn list_models(&self, params: &QueryParams) -> Result<Vec<E::Model>> {
        decode(self.list(params)?)
    }

    /// Fetches one item decoded into the endpoint's model.
    pub fn get_model(&self, id: impl Display) -> Result<E::Model> {
        decode(self.get(id)?)
    }
}

pub(crate) fn item_path(endpoint: &str, id: impl Display) -> String {
    format!("{}/{}", endpoint, id)
}

/// Moves a file path out of the body fields into the attachment map.
///
/// Only string values are treated as paths; anything else stays in the body.
pub(crate) fn split_attachment(mut data: Fields, field: Option<&str>) -> (Fields, Attachments) {
    let mut files = Attachments::new();

    if let Some(field) = field {
        if let Some(Value::String(path)) = data.get(field) {
            files.insert(field.to_string(), path.into());
            data.remove(field);
        }
    }

    (data, files)
}

/// Accepts integer ids given as numbers or numeric strings.
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_u64()
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid id {}", number))),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid id '{}'", text))),
        Some(other) => Err(de::Error::custom(format!("invalid id {}", other))),
    }
}

/// Accepts strings, and numbers or booleans rendered as strings.
///
/// Phone numbers in particular come back as either.
pub(crate) fn flexible_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected a string, got {}", other))),
    }
}

/// Accepts `true`/`false`, `1`/`0` and their string forms.
///
/// Form-backed APIs return booleans in any of these shapes.
pub(crate) fn flexible_bool<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(flag)),
        Some(Value::Number(number)) => Ok(Some(number.as_f64().unwrap_or(0.0) != 0.0)),
        Some(Value::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(Some(true)),
            "0" | "false" | "no" | "" => Ok(Some(false)),
            other => Err(de::Error::custom(format!("invalid boolean '{}'", other))),
        },
        Some(other) => Err(de::Error::custom(format!("invalid boolean {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_split_attachment_moves_path() {
        let (data, files) = split_attachment(
            fields(json!({"name": "Promo", "file": "/tmp/banner.png"})),
            Some("file"),
        );
        assert_eq!(Value::Object(data), json!({"name": "Promo"}));
        assert_eq!(files.get("file"), Some(&PathBuf::from("/tmp/banner.png")));
    }

    #[test]
    fn test_split_attachment_without_field() {
        let body = fields(json!({"name": "Jane", "file": "/tmp/x"}));
        let (data, files) = split_attachment(body.clone(), None);
        assert_eq!(data, body);
        assert!(files.is_empty());

        let body = fields(json!({"file": null}));
        let (data, files) = split_attachment(body.clone(), Some("file"));
        assert_eq!(data, body);
        assert!(files.is_empty());
    }

    #[test]
    fn test_item_path() {
        assert_eq!(item_path("contacts", 42), "contacts/42");
        assert_eq!(item_path("whatsapp", "abc-123"), "whatsapp/abc-123");
    }

    #[test]
    fn test_flexible_bool() {
        #[derive(Deserialize)]
        struct Flag {
            #[serde(default, deserialize_with = "flexible_bool")]
            on: Option<bool>,
        }

        let parse = |v: Value| serde_json::from_value::<Flag>(v).unwrap().on;
        assert_eq!(parse(json!({"on": true})), Some(true));
        assert_eq!(parse(json!({"on": 0})), Some(false));
        assert_eq!(parse(json!({"on": "1"})), Some(true));
        assert_eq!(parse(json!({})), None);
        assert!(serde_json::from_value::<Flag>(json!({"on": "maybe"})).is_err());
    }

    #[test]
    fn test_flexible_id_and_string() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "flexible_id")]
            id: Option<u64>,
            #[serde(default, deserialize_with = "flexible_string")]
            phone: Option<String>,
        }

        let parse = |v: Value| serde_json::from_value::<Row>(v).unwrap();
        let row = parse(json!({"id": "12", "phone": 6281234567890u64}));
        assert_eq!(row.id, Some(12));
        assert_eq!(row.phone.as_deref(), Some("6281234567890"));

        let row = parse(json!({"id": 7, "phone": "6287654321098"}));
        assert_eq!(row.id, Some(7));
        assert_eq!(row.phone.as_deref(), Some("6287654321098"));

        let row = parse(json!({"id": null}));
        assert_eq!(row.id, None);
        assert_eq!(row.phone, None);

        assert!(serde_json::from_value::<Row>(json!({"id": "abc"})).is_err());
        assert!(serde_json::from_value::<Row>(json!({"phone": [1]})).is_err());
    }
}
