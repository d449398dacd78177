//
//  chatbridge
//  api/resources/contacts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Contacts API types.
//!
//! A contact is a phone number with an optional name, email and free-form
//! custom fields. Phone numbers are unique per account; creating a contact
//! whose phone is already registered fails with a validation error.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatbridge::{ApiError, ChatBridgeClient, Fields};
//! use serde_json::json;
//!
//! let client = ChatBridgeClient::new("my-token")?;
//!
//! let mut data = Fields::new();
//! data.insert("name".into(), json!("Jane Smith"));
//! data.insert("phone".into(), json!("6287654321098"));
//! data.insert("custom_fields".into(), json!({"company": "PT Demo"}));
//!
//! match client.contacts().create(data) {
//!     Ok(contact) => println!("created #{}", contact["id"]),
//!     Err(ApiError::Validation { errors, .. }) => println!("rejected: {:?}", errors),
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), ApiError>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{flexible_id, flexible_string, Endpoint, Resource};

/// Endpoint marker for `/contacts`.
pub struct Contacts;

impl Endpoint for Contacts {
    const PATH: &'static str = "contacts";
    type Model = Contact;
}

/// Wrapper over `/contacts`.
pub type ContactResource<'a> = Resource<'a, Contacts>;

/// A contact record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<u64>,

    #[serde(default, deserialize_with = "flexible_string")]
    pub name: Option<String>,

    /// Phone number in international format, without `+`.
    #[serde(default, deserialize_with = "flexible_string")]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Arbitrary per-contact attributes (company, position, city, ...).
    #[serde(default)]
    pub custom_fields: Option<Map<String, Value>>,

    #[serde(default)]
    pub created_at: Option<String>,
}
