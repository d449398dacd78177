//
//  chatbridge
//  api/resources/templates.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Templates API types.
//!
//! Templates are reusable message bodies with `{placeholder}` parameters.
//! A template may carry a media file: put its local path under the `file`
//! key and the wrapper uploads it as a multipart part instead of sending it
//! as a body field.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatbridge::{ChatBridgeClient, Fields};
//! use serde_json::json;
//!
//! let client = ChatBridgeClient::new("my-token")?;
//!
//! let mut data = Fields::new();
//! data.insert("name".into(), json!("Year End Promo"));
//! data.insert("content".into(), json!("Hi {name}! {discount}% off until Dec 31."));
//! data.insert("type".into(), json!("image"));
//! data.insert("file".into(), json!("/srv/assets/promo.jpg"));
//!
//! let template = client.templates().create(data)?;
//! println!("template #{}", template["id"]);
//! # Ok::<(), chatbridge::ApiError>(())
//! ```

use serde::{Deserialize, Serialize};

use super::{flexible_bool, flexible_id, Endpoint, Resource};

/// Endpoint marker for `/templates`.
pub struct Templates;

impl Endpoint for Templates {
    const PATH: &'static str = "templates";
    const ATTACHMENT_FIELD: Option<&'static str> = Some("file");
    type Model = Template;
}

/// Wrapper over `/templates`.
pub type TemplateResource<'a> = Resource<'a, Templates>;

/// A message template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<u64>,

    #[serde(default)]
    pub name: Option<String>,

    /// Message body with `{placeholder}` parameters.
    #[serde(default)]
    pub content: Option<String>,

    /// Template type, e.g. `text`, `image` or `document`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_active: Option<bool>,
}
