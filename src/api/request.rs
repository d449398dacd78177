//
//  chatbridge
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Building
//!
//! This module turns a [`RequestDescriptor`] (method, endpoint, query, body
//! fields, file attachments) into a [`PreparedRequest`]: the final URL, the
//! method that goes on the wire, and the body encoding.
//!
//! ## Encoding Rules
//!
//! | Method | Attachments | Wire method | Body |
//! |--------|-------------|-------------|------|
//! | GET | - | GET | none, query string appended |
//! | DELETE | - | DELETE | none |
//! | POST | none | POST | JSON object |
//! | POST | some | POST | multipart |
//! | PUT | none | PUT | JSON object |
//! | PUT | some | POST | multipart with `_method=PUT` |
//!
//! Multipart PUT is not accepted by every server, so a PUT with attachments is
//! sent as a POST carrying a `_method` override field.
//!
//! Preparing a request is pure; nothing here touches the network, which keeps
//! the encoding decisions testable on their own.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde_json::{Map, Value};

/// Query string parameters. Ordered, so the encoded query is stable.
pub type QueryParams = BTreeMap<String, String>;

/// JSON body fields of a POST or PUT request.
pub type Fields = Map<String, Value>;

/// File attachments, keyed by form field name, pointing at local files.
pub type Attachments = BTreeMap<String, PathBuf>;

/// Name of the form field used to emulate PUT over a multipart POST.
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

/// HTTP methods used by the ChatBridge API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joins a base URL, an endpoint path and optional query parameters.
///
/// Trailing slashes are stripped from `base_url` and leading slashes from
/// `endpoint`, and the two are joined with exactly one slash. A non-empty
/// `query` is form-urlencoded and appended after a `?`.
///
/// # Example
///
/// ```rust
/// use chatbridge::api::request::{build_url, QueryParams};
///
/// let mut query = QueryParams::new();
/// query.insert("limit".to_string(), "1".to_string());
///
/// assert_eq!(
///     build_url("https://x/api/", "contacts", &query),
///     "https://x/api/contacts?limit=1"
/// );
/// assert_eq!(
///     build_url("https://x/api", "/contacts", &QueryParams::new()),
///     "https://x/api/contacts"
/// );
/// ```
pub fn build_url(base_url: &str, endpoint: &str, query: &QueryParams) -> String {
    let mut url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );

    if !query.is_empty() {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.iter())
            .finish();
        url.push('?');
        url.push_str(&encoded);
    }

    url
}

/// Describes a single API call before it is encoded.
///
/// # Example
///
/// ```rust
/// use chatbridge::api::request::{Method, RequestDescriptor, RequestBody};
/// use serde_json::json;
///
/// let request = RequestDescriptor::put("templates/5")
///     .field("name", json!("Promo"))
///     .attach("file", "/tmp/banner.png")
///     .prepare("https://chatbridge.cloud/api/v1");
///
/// assert_eq!(request.method, Method::Post);
/// assert!(matches!(request.body, RequestBody::Multipart(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Requested HTTP method.
    pub method: Method,
    /// Endpoint path relative to the base URL.
    pub endpoint: String,
    /// Query parameters, only used for GET.
    pub query: QueryParams,
    /// Body fields, only used for POST and PUT.
    pub fields: Fields,
    /// File attachments, only used for POST and PUT.
    pub files: Attachments,
}

impl RequestDescriptor {
    /// Creates a descriptor with an empty query, body and attachment set.
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: QueryParams::new(),
            fields: Fields::new(),
            files: Attachments::new(),
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Put, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Delete, endpoint)
    }

    /// Replaces the query parameters.
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Replaces the body fields.
    pub fn fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Sets a single body field.
    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Replaces the file attachments.
    pub fn files(mut self, files: Attachments) -> Self {
        self.files = files;
        self
    }

    /// Adds a single file attachment.
    pub fn attach(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.files.insert(name.into(), path.into());
        self
    }

    /// Resolves the URL, wire method and body encoding against `base_url`.
    pub fn prepare(&self, base_url: &str) -> PreparedRequest {
        match self.method {
            Method::Get => PreparedRequest {
                method: Method::Get,
                url: build_url(base_url, &self.endpoint, &self.query),
                body: RequestBody::Empty,
            },
            Method::Delete => PreparedRequest {
                method: Method::Delete,
                url: build_url(base_url, &self.endpoint, &QueryParams::new()),
                body: RequestBody::Empty,
            },
            Method::Post | Method::Put => {
                let url = build_url(base_url, &self.endpoint, &QueryParams::new());

                if self.files.is_empty() {
                    return PreparedRequest {
                        method: self.method,
                        url,
                        body: RequestBody::Json(Value::Object(self.fields.clone())),
                    };
                }

                let mut parts = Vec::new();
                for (name, value) in &self.fields {
                    flatten_field(name, value, &mut parts);
                }
                if self.method == Method::Put {
                    parts.push(FormPart::Text {
                        name: METHOD_OVERRIDE_FIELD.to_string(),
                        value: Method::Put.as_str().to_string(),
                    });
                }
                for (name, path) in &self.files {
                    parts.push(FormPart::File {
                        name: name.clone(),
                        path: path.clone(),
                    });
                }

                PreparedRequest {
                    method: Method::Post,
                    url,
                    body: RequestBody::Multipart(parts),
                }
            }
        }
    }
}

/// A request ready to hand to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// Method that goes on the wire (PUT with attachments becomes POST).
    pub method: Method,
    /// Fully-qualified URL including any query string.
    pub url: String,
    /// Encoded body.
    pub body: RequestBody,
}

/// Body encoding chosen for a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body (GET, DELETE).
    Empty,
    /// `application/json` body.
    Json(Value),
    /// `multipart/form-data` body, parts in send order.
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestBody::Empty => "empty",
            RequestBody::Json(_) => "json",
            RequestBody::Multipart(_) => "multipart",
        }
    }
}

/// A single part of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    /// A plain form field.
    Text { name: String, value: String },
    /// A file read from a local path.
    File { name: String, path: PathBuf },
}

/// Flattens a JSON value into text form parts.
///
/// Nested values use bracket notation (`custom_fields[company]`,
/// `contacts[0][phone]`), booleans become `1`/`0` and nulls are omitted.
fn flatten_field(name: &str, value: &Value, parts: &mut Vec<FormPart>) {
    let text = match value {
        Value::Null => return,
        Value::Bool(flag) => if *flag { "1" } else { "0" }.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_field(&format!("{}[{}]", name, index), item, parts);
            }
            return;
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten_field(&format!("{}[{}]", name, key), item, parts);
            }
            return;
        }
    };

    parts.push(FormPart::Text {
        name: name.to_string(),
        value: text,
    });
}
