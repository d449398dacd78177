//
//  chatbridge
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The single place where requests leave the process. [`HttpClient`] sends a
//! [`PreparedRequest`] over a blocking `reqwest` client and hands the raw
//! status and body to the response interpreter.
//!
//! ## Features
//!
//! - `Authorization: Bearer <token>` and `Accept: application/json` on every request
//! - JSON or multipart bodies, as decided by [`RequestDescriptor::prepare`]
//! - Configured total and connect timeouts
//! - Wire-level logging on the `chatbridge::wire` target when `debug` is set
//!
//! ## Failure Model
//!
//! A failure before any response arrives (DNS, refused connection, timeout,
//! unreadable attachment) becomes an [`ApiError::Generic`] with status `0` and
//! the underlying diagnostic in its message. Nothing is retried here, and
//! redirects are not followed: a 3xx is classified like any other non-2xx.

use std::error::Error as StdError;
use std::time::Instant;

use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, Request};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::redirect::Policy;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::common::{ApiError, Result};
use crate::api::request::{
    Attachments, Fields, FormPart, Method, PreparedRequest, QueryParams, RequestBody,
    RequestDescriptor,
};
use crate::api::response::interpret;
use crate::config::ClientConfig;

const WIRE_TARGET: &str = "chatbridge::wire";

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Status and body of a response, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Authenticated, blocking HTTP client for the ChatBridge API.
///
/// Holds the token and configuration for its whole lifetime; neither is ever
/// mutated. Each call is one request/response round trip on the calling
/// thread.
///
/// # Example
///
/// ```rust,no_run
/// use chatbridge::api::transport::HttpClient;
/// use chatbridge::api::request::QueryParams;
/// use chatbridge::config::ClientConfig;
///
/// let http = HttpClient::new("my-token", ClientConfig::default())?;
/// let envelope = http.get("contacts", &QueryParams::new())?;
/// println!("{}", envelope["data"]);
/// # Ok::<(), chatbridge::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    token: String,
    config: ClientConfig,
}

impl HttpClient {
    /// Creates a client bound to `token` and `config`.
    ///
    /// # Errors
    ///
    /// Returns a generic error with status `0` if the underlying HTTP client
    /// cannot be initialised (for example, no TLS backend available).
    pub fn new(token: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("chatbridge/{}", crate::VERSION))
            .timeout(config.timeout_duration())
            .connect_timeout(config.connect_timeout_duration())
            .connection_verbose(config.debug)
            .redirect(Policy::none())
            .build()
            .map_err(|e| {
                ApiError::transport(format!("Failed to initialise HTTP client: {}", describe(&e)))
            })?;

        Ok(Self {
            http,
            token: token.into(),
            config,
        })
    }

    /// Returns the bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the configuration captured at construction.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a GET request with query parameters.
    pub fn get(&self, endpoint: &str, params: &QueryParams) -> Result<Value> {
        self.execute(&RequestDescriptor::get(endpoint).query(params.clone()))
    }

    /// Sends a POST request; non-empty `files` switches to multipart.
    pub fn post(&self, endpoint: &str, data: Fields, files: Attachments) -> Result<Value> {
        self.execute(&RequestDescriptor::post(endpoint).fields(data).files(files))
    }

    /// Sends a PUT request; non-empty `files` switches to a multipart POST
    /// carrying `_method=PUT`.
    pub fn put(&self, endpoint: &str, data: Fields, files: Attachments) -> Result<Value> {
        self.execute(&RequestDescriptor::put(endpoint).fields(data).files(files))
    }

    /// Sends a DELETE request.
    pub fn delete(&self, endpoint: &str) -> Result<Value> {
        self.execute(&RequestDescriptor::delete(endpoint))
    }

    /// Prepares, sends and interprets a request.
    ///
    /// Returns the decoded envelope for 2xx responses and the classified
    /// error otherwise.
    pub fn execute(&self, descriptor: &RequestDescriptor) -> Result<Value> {
        let prepared = descriptor.prepare(&self.config.base_url);
        let raw = self.send(&prepared)?;
        interpret(&raw.body, raw.status)
    }

    /// Sends a prepared request and returns its raw status and body.
    ///
    /// # Errors
    ///
    /// Only transport-level failures are errors here; HTTP error statuses are
    /// returned as-is for the interpreter to classify.
    pub fn send(&self, prepared: &PreparedRequest) -> Result<RawResponse> {
        let request = self.build_request(prepared)?;

        debug!(
            method = %prepared.method,
            url = %prepared.url,
            body = prepared.body.kind(),
            "Sending request"
        );
        if self.config.debug {
            info!(
                target: WIRE_TARGET,
                method = %prepared.method,
                url = %prepared.url,
                headers = ?redacted(request.headers()),
                "> request"
            );
        }

        let started = Instant::now();
        let response = self.http.execute(request).map_err(|e| {
            debug!(url = %prepared.url, error = %e, "Transport failure");
            ApiError::transport(format!("HTTP transport error: {}", describe(&e)))
        })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().map_err(|e| {
            ApiError::transport(format!("Failed to read response body: {}", describe(&e)))
        })?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        debug!(status, elapsed_ms, "Received response");
        if self.config.debug {
            info!(
                target: WIRE_TARGET,
                status,
                elapsed_ms,
                bytes = body.len(),
                headers = ?redacted(&headers),
                "< response"
            );
        }

        Ok(RawResponse { status, body })
    }

    fn build_request(&self, prepared: &PreparedRequest) -> Result<Request> {
        let mut builder = self
            .http
            .request(prepared.method.into(), &prepared.url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json");

        builder = match &prepared.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        builder.build().map_err(|e| {
            ApiError::transport(format!("Failed to build request: {}", describe(&e)))
        })
    }
}

/// Builds a multipart form, reading file parts from disk.
fn build_form(parts: &[FormPart]) -> Result<Form> {
    let mut form = Form::new();

    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
            FormPart::File { name, path } => form.file(name.clone(), path).map_err(|e| {
                ApiError::transport(format!(
                    "Unable to read attachment '{}' from {}: {}",
                    name,
                    path.display(),
                    e
                ))
            })?,
        };
    }

    Ok(form)
}

/// Renders headers for logging with the bearer token masked.
fn redacted(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if name == AUTHORIZATION {
                "Bearer ***".to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.to_string(), shown)
        })
        .collect()
}

/// Flattens an error and its sources into one diagnostic line.
fn describe(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn client() -> HttpClient {
        HttpClient::new("secret-token", ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_request_headers() {
        let prepared = RequestDescriptor::get("contacts").prepare("https://x/api");
        let request = client().build_request(&prepared).unwrap();

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(request.url().as_str(), "https://x/api/contacts");
        assert_eq!(
            request.headers().get(AUTHORIZATION),
            Some(&HeaderValue::from_static("Bearer secret-token"))
        );
        assert_eq!(
            request.headers().get(ACCEPT),
            Some(&HeaderValue::from_static("application/json"))
        );
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let prepared = RequestDescriptor::post("contacts")
            .field("name", serde_json::json!("Jane"))
            .prepare("https://x/api");
        let request = client().build_request(&prepared).unwrap();

        assert_eq!(
            request.headers().get(reqwest::header::CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"name":"Jane"}"#);
    }

    #[test]
    fn test_missing_attachment_is_transport_error() {
        let prepared = RequestDescriptor::post("templates")
            .attach("file", "/definitely/not/here.png")
            .prepare("https://x/api");
        let err = client().build_request(&prepared).unwrap_err();

        assert!(err.is_transport());
        assert!(err.message().contains("/definitely/not/here.png"));
    }

    #[test]
    fn test_redacted_masks_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer secret-token"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let shown = redacted(&headers);
        assert!(shown.contains(&("authorization".to_string(), "Bearer ***".to_string())));
        assert!(!format!("{:?}", shown).contains("secret-token"));
    }
}
