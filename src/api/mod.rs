//
//  chatbridge
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module implements the ChatBridge REST API client.
//!
//! ## Architecture
//!
//! A call flows through the layers in this order:
//!
//! 1. [`client`]: facade handing out resource wrappers
//! 2. [`resources`]: per-resource CRUD and messaging wrappers
//! 3. [`request`]: URL building and JSON/multipart encoding
//! 4. [`transport`]: authenticated blocking HTTP round trip
//! 5. [`response`]: JSON decoding and error classification
//!
//! The decoded envelope or the typed error travels back up unchanged.
//!
//! ## Error Handling
//!
//! Failures are returned as [`ApiError`] variants:
//!
//! - `Authentication`: 401 Unauthorized
//! - `NotFound`: 404 Not Found
//! - `Validation`: 422 Unprocessable Entity, with field errors
//! - `RateLimit`: 429 Too Many Requests, with retry-after seconds
//! - `Generic`: any other status, or status `0` for transport and decoding failures
//!
//! The client never retries; rate-limit and server errors carry the signals a
//! caller needs to do so.

/// Facade holding token, configuration and transport.
pub mod client;

/// Error taxonomy and envelope helpers.
pub mod common;

/// Request descriptors, URL building and body encoding.
pub mod request;

/// Resource wrappers and typed models.
pub mod resources;

/// Response interpretation and error classification.
pub mod response;

/// Blocking HTTP transport.
pub mod transport;

pub use client::ChatBridgeClient;
pub use common::{ApiError, ErrorKind};
