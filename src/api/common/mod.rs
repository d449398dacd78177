//
//  chatbridge
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the ChatBridge SDK
//!
//! This module provides the error taxonomy shared by every layer of the SDK,
//! plus the envelope helpers used by the resource wrappers.
//!
//! # Overview
//!
//! - [`ApiError`] - Closed error type with one variant per failure kind
//! - [`ErrorKind`] - Field-less discriminant of [`ApiError`]
//! - [`Result`] - Convenience alias used across the SDK surface
//! - Envelope helpers (re-exported from the [`envelope`] submodule)
//!
//! # Example
//!
//! ```rust
//! use chatbridge::api::common::{ApiError, ErrorKind};
//!
//! fn describe(err: &ApiError) -> String {
//!     match err {
//!         ApiError::Authentication { .. } => "check your API token".to_string(),
//!         ApiError::NotFound { .. } => "no such resource".to_string(),
//!         ApiError::Validation { errors, .. } => format!("{} invalid field(s)", errors.len()),
//!         ApiError::RateLimit { retry_after, .. } => format!("retry in {}s", retry_after),
//!         ApiError::Generic { message, .. } => message.clone(),
//!     }
//! }
//!
//! let err = ApiError::rate_limit(None, None);
//! assert_eq!(err.kind(), ErrorKind::RateLimit);
//! assert_eq!(describe(&err), "retry in 60s");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

pub mod envelope;

pub use envelope::*;

/// Default message for [`ApiError::Authentication`].
pub const DEFAULT_AUTHENTICATION_MESSAGE: &str = "Authentication failed";

/// Default message for [`ApiError::NotFound`].
pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "Resource not found";

/// Default message for [`ApiError::RateLimit`].
pub const DEFAULT_RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded";

/// Seconds to wait when a 429 response does not carry `retry_after`.
pub const DEFAULT_RETRY_AFTER: u64 = 60;

/// Field-level validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Unified error type for all ChatBridge API operations.
///
/// Every failed call produces exactly one `ApiError`. HTTP-derived errors carry
/// the response status; transport and decoding failures are [`ApiError::Generic`]
/// with a status of `0`.
///
/// # Variants
///
/// | Variant | HTTP Status | Extra payload |
/// |---------|-------------|---------------|
/// | `Authentication` | 401 | - |
/// | `NotFound` | 404 | - |
/// | `Validation` | 422 | field errors |
/// | `RateLimit` | 429 | retry-after seconds |
/// | `Generic` | anything else, or 0 | - |
///
/// # Notes
///
/// - `Display` renders the message only, so `err.to_string() == err.message()`
/// - The variants are constructed by the response interpreter; the helper
///   constructors exist for callers and tests that need the documented defaults
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The API token was rejected.
    #[error("{message}")]
    Authentication {
        /// Message reported by the server.
        message: String,
        /// HTTP status code (401 unless constructed otherwise).
        status: u16,
    },

    /// The requested resource does not exist.
    #[error("{message}")]
    NotFound {
        /// Message reported by the server.
        message: String,
        /// HTTP status code (404 unless constructed otherwise).
        status: u16,
    },

    /// The request payload failed server-side validation.
    ///
    /// `errors` maps each rejected field to its list of messages.
    #[error("{message}")]
    Validation {
        /// Message reported by the server.
        message: String,
        /// HTTP status code (422 unless constructed otherwise).
        status: u16,
        /// Per-field validation messages.
        errors: FieldErrors,
    },

    /// Too many requests; the caller should wait `retry_after` seconds.
    #[error("{message}")]
    RateLimit {
        /// Message reported by the server.
        message: String,
        /// HTTP status code (429 unless constructed otherwise).
        status: u16,
        /// Seconds to wait before resubmitting.
        retry_after: u64,
    },

    /// Any other failure.
    ///
    /// Covers unmapped HTTP statuses as well as transport failures and
    /// malformed response bodies, which use a status of `0`.
    #[error("{message}")]
    Generic {
        /// Diagnostic or server-reported message.
        message: String,
        /// HTTP status code, or `0` when no response was classified.
        status: u16,
    },
}

/// The kind of an [`ApiError`], without its payload.
///
/// Useful for logging and for comparing errors without matching on fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authentication,
    NotFound,
    Validation,
    RateLimit,
    Generic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Authentication => "authentication",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Validation => "validation",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Generic => "generic",
        };
        f.write_str(name)
    }
}

impl ApiError {
    /// Builds an authentication error (401), defaulting the message to
    /// `"Authentication failed"`.
    pub fn authentication(message: Option<String>) -> Self {
        Self::Authentication {
            message: message.unwrap_or_else(|| DEFAULT_AUTHENTICATION_MESSAGE.to_string()),
            status: 401,
        }
    }

    /// Builds a not-found error (404), defaulting the message to
    /// `"Resource not found"`.
    pub fn not_found(message: Option<String>) -> Self {
        Self::NotFound {
            message: message.unwrap_or_else(|| DEFAULT_NOT_FOUND_MESSAGE.to_string()),
            status: 404,
        }
    }

    /// Builds a validation error (422) carrying per-field messages.
    pub fn validation(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self::Validation {
            message: message.into(),
            status: 422,
            errors,
        }
    }

    /// Builds a rate-limit error (429).
    ///
    /// The message defaults to `"Rate limit exceeded"` and `retry_after` to 60.
    pub fn rate_limit(message: Option<String>, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            message: message.unwrap_or_else(|| DEFAULT_RATE_LIMIT_MESSAGE.to_string()),
            status: 429,
            retry_after: retry_after.unwrap_or(DEFAULT_RETRY_AFTER),
        }
    }

    /// Builds a generic error with an explicit status.
    pub fn generic(message: impl Into<String>, status: u16) -> Self {
        Self::Generic {
            message: message.into(),
            status,
        }
    }

    /// Builds a generic error for failures that happened before any HTTP
    /// status could be classified (status `0`).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::generic(message, 0)
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Authentication { .. } => ErrorKind::Authentication,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Validation { .. } => ErrorKind::Validation,
            ApiError::RateLimit { .. } => ErrorKind::RateLimit,
            ApiError::Generic { .. } => ErrorKind::Generic,
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Authentication { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Validation { message, .. }
            | ApiError::RateLimit { message, .. }
            | ApiError::Generic { message, .. } => message,
        }
    }

    /// Returns the HTTP status code, or `0` if the error is not HTTP-derived.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Authentication { status, .. }
            | ApiError::NotFound { status, .. }
            | ApiError::Validation { status, .. }
            | ApiError::RateLimit { status, .. }
            | ApiError::Generic { status, .. } => *status,
        }
    }

    /// Returns the field errors of a validation error.
    pub fn validation_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Returns the retry-after hint of a rate-limit error, in seconds.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            ApiError::RateLimit { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Returns `true` if no HTTP response was classified (status `0`).
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Generic { status: 0, .. })
    }

    /// Returns `true` for 5xx responses.
    ///
    /// Callers commonly retry these after a short pause.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }
}

/// A convenience alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_defaults() {
        let auth = ApiError::authentication(None);
        assert_eq!(auth.message(), "Authentication failed");
        assert_eq!(auth.status_code(), 401);

        let missing = ApiError::not_found(None);
        assert_eq!(missing.message(), "Resource not found");
        assert_eq!(missing.status_code(), 404);

        let limited = ApiError::rate_limit(None, None);
        assert_eq!(limited.message(), "Rate limit exceeded");
        assert_eq!(limited.status_code(), 429);
        assert_eq!(limited.retry_after(), Some(60));

        let invalid = ApiError::validation("failed", FieldErrors::new());
        assert_eq!(invalid.status_code(), 422);
        assert_eq!(invalid.validation_errors().map(|e| e.len()), Some(0));
    }

    #[test]
    fn test_display_is_message() {
        let err = ApiError::generic("Server exploded", 500);
        assert_eq!(err.to_string(), "Server exploded");
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert!(err.is_server_error());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_has_zero_status() {
        let err = ApiError::transport("connection refused");
        assert_eq!(err.status_code(), 0);
        assert!(err.is_transport());
        assert_eq!(err.retry_after(), None);
        assert!(err.validation_errors().is_none());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::RateLimit.to_string(), "rate_limit");
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
    }
}
