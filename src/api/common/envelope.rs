//
//  chatbridge
//  api/common/envelope.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response envelope helpers.
//!
//! ChatBridge wraps successful payloads under a `data` key:
//!
//! ```json
//! {"data": {"id": 7, "name": "Jane"}, "message": "Contact created"}
//! ```
//!
//! The response interpreter hands the whole envelope back untouched; the
//! resource wrappers use these helpers to unwrap it where that is the
//! documented behavior.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{ApiError, Result};

/// Takes the `data` member out of an envelope, or returns `fallback` when the
/// member is absent or `null`.
pub fn extract_data(mut envelope: Value, fallback: Value) -> Value {
    match envelope.get_mut("data") {
        Some(data) if !data.is_null() => data.take(),
        _ => fallback,
    }
}

/// Unwraps a list envelope; a missing `data` member yields `[]`.
pub fn data_list(envelope: Value) -> Value {
    extract_data(envelope, Value::Array(Vec::new()))
}

/// Unwraps a single-item envelope; a missing `data` member yields `{}`.
pub fn data_object(envelope: Value) -> Value {
    extract_data(envelope, Value::Object(Map::new()))
}

/// Decodes a JSON value into a typed model.
///
/// A shape mismatch is reported as a generic error with status `0`, the same
/// way a malformed response body is.
///
/// # Example
///
/// ```rust
/// use chatbridge::api::common::decode;
/// use chatbridge::api::resources::Contact;
///
/// let value = serde_json::json!({"id": 3, "name": "Jane", "phone": "6281234567890"});
/// let contact: Contact = decode(value)?;
/// assert_eq!(contact.phone.as_deref(), Some("6281234567890"));
/// # Ok::<(), chatbridge::ApiError>(())
/// ```
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::transport(format!("Unexpected response shape: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_data_present() {
        let envelope = json!({"data": {"id": 1}, "message": "ok"});
        assert_eq!(data_object(envelope), json!({"id": 1}));
    }

    #[test]
    fn test_extract_data_missing_or_null() {
        assert_eq!(data_list(json!({"message": "ok"})), json!([]));
        assert_eq!(data_object(json!({"data": null})), json!({}));
        assert_eq!(data_list(json!([1, 2])), json!([]));
    }

    #[test]
    fn test_decode_shape_mismatch() {
        let err = decode::<Vec<String>>(json!({"id": 1})).unwrap_err();
        assert_eq!(err.status_code(), 0);
        assert!(err.message().starts_with("Unexpected response shape"));
    }
}
