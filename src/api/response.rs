//
//  chatbridge
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Interpretation
//!
//! Turns a raw status code and body into either the decoded JSON envelope or
//! exactly one [`ApiError`].
//!
//! ChatBridge reports errors in the format:
//!
//! ```json
//! {"message": "The given data was invalid.", "errors": {"phone": ["required"]}}
//! ```
//!
//! Rate-limited responses may add `"retry_after": 30`.
//!
//! ## Classification
//!
//! | Status | Error |
//! |--------|-------|
//! | 2xx | none, envelope returned unchanged |
//! | 401 | [`ApiError::Authentication`] |
//! | 404 | [`ApiError::NotFound`] |
//! | 422 | [`ApiError::Validation`] |
//! | 429 | [`ApiError::RateLimit`] |
//! | other | [`ApiError::Generic`] |
//!
//! Classification looks at the status code and the body fields only. The
//! message text is passed through as-is and never inspected.

use serde_json::Value;

use crate::api::common::{ApiError, FieldErrors, Result, DEFAULT_RETRY_AFTER};

/// Message used when an error body has no `message` field.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Interprets a raw HTTP response.
///
/// # Parameters
///
/// * `raw_body` - The response body as received
/// * `status` - The HTTP status code
///
/// # Returns
///
/// The parsed JSON body for 2xx responses, without unwrapping `data`.
///
/// # Errors
///
/// - A body that is not valid JSON yields [`ApiError::Generic`] with status `0`
///   and the raw body in the message, whatever the status code
/// - Any non-2xx status yields the error selected by the table above, with the
///   status preserved
///
/// # Example
///
/// ```rust
/// use chatbridge::api::response::interpret;
/// use chatbridge::ApiError;
///
/// let body = r#"{"message":"failed","errors":{"phone":["required"]}}"#;
/// match interpret(body, 422) {
///     Err(ApiError::Validation { errors, .. }) => {
///         assert_eq!(errors["phone"], vec!["required".to_string()]);
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
pub fn interpret(raw_body: &str, status: u16) -> Result<Value> {
    let data: Value = serde_json::from_str(raw_body)
        .map_err(|_| ApiError::transport(format!("Invalid JSON response: {}", raw_body)))?;

    if (200..300).contains(&status) {
        return Ok(data);
    }

    Err(classify(status, &data))
}

/// Selects the error for a non-2xx status and its decoded body.
pub fn classify(status: u16, body: &Value) -> ApiError {
    let message = error_message(body);

    match status {
        401 => ApiError::Authentication { message, status },
        404 => ApiError::NotFound { message, status },
        422 => ApiError::Validation {
            message,
            status,
            errors: field_errors(body),
        },
        429 => ApiError::RateLimit {
            message,
            status,
            retry_after: retry_after(body),
        },
        _ => ApiError::Generic { message, status },
    }
}

fn error_message(body: &Value) -> String {
    match body.get("message") {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Null) | None => UNKNOWN_ERROR_MESSAGE.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Reads the `errors` member as field -> messages.
///
/// A bare string message is treated as a one-element list; entries of any
/// other shape are skipped.
fn field_errors(body: &Value) -> FieldErrors {
    let Some(errors) = body.get("errors").and_then(Value::as_object) else {
        return FieldErrors::new();
    };

    errors
        .iter()
        .filter_map(|(field, messages)| {
            let messages = match messages {
                Value::Array(items) => items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
                Value::String(message) => vec![message.clone()],
                _ => return None,
            };
            Some((field.clone(), messages))
        })
        .collect()
}

/// Reads `retry_after` as whole seconds, accepting numeric strings too.
fn retry_after(body: &Value) -> u64 {
    match body.get("retry_after") {
        Some(Value::Number(seconds)) => seconds
            .as_u64()
            .or_else(|| seconds.as_f64().filter(|s| *s >= 0.0).map(|s| s as u64))
            .unwrap_or(DEFAULT_RETRY_AFTER),
        Some(Value::String(seconds)) => seconds.trim().parse().unwrap_or(DEFAULT_RETRY_AFTER),
        _ => DEFAULT_RETRY_AFTER,
    }
}
