//
//  chatbridge
//  cli/fields.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Parsing of `key=value` command-line arguments into request fields.
//!
//! Values are read as JSON when they parse as JSON (`42`, `true`, `[1,2]`),
//! otherwise as plain strings. Dotted keys build nested objects, so
//! `custom_fields.company=Acme` becomes `{"custom_fields": {"company": "Acme"}}`.
//!
//! Phone number keys (`phone`, `to`) are always strings, so
//! `phone=6281234567890` is not sent as a number.

use anyhow::{bail, Result};
use serde_json::{Map, Value};

use crate::api::request::{Fields, QueryParams};

/// Keys whose values are phone numbers and never parsed as JSON.
const PHONE_KEYS: [&str; 2] = ["phone", "to"];

/// Splits `key=value` at the first `=`.
fn split_pair(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => bail!("Invalid field '{}'. Expected key=value", pair),
    }
}

/// Parses a value as JSON, falling back to a string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parses a value for `key`; phone number keys keep the raw string.
pub fn parse_field_value(key: &str, raw: &str) -> Value {
    let leaf = key.rsplit('.').next().unwrap_or(key);
    if PHONE_KEYS.contains(&leaf) {
        Value::String(raw.trim_matches('"').to_string())
    } else {
        parse_value(raw)
    }
}

/// Parses `key=value` pairs into request body fields.
///
/// # Errors
///
/// Returns an error for a pair without `=`, or when a dotted key would nest
/// under a key that already holds a non-object value.
pub fn parse_fields(pairs: &[String]) -> Result<Fields> {
    let mut fields = Map::new();

    for pair in pairs {
        let (key, raw) = split_pair(pair)?;
        insert_path(&mut fields, key, parse_field_value(key, raw))?;
    }

    Ok(fields)
}

/// Parses `key=value` pairs into query parameters. Values stay strings.
pub fn parse_query(pairs: &[String]) -> Result<QueryParams> {
    let mut params = QueryParams::new();

    for pair in pairs {
        let (key, value) = split_pair(pair)?;
        params.insert(key.to_string(), value.to_string());
    }

    Ok(params)
}

fn insert_path(target: &mut Map<String, Value>, key: &str, value: Value) -> Result<()> {
    match key.split_once('.') {
        None => {
            target.insert(key.to_string(), value);
        }
        Some((head, rest)) => {
            let child = target
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match child {
                Value::Object(map) => insert_path(map, rest, value)?,
                _ => bail!("Field '{}' is not an object and cannot hold '{}'", head, rest),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("[1,2]"), json!([1, 2]));
        assert_eq!(parse_value("John Doe"), json!("John Doe"));
        assert_eq!(parse_value("\"6281234567890\""), json!("6281234567890"));
    }

    #[test]
    fn test_parse_fields_nested() {
        let fields = parse_fields(&args(&[
            "name=John Doe",
            "custom_fields.company=PT Example",
            "custom_fields.position=Manager",
            "note=a=b",
        ]))
        .unwrap();

        assert_eq!(
            Value::Object(fields),
            json!({
                "name": "John Doe",
                "custom_fields": {"company": "PT Example", "position": "Manager"},
                "note": "a=b"
            })
        );
    }

    #[test]
    fn test_phone_numbers_stay_strings() {
        let fields = parse_fields(&args(&[
            "phone=6281234567890",
            "to=\"6287654321098\"",
            "contact.phone=628111",
            "age=42",
        ]))
        .unwrap();

        assert_eq!(
            Value::Object(fields),
            json!({
                "phone": "6281234567890",
                "to": "6287654321098",
                "contact": {"phone": "628111"},
                "age": 42
            })
        );
    }

    #[test]
    fn test_parse_fields_errors() {
        assert!(parse_fields(&args(&["missing"])).is_err());
        assert!(parse_fields(&args(&["=value"])).is_err());
        assert!(parse_fields(&args(&["tag=x", "tag.sub=y"])).is_err());
    }

    #[test]
    fn test_parse_query_keeps_strings() {
        let params = parse_query(&args(&["page=2", "status=ready"])).unwrap();
        assert_eq!(params.get("page").map(String::as_str), Some("2"));
        assert_eq!(params.get("status").map(String::as_str), Some("ready"));
    }
}
