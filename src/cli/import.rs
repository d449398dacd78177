//
//  chatbridge
//  cli/import.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bulk contact import from CSV
//!
//! Reads a CSV file with the header `Name,Phone,Email,Company,Position` and
//! creates one contact per row. Columns are read by position; `Company` and
//! `Position` are stored as custom fields.
//!
//! ## Row Handling
//!
//! | Outcome | Condition |
//! |---------|-----------|
//! | skipped | empty phone |
//! | created | contact created |
//! | duplicate | validation error mentioning "already exists" |
//! | failed | any other error |
//!
//! Rate-limited and 5xx rows are retried up to `max_retries` times from the
//! client configuration: a rate limit waits for the advertised retry-after,
//! a server error waits `retry_delay`. Other errors are final. Requests are
//! spaced by `--delay-ms`.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::GlobalOptions;
use crate::api::common::ApiError;
use crate::api::request::Fields;
use crate::api::resources::ContactResource;
use crate::config::ClientConfig;
use crate::ChatBridgeClient;

const DUPLICATE_MARKER: &str = "already exists";

/// Bulk import contacts from a CSV file
#[derive(Args, Debug)]
pub struct ImportCommand {
    /// CSV file with columns Name,Phone,Email,Company,Position
    pub file: PathBuf,

    /// Delay between requests in milliseconds
    #[arg(long, default_value_t = 100)]
    pub delay_ms: u64,

    /// Create an audience from the imported contacts, optionally named
    #[arg(long, value_name = "NAME", num_args = 0..=1, default_missing_value = "")]
    pub audience: Option<String>,

    /// Tag for the created audience
    #[arg(long, default_value = "bulk-import")]
    pub tag: String,
}

/// One CSV row that failed to import.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailedRow {
    pub row: usize,
    pub phone: String,
    pub error: String,
}

/// Outcome of an import run.
#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub created: Vec<Value>,
    pub duplicates: Vec<String>,
    pub failed: Vec<FailedRow>,
    pub skipped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<Value>,
}

enum RowOutcome {
    Created(Value),
    Duplicate,
    Failed(String),
}

impl ImportCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();

        let rows = read_rows(&self.file)?;
        debug!(file = %self.file.display(), rows = rows.len(), "Read contact rows");

        let pb = if output.is_json() {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(rows.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )?
                    .progress_chars("#>-"),
            );
            pb
        };

        let contacts = client.contacts();
        let retry = RetryPolicy::from_config(client.config());
        let delay = Duration::from_millis(self.delay_ms);
        let mut report = ImportReport::default();

        for (index, record) in rows.iter().enumerate() {
            // Row 1 is the header.
            let row = index + 2;
            pb.inc(1);

            let Some(fields) = contact_fields(record) else {
                report.skipped += 1;
                pb.println(format!("  Row {}: skipped (empty phone)", row));
                continue;
            };
            let phone = record.phone.trim().to_string();
            pb.set_message(phone.clone());

            match create_contact(&contacts, fields, &retry) {
                RowOutcome::Created(contact) => {
                    pb.println(format!("  Row {}: {} {}", row, style("✓").green(), phone));
                    report.created.push(contact);
                }
                RowOutcome::Duplicate => {
                    let mark = style("⚠").yellow();
                    pb.println(format!("  Row {}: {} duplicate {}", row, mark, phone));
                    report.duplicates.push(phone);
                }
                RowOutcome::Failed(error) => {
                    pb.println(format!("  Row {}: {} {}", row, style("✗").red(), error));
                    report.failed.push(FailedRow { row, phone, error });
                }
            }

            if index + 1 < rows.len() {
                thread::sleep(delay);
            }
        }
        pb.finish_and_clear();

        if let Some(name) = &self.audience {
            if report.created.is_empty() {
                output.write_warning("No contacts imported; skipping audience creation");
            } else {
                report.audience = Some(self.create_audience(&client, name, &report.created)?);
            }
        }

        if output.is_json() {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!();
        println!("{}", style("Import complete").bold());
        println!("Created:    {}", report.created.len());
        println!("Duplicates: {}", report.duplicates.len());
        println!("Failed:     {}", report.failed.len());
        println!("Skipped:    {}", report.skipped);
        if let Some(audience) = &report.audience {
            output.write_success(&format!(
                "Audience '{}' created (ID {})",
                audience.get("name").and_then(Value::as_str).unwrap_or("-"),
                audience
                    .get("id")
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ));
        }

        Ok(())
    }

    fn create_audience(
        &self,
        client: &ChatBridgeClient,
        name: &str,
        created: &[Value],
    ) -> Result<Value> {
        let name = if name.trim().is_empty() {
            format!("Bulk Import {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
        } else {
            name.to_string()
        };

        let members: Vec<Value> = created
            .iter()
            .map(|c| json!({"phone": c.get("phone"), "name": c.get("name")}))
            .collect();

        let mut fields = Fields::new();
        fields.insert("name".to_string(), json!(name));
        fields.insert("description".to_string(), json!("Contacts imported via bulk import"));
        fields.insert("tag".to_string(), json!(self.tag));
        fields.insert("contacts".to_string(), Value::Array(members));

        Ok(client.audiences().create(fields)?)
    }
}

/// A contact row read from the CSV file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactRow {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub position: String,
}

/// Reads contact rows from a CSV file, skipping the header.
pub fn read_rows(path: &Path) -> Result<Vec<ContactRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Failed to read {}", path.display()))?;
        let column = |i: usize| record.get(i).unwrap_or_default().to_string();
        rows.push(ContactRow {
            name: column(0),
            phone: column(1),
            email: column(2),
            company: column(3),
            position: column(4),
        });
    }

    Ok(rows)
}

/// Builds contact fields from a row, or `None` when the phone is empty.
pub fn contact_fields(row: &ContactRow) -> Option<Fields> {
    if row.phone.trim().is_empty() {
        return None;
    }

    let mut fields = Fields::new();
    fields.insert("name".to_string(), json!(row.name));
    fields.insert("phone".to_string(), json!(row.phone.trim()));
    fields.insert("email".to_string(), json!(row.email));
    fields.insert(
        "custom_fields".to_string(),
        json!({"company": row.company, "position": row.position}),
    );
    Some(fields)
}

/// Retry budget for one row, taken from the client configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            retry_delay: config.retry_delay_duration(),
        }
    }

    /// Returns the pause before retrying after `error`, or `None` if the
    /// error is final.
    pub fn backoff(&self, error: &ApiError) -> Option<Duration> {
        match error {
            ApiError::RateLimit { retry_after, .. } => Some(Duration::from_secs(*retry_after)),
            e if e.is_server_error() => Some(self.retry_delay),
            _ => None,
        }
    }

    /// Runs `op`, retrying retryable errors up to `max_retries` times.
    ///
    /// `sleep` is called with each backoff before the next attempt.
    pub fn run<T>(
        &self,
        mut op: impl FnMut() -> std::result::Result<T, ApiError>,
        mut sleep: impl FnMut(Duration),
    ) -> std::result::Result<T, ApiError> {
        let mut attempt = 0;
        loop {
            match op() {
                Err(error) if attempt < self.max_retries => match self.backoff(&error) {
                    Some(wait) => {
                        attempt += 1;
                        warn!(
                            attempt,
                            wait_ms = wait.as_millis() as u64,
                            error = %error,
                            "Retrying request"
                        );
                        sleep(wait);
                    }
                    None => return Err(error),
                },
                result => return result,
            }
        }
    }
}

fn create_contact(
    contacts: &ContactResource<'_>,
    fields: Fields,
    retry: &RetryPolicy,
) -> RowOutcome {
    let result = retry.run(|| contacts.create(fields.clone()), thread::sleep);

    match result {
        Ok(contact) => RowOutcome::Created(contact),
        Err(e) if is_duplicate(&e) => RowOutcome::Duplicate,
        Err(e) => RowOutcome::Failed(e.to_string()),
    }
}

fn is_duplicate(error: &ApiError) -> bool {
    matches!(error, ApiError::Validation { message, .. } if message.contains(DUPLICATE_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Write;

    #[test]
    fn test_read_rows_by_position() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Name,Phone,Email,Company,Position").unwrap();
        writeln!(file, "John Doe,6281234567890,john@example.com,PT Example,Manager").unwrap();
        writeln!(file, "No Phone,,nobody@example.com").unwrap();

        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].company, "PT Example");
        assert_eq!(rows[1].phone, "");
        assert_eq!(rows[1].position, "");
    }

    #[test]
    fn test_contact_fields() {
        let row = ContactRow {
            name: "Jane".into(),
            phone: "6287654321098".into(),
            company: "PT Demo".into(),
            ..Default::default()
        };
        let fields = contact_fields(&row).unwrap();
        assert_eq!(fields["phone"], json!("6287654321098"));
        assert_eq!(fields["custom_fields"]["company"], json!("PT Demo"));

        assert!(contact_fields(&ContactRow::default()).is_none());
    }

    #[test]
    fn test_duplicate_detection() {
        let duplicate = ApiError::validation(
            "The phone has already exists in your contacts",
            BTreeMap::new(),
        );
        assert!(is_duplicate(&duplicate));
        let required = ApiError::validation("The phone field is required.", BTreeMap::new());
        assert!(!is_duplicate(&required));
        assert!(!is_duplicate(&ApiError::generic("already exists", 500)));
    }

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            retry_delay: Duration::from_millis(250),
        }
    }

    #[test]
    fn test_retry_policy_from_config() {
        let overrides = json!({"max_retries": 4, "retry_delay": 50});
        let config = ClientConfig::from_overrides(overrides).unwrap();
        let retry = RetryPolicy::from_config(&config);
        assert_eq!(retry.max_retries, 4);
        assert_eq!(retry.retry_delay, Duration::from_millis(50));
    }

    #[test]
    fn test_retry_recovers_from_server_error() {
        let mut attempts = 0;
        let mut waits = Vec::new();
        let result = policy(2).run(
            || {
                attempts += 1;
                if attempts == 1 {
                    Err(ApiError::generic("Service Unavailable", 503))
                } else {
                    Ok("created")
                }
            },
            |wait| waits.push(wait),
        );

        assert_eq!(result, Ok("created"));
        assert_eq!(attempts, 2);
        assert_eq!(waits, vec![Duration::from_millis(250)]);
    }

    #[test]
    fn test_retry_waits_for_rate_limit_then_gives_up() {
        let mut attempts = 0;
        let mut waits = Vec::new();
        let result: std::result::Result<(), ApiError> = policy(2).run(
            || {
                attempts += 1;
                Err(ApiError::rate_limit(None, Some(3)))
            },
            |wait| waits.push(wait),
        );

        assert_eq!(result.unwrap_err().retry_after(), Some(3));
        assert_eq!(attempts, 3);
        assert_eq!(waits, vec![Duration::from_secs(3); 2]);
    }

    #[test]
    fn test_final_errors_are_not_retried() {
        for error in [
            ApiError::validation("The phone field is required.", BTreeMap::new()),
            ApiError::not_found(None),
            ApiError::transport("connection refused"),
        ] {
            let mut attempts = 0;
            let result: std::result::Result<(), ApiError> = policy(5).run(
                || {
                    attempts += 1;
                    Err(error.clone())
                },
                |_| panic!("final errors must not wait"),
            );
            assert_eq!(result.unwrap_err(), error);
            assert_eq!(attempts, 1);
        }
    }

    #[test]
    fn test_zero_retries_returns_first_error() {
        let mut attempts = 0;
        let result: std::result::Result<(), ApiError> = policy(0).run(
            || {
                attempts += 1;
                Err(ApiError::generic("Bad Gateway", 502))
            },
            |_| {},
        );
        assert_eq!(result.unwrap_err().status_code(), 502);
        assert_eq!(attempts, 1);
    }
}
