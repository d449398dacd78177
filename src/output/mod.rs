//
//  chatbridge
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the `chatbridge` command-line tool. Two formats are
//! supported:
//!
//! - **Table format**: Human-readable tables for interactive terminal use
//! - **JSON format**: Pretty-printed JSON for scripting and automation
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: The available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TableOutput`]: Detail view of a single record
//! - [`TableRow`]: One row of a list table
//!
//! ## Example
//!
//! ```rust,ignore
//! use chatbridge::output::OutputWriter;
//!
//! let writer = OutputWriter::json();
//! writer.write(&contact)?;
//! writer.write_success("Contact created");
//! ```

mod records;
mod table;

pub use table::*;

use serde::Serialize;
use serde_json::Value;

/// Represents the available output formats for CLI output.
///
/// # Variants
///
/// * `Table` - Human-readable tabular format, best for interactive sessions
/// * `Json` - Machine-readable JSON, ideal for piping to other tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table format with optional color support.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// A unified output writer that handles both output formats.
///
/// Data goes to stdout. Errors and warnings go to stderr so that JSON output
/// stays machine-readable.
///
/// # Notes
///
/// Color output is detected from the terminal. Colors are disabled when output
/// is piped or `NO_COLOR` is set.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a new output writer with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Creates a writer for JSON output.
    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    /// Creates a writer for table output.
    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Writes a single record using the configured output format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => print_json(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list of records.
    ///
    /// For JSON the list is serialized as one array. For tables all records
    /// share one table, or a short notice is printed when the list is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => print_json(&values)?,
            OutputFormat::Table => {
                if values.is_empty() {
                    self.write_info("No results found.");
                    return Ok(());
                }
                let mut builder = TableBuilder::new().color(self.color).headers(T::headers());
                for value in values {
                    builder = builder.row(value.row(self.color));
                }
                builder.print();
            }
        }
        Ok(())
    }

    /// Writes a raw JSON payload.
    ///
    /// Used for responses without a typed model, such as delete envelopes.
    /// Table output renders top-level object members as fields.
    pub fn write_value(&self, value: &Value) -> anyhow::Result<()> {
        match (self.format, value) {
            (OutputFormat::Table, Value::Object(members)) => {
                for (key, member) in members {
                    print_field(key, &display_value(member), self.color);
                }
            }
            _ => print_json(value)?,
        }
        Ok(())
    }

    /// Writes an error message to stderr, prefixed with `error:`.
    pub fn write_error(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    /// Writes a warning message to stderr, prefixed with `warning:`.
    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Writes an informational message.
    ///
    /// Goes to stderr in JSON mode so stdout only carries the payload.
    pub fn write_info(&self, msg: &str) {
        if self.is_json() {
            eprintln!("{}", msg);
        } else {
            println!("{}", msg);
        }
    }

    /// Writes a success message prefixed with a checkmark.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        let mark = if self.color {
            style("✓").green().bold().to_string()
        } else {
            "✓".to_string()
        };
        if self.is_json() {
            eprintln!("{} {}", mark, msg);
        } else {
            println!("{} {}", mark, msg);
        }
    }
}

/// A record that can render a detail view of itself.
///
/// # Example
///
/// ```rust,ignore
/// use chatbridge::output::{print_field, print_header, TableOutput};
///
/// impl TableOutput for Audience {
///     fn print_table(&self, color: bool) {
///         print_header("Audience");
///         print_field("Name", self.name.as_deref().unwrap_or("-"), color);
///     }
/// }
/// ```
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// A record that can render itself as one row of a list table.
pub trait TableRow {
    /// Column headers, in row order.
    fn headers() -> Vec<&'static str>;

    /// Cell values, one per header.
    fn row(&self, color: bool) -> Vec<String>;
}

/// Prints a bold header with a dashed underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a key-value pair; the key is dimmed when color is enabled.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

/// Renders a JSON value for a table cell: strings unquoted, null as `-`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_format_is_table() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
        assert!(OutputWriter::json().is_json());
        assert!(!OutputWriter::table().is_json());
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("ok")), "ok");
        assert_eq!(display_value(&json!(null)), "-");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
