//! Output formatters for CLI commands.
//!
//! Provides consistent formatting across all CLI commands for JSON, text, and pretty output modes.

use crate::cli::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if the data cannot be converted to JSON.
///
/// # Examples
///
/// ```
/// use ft_cli::cli::OutputFormat;
/// use ft_cli::formatters::format_output;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     count: usize,
/// }
///
/// let output = format_output(&Summary { count: 3 }, OutputFormat::Json)?;
/// assert!(output.contains("\"count\": 3"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(data)?;
        Ok(json)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize};
    use serde_json::Value;

    /// Format data as plain `key: value` lines.
    ///
    /// Nested objects are indented, array items are separated by a blank
    /// line, and strings are written without quotes. No colors.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        write_value(&value, 0, &mut out);
        Ok(out.trim_end().to_string())
    }

    fn write_value(value: &Value, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(obj) => {
                for (key, val) in obj {
                    if is_nested(val) {
                        out.push_str(&format!("{pad}{key}:\n"));
                        write_value(val, indent + 1, out);
                    } else {
                        out.push_str(&format!("{pad}{key}: {}\n", scalar(val, &pad)));
                    }
                }
            }
            Value::Array(arr) => {
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 && is_nested(item) {
                        out.push('\n');
                    }
                    if is_nested(item) {
                        write_value(item, indent, out);
                    } else {
                        out.push_str(&format!("{pad}- {}\n", scalar(item, &pad)));
                    }
                }
            }
            other => out.push_str(&format!("{pad}{}\n", scalar(other, &pad))),
        }
    }

    fn is_nested(value: &Value) -> bool {
        match value {
            Value::Object(obj) => !obj.is_empty(),
            Value::Array(arr) => !arr.is_empty(),
            _ => false,
        }
    }

    fn scalar(value: &Value, pad: &str) -> String {
        match value {
            Value::String(s) if s.contains('\n') => {
                let body = s.trim_end_matches('\n').replace('\n', &format!("\n{pad}  "));
                format!("|\n{pad}  {body}")
            }
            Value::String(s) => s.clone(),
            Value::Array(_) => "[]".to_string(),
            Value::Object(_) => "{}".to_string(),
            other => other.to_string(),
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};

    /// Format data as colorized, human-readable output.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(format_value(&value, 0))
    }

    /// Recursively format a JSON value with colors and indentation.
    fn format_value(value: &serde_json::Value, indent: usize) -> String {
        use serde_json::Value;

        let indent_str = "  ".repeat(indent);
        let next_indent_str = "  ".repeat(indent + 1);

        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => status_colored(s),
            Value::Array(arr) => {
                if arr.is_empty() {
                    return "[]".to_string();
                }

                let mut result = "[\n".to_string();
                for (i, item) in arr.iter().enumerate() {
                    result.push_str(&next_indent_str);
                    result.push_str(&format_value(item, indent + 1));
                    if i < arr.len() - 1 {
                        result.push(',');
                    }
                    result.push('\n');
                }
                result.push_str(&indent_str);
                result.push(']');
                result
            }
            Value::Object(obj) => {
                if obj.is_empty() {
                    return "{}".to_string();
                }

                let mut result = "{\n".to_string();
                for (i, (key, val)) in obj.iter().enumerate() {
                    result.push_str(&next_indent_str);
                    result.push_str(&format!("{}: ", key.blue().bold()));
                    result.push_str(&format_value(val, indent + 1));
                    if i < obj.len() - 1 {
                        result.push(',');
                    }
                    result.push('\n');
                }
                result.push_str(&indent_str);
                result.push('}');
                result
            }
        }
    }

    /// Highlights status names; other strings are green.
    fn status_colored(s: &str) -> String {
        if s == "SUCCESS" {
            s.green().bold().to_string()
        } else if !s.is_empty() && s.chars().all(|c| c.is_ascii_uppercase() || c == '_') {
            s.red().bold().to_string()
        } else {
            format!("\"{}\"", s.green())
        }
    }
}
