// crates/stakescope-cli/src/output.rs
//
// Output formatting utilities for the stakescope CLI.
// Supports table and JSON output modes.

use clap::ValueEnum;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table output (default).
    Table,
    /// JSON output for machine consumption.
    Json,
}

/// A metric/value row, the shape of every stakescope table.
#[derive(Debug, Clone, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl FieldRow {
    pub fn new(metric: &str, value: impl ToString) -> Self {
        Self {
            metric: metric.to_string(),
            value: value.to_string(),
        }
    }
}

/// Format a slice of Tabled items as a table string.
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    Table::new(data).to_string()
}

/// Format a serializable value as a pretty-printed JSON string.
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("JSON serialization error: {}", e))
}

/// Format a fraction as a percentage with two decimals.
pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Format a duration in seconds with three decimals.
pub fn seconds(value: f64) -> String {
    format!("{:.3}s", value)
}

/// Print a titled section: JSON of `value`, or `title` followed by `rows`.
pub fn print_section<T: Serialize>(format: OutputFormat, title: &str, value: &T, rows: &[FieldRow]) {
    match format {
        OutputFormat::Json => println!("{}", format_json(value)),
        OutputFormat::Table => {
            println!("{}", title);
            println!("{}", format_table(rows));
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.1085), "10.85%");
        assert_eq!(percent(0.0), "0.00%");
    }

    #[test]
    fn test_seconds() {
        assert_eq!(seconds(0.4), "0.400s");
        assert_eq!(seconds(1.0), "1.000s");
    }

    #[test]
    fn test_table_has_headers_and_values() {
        let rows = vec![
            FieldRow::new("Active validators", 1_400),
            FieldRow::new("Delinquent validators", 12),
        ];
        let table = format_table(&rows);
        assert!(table.contains("Metric"));
        assert!(table.contains("Value"));
        assert!(table.contains("Active validators"));
        assert!(table.contains("1400"));
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&serde_json::json!({"total_count": 3}));
        assert!(json.contains("\"total_count\": 3"));
    }
}
