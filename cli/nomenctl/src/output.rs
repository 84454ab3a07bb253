//! Output formatting for CLI commands.

use std::str::FromStr;

use colored::Colorize;
use nomen_codec::{Series, Table, Value};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::Tabled;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

/// Print data in the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No items found.".dimmed());
            } else {
                println!("{}", tabled::Table::new(data));
            }
        }
        OutputFormat::Json => println!("{}", format_json(data, "[]")),
    }
}

/// Print a single name.
pub fn print_name(name: &str, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", name),
        OutputFormat::Json => println!("{}", format_json(&serde_json::json!({ "name": name }), "{}")),
    }
}

/// Print a labeled table of components.
pub fn print_table(table: &Table, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if table.is_empty() {
                println!("{}", "No items found.".dimmed());
            } else {
                println!("{}", render_table(table));
            }
        }
        OutputFormat::Json => {
            let rows: Vec<_> = table
                .records()
                .map(|(index, row)| serde_json::json!({ "index": index, "components": row }))
                .collect();
            println!("{}", format_json(&rows, "[]"));
        }
    }
}

/// Print a series of names.
pub fn print_series(series: &Series<String>, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if series.is_empty() {
                println!("{}", "No items found.".dimmed());
                return;
            }
            let mut builder = Builder::default();
            builder.push_record(["INDEX", "NAME"]);
            for (index, name) in series.iter() {
                builder.push_record([index.to_string(), name.clone()]);
            }
            println!("{}", builder.build());
        }
        OutputFormat::Json => {
            let rows: Vec<_> = series
                .iter()
                .map(|(index, name)| serde_json::json!({ "index": index, "name": name }))
                .collect();
            println!("{}", format_json(&rows, "[]"));
        }
    }
}

fn render_table(table: &Table) -> String {
    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once("INDEX".to_string()).chain(table.columns().iter().map(|c| c.to_uppercase())),
    );
    for (index, row) in table.records() {
        let cells = table
            .columns()
            .iter()
            .map(|c| row.get(c).map(render_cell).unwrap_or_default());
        builder.push_record(std::iter::once(index.to_string()).chain(cells));
    }
    builder.build().to_string()
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_json<T: Serialize + ?Sized>(data: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| fallback.to_string())
}
