//! Rendering command results

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use vitrine_common::{Severity, Toast};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Bordered table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML document
    Yaml,
    /// `Header: value` lines, one block per row
    Plain,
}

/// A row that can be laid out in columns
pub trait Columns {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn structured<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Json => Some(serde_json::to_string_pretty(value).unwrap_or_default()),
        OutputFormat::Yaml => Some(serde_yaml::to_string(value).unwrap_or_default()),
        OutputFormat::Table | OutputFormat::Plain => None,
    }
}

/// Print rows in the chosen format. An empty table prints a note instead.
pub fn print_rows<T: Serialize + Columns>(rows: &[T], format: OutputFormat) {
    if let Some(text) = structured(rows, format) {
        println!("{}", text);
        return;
    }
    if rows.is_empty() {
        println!("No products.");
        return;
    }

    if format == OutputFormat::Plain {
        let blocks: Vec<String> = rows
            .iter()
            .map(|row| {
                T::HEADERS
                    .iter()
                    .zip(row.cells())
                    .map(|(header, cell)| format!("{}: {}", header, cell))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect();
        println!("{}", blocks.join("\n\n"));
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(T::HEADERS.to_vec());
    for row in rows {
        table.add_row(row.cells());
    }
    println!("{table}");
}

/// Print bare names, one per line
pub fn print_names(names: &[String], format: OutputFormat) {
    match structured(names, format) {
        Some(text) => println!("{}", text),
        None if names.is_empty() => println!("None."),
        None => println!("{}", names.join("\n")),
    }
}

pub fn print_line(text: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "message": text })),
        _ => println!("{}", text),
    }
}

/// Toasts go to stderr so stdout stays parseable
pub fn print_toast(toast: &Toast) {
    let marker = match toast.severity {
        Severity::Danger => "❌",
        Severity::Warning => "⚠️ ",
        Severity::Success => "✅",
        Severity::Info => "ℹ️ ",
    };
    eprintln!("{} {}", marker, toast.message);
}
