//! Printing command results.
//!
//! JSON and raw output serialize the same camelCase shapes the HTTP API
//! returns. Table output goes through [`Tabular`], which each result type
//! implements with its own columns.

use serde::Serialize;

use crate::cli::OutputFormat;

pub mod table;
pub mod views;

pub use table::TableOptions;

/// A command result with a human-readable table view.
pub trait Tabular {
    fn to_table(&self, options: TableOptions) -> String;
}

/// Render a command result in the requested format.
pub fn render<T: Serialize + Tabular>(
    value: &T,
    format: OutputFormat,
    options: TableOptions,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(value.to_table(options)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a command result to stdout, fitting tables to the terminal.
pub fn output<T: Serialize + Tabular>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format, TableOptions::detect())?;
    println!("{rendered}");
    Ok(())
}
