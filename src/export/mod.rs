//! Export module for tally
//!
//! Writes the current filtered view in machine-readable formats:
//! - CSV: one row per expense (spreadsheet-compatible)
//! - JSON: the view with its filter and summary
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_view_csv;
pub use json::{export_view_json, ExportedExpense, ViewExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_view_yaml;
