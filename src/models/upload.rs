//! File import results
//!
//! The backend parses CSV, Excel and PDF statements and answers with a
//! structured report. Every field is defaulted because the three endpoints
//! don't fill the same subset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use super::ids::CategoryId;

/// The import endpoint a file is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Csv,
    Excel,
    Pdf,
}

impl UploadKind {
    /// Pick the endpoint from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" => Some(Self::Excel),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Path segment under the API base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Csv => "upload/csv",
            Self::Excel => "upload/excel",
            Self::Pdf => "upload/pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "CSV"),
            Self::Excel => write!(f, "Excel"),
            Self::Pdf => write!(f, "PDF"),
        }
    }
}

/// Outcome of one uploaded file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub message: String,

    /// Rows the parser looked at
    #[serde(default)]
    pub total_rows: usize,

    /// Rows stored as expenses
    #[serde(default)]
    pub imported: usize,

    /// Expenses added automatically (PDF extraction)
    #[serde(default)]
    pub auto_added: usize,

    /// How many imported rows landed in each category
    #[serde(default)]
    pub auto_categorization: BTreeMap<CategoryId, usize>,

    /// Column role -> column the parser picked (e.g. "amount" -> "Tutar")
    #[serde(default)]
    pub detected_columns: BTreeMap<String, serde_json::Value>,

    /// Row-level error messages
    #[serde(default)]
    pub errors: Vec<String>,

    #[serde(default)]
    pub sample_extractions: Vec<serde_json::Value>,
}

impl UploadResult {
    /// Whether the import changed server state
    pub fn changed_data(&self) -> bool {
        self.imported > 0 || self.auto_added > 0
    }

    /// The first `limit` errors and how many were left out
    pub fn error_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.errors.len().min(limit);
        (&self.errors[..shown], self.errors.len() - shown)
    }

    /// Rows the backend skipped without reporting an error
    pub fn skipped(&self) -> usize {
        self.total_rows
            .saturating_sub(self.imported)
            .saturating_sub(self.errors.len())
    }
}
