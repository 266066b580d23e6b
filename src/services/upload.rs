//! File import service
//!
//! Sends a CSV, Excel or PDF file to the matching import endpoint.

use std::path::Path;

use tracing::info;

use crate::api::ExpenseApi;
use crate::error::{TallyError, TallyResult};
use crate::models::{UploadKind, UploadResult};

/// Service for importing expense files
pub struct UploadService<'a, A: ExpenseApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: ExpenseApi + ?Sized> UploadService<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Upload one file. The extension is checked before the file is opened.
    pub fn upload(&self, path: &Path) -> TallyResult<UploadResult> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let kind = UploadKind::from_path(path).ok_or_else(|| {
            TallyError::UnsupportedFormat(format!(
                "{} (expected .csv, .xlsx, .xls or .pdf)",
                file_name
            ))
        })?;

        let bytes = std::fs::read(path)
            .map_err(|e| TallyError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        info!(file = %file_name, %kind, size = bytes.len(), "uploading file");
        let result = self.api.upload(kind, &file_name, bytes)?;
        info!(
            imported = result.imported,
            auto_added = result.auto_added,
            errors = result.errors.len(),
            "upload finished"
        );
        Ok(result)
    }
}
