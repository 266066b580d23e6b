//! Upload CLI command

use std::path::Path;

use super::load_cache;
use crate::api::ExpenseApi;
use crate::config::Settings;
use crate::display::upload::format_upload_result;
use crate::error::TallyResult;
use crate::models::UploadKind;
use crate::services::UploadService;

/// Import a CSV, Excel or PDF file
pub fn handle_upload_command<A: ExpenseApi + ?Sized>(
    api: &A,
    settings: &Settings,
    file: &Path,
) -> TallyResult<()> {
    let service = UploadService::new(api);
    let result = service.upload(file)?;

    // Only resolve category names once the upload went through
    let cache = if result.auto_categorization.is_empty() {
        Default::default()
    } else {
        load_cache(api)
    };

    if let Some(kind) = UploadKind::from_path(file) {
        println!("Uploaded {} file: {}", kind, file.display());
    }
    print!(
        "{}",
        format_upload_result(&result, &cache, settings.upload_error_preview)
    );

    Ok(())
}
