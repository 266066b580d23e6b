//! Upload result formatting

use crate::models::UploadResult;
use crate::services::DataCache;

/// Render an import report. At most `error_preview` row errors are listed.
pub fn format_upload_result(
    result: &UploadResult,
    cache: &DataCache,
    error_preview: usize,
) -> String {
    let mut output = String::new();

    if !result.message.is_empty() {
        output.push_str(&format!("{}\n", result.message));
    }
    output.push_str(&format!(
        "Rows: {}  Imported: {}",
        result.total_rows, result.imported
    ));
    if result.auto_added > 0 {
        output.push_str(&format!("  Auto-added: {}", result.auto_added));
    }
    output.push('\n');

    if !result.auto_categorization.is_empty() {
        output.push_str("\nCategorized:\n");
        for (id, count) in &result.auto_categorization {
            output.push_str(&format!("  {}: {}\n", cache.category_info(id), count));
        }
    }

    if !result.detected_columns.is_empty() {
        output.push_str("\nDetected columns:\n");
        for (role, column) in &result.detected_columns {
            let column = match column {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            output.push_str(&format!("  {} -> {}\n", role, column));
        }
    }

    let (shown, hidden) = result.error_preview(error_preview);
    if !shown.is_empty() {
        output.push_str(&format!("\nErrors ({}):\n", result.errors.len()));
        for error in shown {
            output.push_str(&format!("  {}\n", error));
        }
        if hidden > 0 {
            output.push_str(&format!("  +{} more\n", hidden));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::models::CategoryId;

    #[test]
    fn test_upload_report() {
        let mut cache = DataCache::new();
        cache.load_categories(&MockApi::coffee_and_bus()).unwrap();

        let mut result = UploadResult {
            message: "Import complete".into(),
            total_rows: 10,
            imported: 5,
            errors: (1..=5).map(|i| format!("Row {}: bad amount", i)).collect(),
            ..Default::default()
        };
        result.auto_categorization.insert(CategoryId::new("food"), 3);
        result.auto_categorization.insert(CategoryId::new("mystery"), 2);
        result
            .detected_columns
            .insert("amount".into(), serde_json::json!("Tutar"));

        let output = format_upload_result(&result, &cache, 3);
        assert!(output.contains("Import complete"));
        assert!(output.contains("🍽️ Yiyecek & İçecek: 3"));
        assert!(output.contains("❓ Bilinmeyen: 2"));
        assert!(output.contains("amount -> Tutar"));
        assert!(output.contains("Row 3: bad amount"));
        assert!(!output.contains("Row 4"));
        assert!(output.contains("+2 more"));
    }

    #[test]
    fn test_no_errors_section_when_clean() {
        let output = format_upload_result(&UploadResult::default(), &DataCache::new(), 3);
        assert!(!output.contains("Errors"));
        assert!(!output.contains("more"));
    }
}
