//! JSON export of a filtered expense view
//!
//! The same [`ViewExport`] document is used by the YAML exporter.

use crate::error::{TallyError, TallyResult};
use crate::models::{Expense, FilterSpec, FilterSummary, FilteredView, Money};
use crate::services::DataCache;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A filtered view with the filter that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub filter: FilterSpec,
    pub summary: FilterSummary,
    pub expenses: Vec<ExportedExpense>,
}

/// An expense with its category name resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedExpense {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub category_id: String,
    pub category_name: String,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExportedExpense {
    pub fn new(expense: &Expense, cache: &DataCache) -> Self {
        Self {
            id: expense.id.to_string(),
            date: expense.date,
            title: expense.title.clone(),
            category_id: expense.category.to_string(),
            category_name: cache.category_info(&expense.category).name.clone(),
            amount: expense.amount,
            description: expense.description.clone(),
        }
    }
}

impl ViewExport {
    pub fn new(spec: &FilterSpec, view: &FilteredView, cache: &DataCache) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            filter: spec.clone(),
            summary: view.summary,
            expenses: view
                .expenses
                .iter()
                .map(|e| ExportedExpense::new(e, cache))
                .collect(),
        }
    }
}

/// Export a filtered view as pretty-printed JSON
pub fn export_view_json<W: Write>(
    spec: &FilterSpec,
    view: &FilteredView,
    cache: &DataCache,
    writer: &mut W,
) -> TallyResult<()> {
    let export = ViewExport::new(spec, view, cache);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| TallyError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TallyError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{coffee_and_bus, MockApi};
    use crate::services::FilterEngine;

    #[test]
    fn test_json_export() {
        let mut cache = DataCache::new();
        cache.load_categories(&MockApi::coffee_and_bus()).unwrap();
        let spec = FilterSpec::new().category("food");
        let view = FilterEngine::default().apply(&spec, &coffee_and_bus());

        let mut buffer = Vec::new();
        export_view_json(&spec, &view, &cache, &mut buffer).unwrap();

        let parsed: ViewExport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.filter, spec);
        assert_eq!(parsed.expenses.len(), 1);
        assert_eq!(parsed.expenses[0].category_name, "Yiyecek & İçecek");
        assert_eq!(parsed.summary.total_amount, Money::from_units(50));
    }
}
