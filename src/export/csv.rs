//! CSV export of a filtered expense view

use crate::error::{TallyError, TallyResult};
use crate::export::json::ExportedExpense;
use crate::models::FilteredView;
use crate::services::DataCache;
use std::io::Write;

/// Export the expenses of a view as CSV, one row per expense
pub fn export_view_csv<W: Write>(
    view: &FilteredView,
    cache: &DataCache,
    writer: W,
) -> TallyResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "ID",
            "Date",
            "Title",
            "Category ID",
            "Category",
            "Amount",
            "Description",
        ])
        .map_err(|e| TallyError::Export(e.to_string()))?;

    for expense in &view.expenses {
        let row = ExportedExpense::new(expense, cache);
        csv_writer
            .write_record([
                row.id,
                row.date.format("%Y-%m-%d").to_string(),
                row.title,
                row.category_id,
                row.category_name,
                row.amount.to_string(),
                row.description.unwrap_or_default(),
            ])
            .map_err(|e| TallyError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TallyError::Export(e.to_string()))?;
    Ok(())
}
