//! YAML export of a filtered expense view

use crate::error::{TallyError, TallyResult};
use crate::export::json::ViewExport;
use crate::models::{FilterSpec, FilteredView};
use crate::services::DataCache;
use std::io::Write;

/// Export a filtered view as YAML with a short header comment
pub fn export_view_yaml<W: Write>(
    spec: &FilterSpec,
    view: &FilteredView,
    cache: &DataCache,
    writer: &mut W,
) -> TallyResult<()> {
    let export = ViewExport::new(spec, view, cache);

    writeln!(writer, "# tally expense export")
        .map_err(|e| TallyError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| TallyError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TallyError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TallyError::Export(e.to_string()))?;

    Ok(())
}
