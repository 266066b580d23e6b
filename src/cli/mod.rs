//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod drill;
pub mod expense;
pub mod stats;
pub mod upload;

pub use category::{handle_category_command, CategoryCommands};
pub use drill::{handle_drill_command, DrillCommands};
pub use expense::{handle_expense_command, ExpenseCommands, OutputFormat};
pub use stats::{handle_stats_command, StatsCommands};
pub use upload::handle_upload_command;

use chrono::{Days, Local, NaiveDate};
use tracing::warn;

use crate::api::ExpenseApi;
use crate::error::{TallyError, TallyResult};
use crate::models::category::find_by_name;
use crate::models::{CategoryId, Money};
use crate::services::DataCache;

/// Parse a date given as YYYY-MM-DD, DD.MM.YYYY, `today` or `yesterday`
pub(crate) fn parse_date(input: &str) -> TallyResult<NaiveDate> {
    parse_date_on(input, Local::now().date_naive())
}

fn parse_date_on(input: &str, today: NaiveDate) -> TallyResult<NaiveDate> {
    let input = input.trim();
    match input.to_lowercase().as_str() {
        "today" | "bugün" => return Ok(today),
        "yesterday" | "dün" => {
            return today.checked_sub_days(Days::new(1)).ok_or_else(|| {
                TallyError::Validation(format!("No day before {}", today))
            })
        }
        _ => {}
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d.%m.%Y"))
        .map_err(|_| {
            TallyError::Validation(format!(
                "Invalid date format: '{}'. Use YYYY-MM-DD, DD.MM.YYYY, today or yesterday",
                input
            ))
        })
}

pub(crate) fn parse_amount(input: &str) -> TallyResult<Money> {
    Money::parse(input).map_err(|e| {
        TallyError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '50' or '1.234,56'. Error: {}",
            input, e
        ))
    })
}

/// Load categories for name resolution and display. A failure only costs
/// category names, so it is logged and the command goes on.
pub(crate) fn load_cache<A: ExpenseApi + ?Sized>(api: &A) -> DataCache {
    let mut cache = DataCache::new();
    if let Err(e) = cache.load_categories(api) {
        warn!(error = %e, "could not load categories");
    }
    cache
}

/// Resolve a category given by id or display name
pub(crate) fn resolve_category(cache: &DataCache, input: &str) -> TallyResult<CategoryId> {
    let input = input.trim();
    let categories = cache.categories();
    if categories.is_empty() {
        // Nothing to check against; let the backend decide
        return Ok(CategoryId::new(input));
    }
    if let Some(category) = categories.iter().find(|c| c.id.as_str() == input) {
        return Ok(category.id.clone());
    }
    find_by_name(categories, input)
        .map(|c| c.id.clone())
        .ok_or_else(|| TallyError::category_not_found(input))
}
