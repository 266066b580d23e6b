//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, categories, statistics and
//! import reports for the CLI, with locale-aware amounts and dates.

pub mod category;
pub mod expense;
pub mod format;
pub mod stats;
pub mod upload;

pub use category::format_category_list;
pub use expense::{format_expense_details, format_expense_table, format_filter_summary};
pub use format::DisplayLocale;
pub use stats::{format_advisory, format_monthly, format_stats_summary, format_trends};
pub use upload::format_upload_result;
