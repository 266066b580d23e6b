//! Core data models for tally
//!
//! This module contains the data structures exchanged with the expense
//! backend and the filter types derived from them.

pub mod category;
pub mod expense;
pub mod filter;
pub mod ids;
pub mod money;
pub mod month;
pub mod stats;
pub mod upload;

pub use category::Category;
pub use expense::{fold_case, Expense, ExpenseValidationError, NewExpense};
pub use filter::{AverageDivisor, CategorySelector, FilterSpec, FilterSummary, FilteredView};
pub use ids::{CategoryId, ExpenseId};
pub use money::Money;
pub use month::{Language, MonthLabel};
pub use stats::{
    Advisory, AdvisoryKind, CategoryStat, CategoryTrend, MonthlyStat, StatsSummary, TrendPoint,
};
pub use upload::{UploadKind, UploadResult};
