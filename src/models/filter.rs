//! Filter criteria and their derived results
//!
//! A `FilterSpec` narrows the expense list. Every field is optional; an
//! omitted bound is unbounded on that side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::{fold_case, Expense};
use super::ids::CategoryId;
use super::money::Money;

/// Which categories a filter accepts
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategorySelector {
    #[default]
    All,
    Only(CategoryId),
}

impl CategorySelector {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn accepts(&self, category: &CategoryId) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => id == category,
        }
    }

    pub fn id(&self) -> Option<&CategoryId> {
        match self {
            Self::All => None,
            Self::Only(id) => Some(id),
        }
    }
}

impl From<String> for CategorySelector {
    fn from(s: String) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(CategoryId::new(trimmed))
        }
    }
}

impl From<CategorySelector> for String {
    fn from(selector: CategorySelector) -> Self {
        match selector {
            CategorySelector::All => "all".to_string(),
            CategorySelector::Only(id) => id.to_string(),
        }
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(id) => write!(f, "{}", id),
        }
    }
}

/// Criteria used to narrow the expense list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: CategorySelector,
    #[serde(default)]
    pub min_amount: Option<Money>,
    #[serde(default)]
    pub max_amount: Option<Money>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by free text (title or description)
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = CategorySelector::Only(category.into());
        self
    }

    pub fn min_amount(mut self, amount: Money) -> Self {
        self.min_amount = Some(amount);
        self
    }

    pub fn max_amount(mut self, amount: Money) -> Self {
        self.max_amount = Some(amount);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Filter by an inclusive date range
    pub fn date_range(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date(start).end_date(end)
    }

    /// Search text if set and not blank, lowercased for matching
    pub fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(fold_case)
    }

    pub fn has_date_range(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    pub fn has_amount_bounds(&self) -> bool {
        self.min_amount.is_some() || self.max_amount.is_some()
    }

    /// Whether any clause besides free text is set. Such specs are sent to
    /// the backend when remote filtering is enabled.
    pub fn needs_remote(&self) -> bool {
        self.has_date_range() || self.has_amount_bounds() || !self.category.is_all()
    }

    /// True when no clause is set at all
    pub fn is_empty(&self) -> bool {
        self.search_needle().is_none() && !self.needs_remote()
    }

    /// Check one expense against every set clause
    pub fn matches(&self, expense: &Expense) -> bool {
        self.matches_with_needle(expense, self.search_needle().as_deref())
    }

    pub(crate) fn matches_with_needle(&self, expense: &Expense, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            if !expense.matches_text(needle) {
                return false;
            }
        }
        if !self.category.accepts(&expense.category) {
            return false;
        }
        if self.min_amount.is_some_and(|min| expense.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| expense.amount > max) {
            return false;
        }
        if self.start_date.is_some_and(|start| expense.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| expense.date > end) {
            return false;
        }
        true
    }
}

/// How the average-per-day divisor is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AverageDivisor {
    /// Days spanned by the effective date range; distinct dates when unbounded
    #[default]
    Span,
    /// Always the number of distinct expense dates in the match set
    DistinctDates,
    /// Today's day-of-month when unbounded, otherwise like `Span`
    DayOfMonth,
}

/// Aggregate over the current filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSummary {
    pub total_amount: Money,
    pub total_count: usize,
    pub average_per_day: Money,
}

/// A filtered expense list and its summary
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilteredView {
    pub expenses: Vec<Expense>,
    pub summary: FilterSummary,
}
