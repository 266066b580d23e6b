//! Last-fetched backend data
//!
//! The cache owns the authoritative copies of everything the dashboard
//! renders. Each slice is refreshed independently; a slice whose fetch fails
//! keeps its previous contents.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::api::ExpenseApi;
use crate::error::TallyResult;
use crate::models::{
    Advisory, AdvisoryKind, Category, CategoryId, CategoryTrend, Expense, MonthlyStat,
    StatsSummary,
};

/// One independently refreshed piece of cached data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshSlice {
    Expenses,
    Summary,
    Monthly,
    Trends,
    Insights,
    Predictions,
    Limits,
}

impl fmt::Display for RefreshSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Expenses => "expenses",
            Self::Summary => "summary",
            Self::Monthly => "monthly stats",
            Self::Trends => "trends",
            Self::Insights => "insights",
            Self::Predictions => "predictions",
            Self::Limits => "limit checks",
        };
        write!(f, "{}", name)
    }
}

/// Which slices failed during a refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshReport {
    pub failures: Vec<(RefreshSlice, String)>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, slice: RefreshSlice) -> bool {
        self.failures.iter().any(|(s, _)| *s == slice)
    }

    /// One-line description for a notice
    pub fn summary(&self) -> Option<String> {
        if self.is_complete() {
            return None;
        }
        let names: Vec<String> = self.failures.iter().map(|(s, _)| s.to_string()).collect();
        Some(format!("Could not refresh {}", names.join(", ")))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataCache {
    categories: Vec<Category>,
    categories_loaded: bool,
    expenses: Vec<Expense>,
    summary: StatsSummary,
    monthly: Vec<MonthlyStat>,
    trends: Vec<CategoryTrend>,
    insights: Advisory,
    predictions: Advisory,
    limits: Advisory,
    refreshed_at: Option<DateTime<Local>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the category list the first time it is needed. Later calls
    /// return without touching the network.
    pub fn load_categories<A: ExpenseApi + ?Sized>(&mut self, api: &A) -> TallyResult<()> {
        if self.categories_loaded {
            return Ok(());
        }
        self.categories = api.categories()?;
        self.categories_loaded = true;
        info!(count = self.categories.len(), "loaded categories");
        Ok(())
    }

    /// Fetch only the expense list
    pub fn load_expenses<A: ExpenseApi + ?Sized>(&mut self, api: &A) -> TallyResult<()> {
        self.expenses = api.expenses()?;
        Ok(())
    }

    pub fn categories_loaded(&self) -> bool {
        self.categories_loaded
    }

    /// Look up a category for display. Unknown ids resolve to the
    /// "Bilinmeyen" sentinel.
    pub fn category_info(&self, id: &CategoryId) -> Cow<'_, Category> {
        match self.categories.iter().find(|c| &c.id == id) {
            Some(category) => Cow::Borrowed(category),
            None => Cow::Owned(Category::unknown()),
        }
    }

    /// Re-fetch every data slice. Failures are logged and reported, never
    /// returned as errors.
    pub fn refresh_all<A: ExpenseApi + ?Sized>(&mut self, api: &A) -> RefreshReport {
        let mut report = RefreshReport::default();

        store(&mut report, RefreshSlice::Expenses, api.expenses(), &mut self.expenses);
        store(&mut report, RefreshSlice::Summary, api.stats_summary(), &mut self.summary);
        store(&mut report, RefreshSlice::Monthly, api.stats_monthly(), &mut self.monthly);
        store(&mut report, RefreshSlice::Trends, api.stats_trends(), &mut self.trends);
        store(
            &mut report,
            RefreshSlice::Insights,
            api.advisory(AdvisoryKind::Insights),
            &mut self.insights,
        );
        store(
            &mut report,
            RefreshSlice::Predictions,
            api.advisory(AdvisoryKind::Predictions),
            &mut self.predictions,
        );
        store(
            &mut report,
            RefreshSlice::Limits,
            api.advisory(AdvisoryKind::Limits),
            &mut self.limits,
        );

        self.refreshed_at = Some(Local::now());
        info!(failed = report.failures.len(), "refreshed data");
        report
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn summary(&self) -> &StatsSummary {
        &self.summary
    }

    pub fn monthly(&self) -> &[MonthlyStat] {
        &self.monthly
    }

    pub fn trends(&self) -> &[CategoryTrend] {
        &self.trends
    }

    pub fn advisory(&self, kind: AdvisoryKind) -> &Advisory {
        match kind {
            AdvisoryKind::Insights => &self.insights,
            AdvisoryKind::Predictions => &self.predictions,
            AdvisoryKind::Limits => &self.limits,
        }
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Local>> {
        self.refreshed_at
    }
}

fn store<T>(report: &mut RefreshReport, slice: RefreshSlice, result: TallyResult<T>, slot: &mut T) {
    match result {
        Ok(value) => *slot = value,
        Err(e) => {
            warn!(%slice, error = %e, "refresh failed, keeping previous data");
            report.failures.push((slice, e.to_string()));
        }
    }
}
