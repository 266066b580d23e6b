//! Backend access
//!
//! [`ExpenseApi`] is the REST contract the client consumes. The dashboard and
//! the services only talk to the trait, so tests drive them with an in-memory
//! double while the binary uses the blocking [`HttpApi`].

pub mod http;

#[cfg(test)]
pub mod mock;

pub use http::HttpApi;

use crate::error::TallyResult;
use crate::models::{
    Advisory, AdvisoryKind, Category, CategoryTrend, Expense, ExpenseId, FilterSpec,
    FilterSummary, MonthlyStat, NewExpense, StatsSummary, UploadKind, UploadResult,
};

/// The expense tracker REST contract
pub trait ExpenseApi {
    /// `GET /categories`
    fn categories(&self) -> TallyResult<Vec<Category>>;

    /// `GET /expenses` (reverse-chronological)
    fn expenses(&self) -> TallyResult<Vec<Expense>>;

    /// `GET /expenses/{id}`
    fn expense(&self, id: &ExpenseId) -> TallyResult<Expense>;

    /// `POST /expenses`
    fn create_expense(&self, body: &NewExpense) -> TallyResult<Expense>;

    /// `DELETE /expenses/{id}`
    fn delete_expense(&self, id: &ExpenseId) -> TallyResult<()>;

    /// `GET /expenses/search`
    fn search_expenses(&self, spec: &FilterSpec) -> TallyResult<Vec<Expense>>;

    /// `GET /expenses/summary`
    fn filter_summary(&self, spec: &FilterSpec) -> TallyResult<FilterSummary>;

    /// `GET /expenses/stats/summary`
    fn stats_summary(&self) -> TallyResult<StatsSummary>;

    /// `GET /expenses/stats/monthly`
    fn stats_monthly(&self) -> TallyResult<Vec<MonthlyStat>>;

    /// `GET /expenses/stats/trends`
    fn stats_trends(&self) -> TallyResult<Vec<CategoryTrend>>;

    /// `GET /expenses/insights`, `/expenses/predictions`, `/expenses/limits/check`
    fn advisory(&self, kind: AdvisoryKind) -> TallyResult<Advisory>;

    /// `POST /upload/{csv,excel,pdf}` with a multipart `file` field
    fn upload(&self, kind: UploadKind, file_name: &str, bytes: Vec<u8>)
        -> TallyResult<UploadResult>;
}

/// Query parameters for `GET /expenses/search`. Unset clauses are omitted.
pub fn search_query(spec: &FilterSpec) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(search) = spec.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        query.push(("search", search.to_string()));
    }
    if let Some(category) = spec.category.id() {
        query.push(("category", category.to_string()));
    }
    if let Some(min) = spec.min_amount {
        query.push(("min_amount", min.to_string()));
    }
    if let Some(max) = spec.max_amount {
        query.push(("max_amount", max.to_string()));
    }
    if let Some(start) = spec.start_date {
        query.push(("start_date", start.format("%Y-%m-%d").to_string()));
    }
    if let Some(end) = spec.end_date {
        query.push(("end_date", end.format("%Y-%m-%d").to_string()));
    }
    query
}

/// Query parameters for `GET /expenses/summary`, which only knows category and dates
pub fn summary_query(spec: &FilterSpec) -> Vec<(&'static str, String)> {
    search_query(spec)
        .into_iter()
        .filter(|(key, _)| matches!(*key, "category" | "start_date" | "end_date"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_search_query_only_set_fields() {
        assert!(search_query(&FilterSpec::new()).is_empty());

        let spec = FilterSpec::new()
            .search("  kahve ")
            .category("food")
            .min_amount(Money::from_cents(2550))
            .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(
            search_query(&spec),
            vec![
                ("search", "kahve".to_string()),
                ("category", "food".to_string()),
                ("min_amount", "25.50".to_string()),
                ("start_date", "2024-01-01".to_string()),
            ]
        );
    }

    #[test]
    fn test_summary_query_drops_text_and_amounts() {
        let spec = FilterSpec::new()
            .search("bus")
            .category("transport")
            .max_amount(Money::from_units(100))
            .end_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(
            summary_query(&spec),
            vec![
                ("category", "transport".to_string()),
                ("end_date", "2024-02-29".to_string()),
            ]
        );
    }
}
