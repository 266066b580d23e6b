//! Filter engine and filter service
//!
//! `FilterEngine` is the pure part: it narrows a list of expenses with a
//! `FilterSpec` and summarizes the result. `FilterService` decides whether a
//! spec is answered from the cached list or by the backend.

use std::collections::BTreeSet;

use chrono::{Datelike, Local, NaiveDate};
use tracing::debug;

use crate::api::ExpenseApi;
use crate::error::TallyResult;
use crate::models::{AverageDivisor, Expense, FilterSpec, FilterSummary, FilteredView, Money};

/// Applies filter specs to expense lists
#[derive(Debug, Clone, Copy)]
pub struct FilterEngine {
    policy: AverageDivisor,
    today: NaiveDate,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(AverageDivisor::default())
    }
}

impl FilterEngine {
    pub fn new(policy: AverageDivisor) -> Self {
        Self {
            policy,
            today: Local::now().date_naive(),
        }
    }

    /// Pin "today" (only `AverageDivisor::DayOfMonth` looks at it)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn policy(&self) -> AverageDivisor {
        self.policy
    }

    /// Keep the expenses matching every set clause, in source order
    pub fn apply(&self, spec: &FilterSpec, source: &[Expense]) -> FilteredView {
        let needle = spec.search_needle();
        let expenses: Vec<Expense> = source
            .iter()
            .filter(|e| spec.matches_with_needle(e, needle.as_deref()))
            .cloned()
            .collect();
        let summary = self.summarize(spec, &expenses);
        FilteredView { expenses, summary }
    }

    /// Totals over an already-filtered list
    pub fn summarize(&self, spec: &FilterSpec, matches: &[Expense]) -> FilterSummary {
        let total_amount: Money = matches.iter().map(|e| e.amount).sum();
        let divisor = self.divisor(spec, matches);
        let average_per_day = if matches.is_empty() || divisor <= 0 {
            Money::zero()
        } else {
            total_amount.div_round(divisor)
        };

        FilterSummary {
            total_amount,
            total_count: matches.len(),
            average_per_day,
        }
    }

    fn divisor(&self, spec: &FilterSpec, matches: &[Expense]) -> i64 {
        match self.policy {
            AverageDivisor::Span => span_days(spec, matches),
            AverageDivisor::DistinctDates => distinct_dates(matches),
            AverageDivisor::DayOfMonth if !spec.has_date_range() => i64::from(self.today.day()),
            AverageDivisor::DayOfMonth => span_days(spec, matches),
        }
    }
}

/// Days covered by the effective range. A missing bound is taken from the
/// extreme date of the matches; with no bounds at all the distinct dates count.
fn span_days(spec: &FilterSpec, matches: &[Expense]) -> i64 {
    if !spec.has_date_range() {
        return distinct_dates(matches);
    }

    let start = spec
        .start_date
        .or_else(|| matches.iter().map(|e| e.date).min());
    let end = spec.end_date.or_else(|| matches.iter().map(|e| e.date).max());

    match (start, end) {
        (Some(start), Some(end)) => (end - start).num_days() + 1,
        _ => 0,
    }
}

fn distinct_dates(matches: &[Expense]) -> i64 {
    let dates: BTreeSet<NaiveDate> = matches.iter().map(|e| e.date).collect();
    dates.len() as i64
}

/// Answers filter specs locally or through the backend
pub struct FilterService<'a, A: ExpenseApi + ?Sized> {
    api: &'a A,
    engine: FilterEngine,
    remote: bool,
}

impl<'a, A: ExpenseApi + ?Sized> FilterService<'a, A> {
    pub fn new(api: &'a A, engine: FilterEngine) -> Self {
        Self {
            api,
            engine,
            remote: true,
        }
    }

    /// Allow or forbid backend queries. When forbidden every spec is
    /// answered from the cached list.
    pub fn remote(mut self, enabled: bool) -> Self {
        self.remote = enabled;
        self
    }

    /// Produce the filtered view for `spec`.
    ///
    /// On error the caller keeps whatever view it was showing.
    pub fn run(&self, spec: &FilterSpec, cached: &[Expense]) -> TallyResult<FilteredView> {
        if !(self.remote && spec.needs_remote()) {
            debug!(?spec, "filtering cached expenses");
            return Ok(self.engine.apply(spec, cached));
        }

        debug!(?spec, "querying backend for filtered expenses");
        let mut expenses = self.api.search_expenses(spec)?;
        let needle = spec.search_needle();
        if let Some(needle) = needle.as_deref() {
            expenses.retain(|e| e.matches_text(needle));
        }

        // The summary endpoint only scopes by category and dates
        let summary = if spec.has_amount_bounds() || needle.is_some() {
            self.engine.summarize(spec, &expenses)
        } else {
            self.api.filter_summary(spec)?
        };

        Ok(FilteredView { expenses, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{coffee_and_bus, date, MockApi};

    fn engine() -> FilterEngine {
        FilterEngine::new(AverageDivisor::Span).with_today(date(2024, 1, 20))
    }

    fn ids(view: &FilteredView) -> Vec<&str> {
        view.expenses.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_category_filter() {
        let view = engine().apply(&FilterSpec::new().category("food"), &coffee_and_bus());
        assert_eq!(ids(&view), vec!["1"]);
        assert_eq!(view.summary.total_amount, Money::from_units(50));
        assert_eq!(view.summary.total_count, 1);
    }

    #[test]
    fn test_min_amount_filter() {
        let view = engine().apply(
            &FilterSpec::new().min_amount(Money::from_units(25)),
            &coffee_and_bus(),
        );
        assert_eq!(ids(&view), vec!["1"]);
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let source = coffee_and_bus();
        let view = engine().apply(&FilterSpec::new(), &source);
        assert_eq!(view.expenses, source);
        assert_eq!(view.summary.total_amount, Money::from_units(70));
        assert_eq!(view.summary.total_count, 2);
    }

    #[test]
    fn test_search_matches_description_case_insensitively() {
        let mut source = coffee_and_bus();
        source[1] = source[1].clone().with_description("Kadıköy hattı");

        let spec = FilterSpec::new().search("HATTı");
        assert_eq!(ids(&engine().apply(&spec, &source)), vec!["2"]);

        let spec = FilterSpec::new().search("cOfFeE");
        assert_eq!(ids(&engine().apply(&spec, &source)), vec!["1"]);
    }

    #[test]
    fn test_clauses_are_a_conjunction() {
        let source = coffee_and_bus();
        let clauses = vec![
            FilterSpec::new().search("bus"),
            FilterSpec::new().category("transport"),
            FilterSpec::new().min_amount(Money::from_units(10)),
            FilterSpec::new().max_amount(Money::from_units(30)),
            FilterSpec::new().start_date(date(2024, 1, 6)),
            FilterSpec::new().end_date(date(2024, 1, 31)),
        ];
        let combined = FilterSpec::new()
            .search("bus")
            .category("transport")
            .min_amount(Money::from_units(10))
            .max_amount(Money::from_units(30))
            .date_range(date(2024, 1, 6), date(2024, 1, 31));

        let combined_view = engine().apply(&combined, &source);
        for expense in &source {
            let in_all = clauses.iter().all(|c| c.matches(expense));
            assert_eq!(combined_view.expenses.contains(expense), in_all);
        }
        assert_eq!(ids(&combined_view), vec!["2"]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let spec = FilterSpec::new().max_amount(Money::from_units(60)).search("o");
        let once = engine().apply(&spec, &coffee_and_bus());
        let twice = engine().apply(&spec, &once.expenses);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_order_is_preserved() {
        let mut source = coffee_and_bus();
        source.reverse();
        let view = engine().apply(&FilterSpec::new(), &source);
        assert_eq!(ids(&view), vec!["2", "1"]);
    }

    #[test]
    fn test_span_divisor_with_both_bounds() {
        let spec = FilterSpec::new().date_range(date(2024, 1, 1), date(2024, 1, 10));
        let view = engine().apply(&spec, &coffee_and_bus());
        assert_eq!(view.summary.average_per_day, Money::from_units(7));
    }

    #[test]
    fn test_span_divisor_with_one_bound() {
        // 2024-01-01 .. latest match 2024-01-10 is ten days
        let spec = FilterSpec::new().start_date(date(2024, 1, 1));
        let view = engine().apply(&spec, &coffee_and_bus());
        assert_eq!(view.summary.average_per_day, Money::from_units(7));

        // earliest match 2024-01-05 .. 2024-01-14 is ten days
        let spec = FilterSpec::new().end_date(date(2024, 1, 14));
        let view = engine().apply(&spec, &coffee_and_bus());
        assert_eq!(view.summary.average_per_day, Money::from_units(7));
    }

    #[test]
    fn test_span_divisor_without_bounds_uses_distinct_dates() {
        let mut source = coffee_and_bus();
        source.push(Expense::new("3", "Tea", Money::from_units(30), "food", date(2024, 1, 5)));
        let view = engine().apply(&FilterSpec::new(), &source);
        assert_eq!(view.summary.average_per_day, Money::from_units(50));
    }

    #[test]
    fn test_distinct_dates_divisor() {
        let engine = FilterEngine::new(AverageDivisor::DistinctDates);
        let spec = FilterSpec::new().date_range(date(2024, 1, 1), date(2024, 1, 31));
        let view = engine.apply(&spec, &coffee_and_bus());
        assert_eq!(view.summary.average_per_day, Money::from_units(35));
    }

    #[test]
    fn test_day_of_month_divisor() {
        let engine = FilterEngine::new(AverageDivisor::DayOfMonth).with_today(date(2024, 2, 7));
        let view = engine.apply(&FilterSpec::new(), &coffee_and_bus());
        assert_eq!(view.summary.average_per_day, Money::from_units(10));

        // With a range it behaves like Span
        let spec = FilterSpec::new().date_range(date(2024, 1, 1), date(2024, 1, 10));
        let view = engine.apply(&spec, &coffee_and_bus());
        assert_eq!(view.summary.average_per_day, Money::from_units(7));
    }

    #[test]
    fn test_empty_match_set_has_zero_average() {
        let spec = FilterSpec::new().category("health");
        let view = engine().apply(&spec, &coffee_and_bus());
        assert!(view.expenses.is_empty());
        assert_eq!(view.summary, FilterSummary::default());
    }

    #[test]
    fn test_inverted_date_range_has_zero_average() {
        let spec = FilterSpec::new().date_range(date(2024, 1, 31), date(2024, 1, 1));
        let view = engine().apply(&spec, &coffee_and_bus());
        assert!(view.expenses.is_empty());
        assert!(view.summary.average_per_day.is_zero());
    }

    #[test]
    fn test_service_search_only_stays_local() {
        let api = MockApi::coffee_and_bus();
        let service = FilterService::new(&api, engine());
        let view = service
            .run(&FilterSpec::new().search("coffee"), &coffee_and_bus())
            .unwrap();
        assert_eq!(ids(&view), vec!["1"]);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_service_bounded_spec_goes_remote() {
        let api = MockApi::coffee_and_bus();
        let service = FilterService::new(&api, engine());
        let view = service
            .run(&FilterSpec::new().category("food"), &[])
            .unwrap();
        assert_eq!(ids(&view), vec!["1"]);
        assert_eq!(api.calls(), vec!["search_expenses", "filter_summary"]);
        assert_eq!(view.summary.total_amount, Money::from_units(50));
    }

    #[test]
    fn test_service_amount_bounds_summarize_locally() {
        let api = MockApi::coffee_and_bus();
        let service = FilterService::new(&api, engine());
        let view = service
            .run(&FilterSpec::new().min_amount(Money::from_units(25)), &[])
            .unwrap();
        assert_eq!(ids(&view), vec!["1"]);
        assert_eq!(view.summary.total_amount, Money::from_units(50));
        assert_eq!(api.call_count("filter_summary"), 0);
    }

    #[test]
    fn test_service_remote_disabled() {
        let api = MockApi::coffee_and_bus();
        let service = FilterService::new(&api, engine()).remote(false);
        let view = service
            .run(&FilterSpec::new().category("transport"), &coffee_and_bus())
            .unwrap();
        assert_eq!(ids(&view), vec!["2"]);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_service_remote_failure_is_an_error() {
        let api = MockApi::coffee_and_bus();
        api.fail("search_expenses");
        let service = FilterService::new(&api, engine());
        let err = service
            .run(&FilterSpec::new().category("food"), &coffee_and_bus())
            .unwrap_err();
        assert!(err.is_transport());
    }
}
