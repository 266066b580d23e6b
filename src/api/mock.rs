//! In-memory [`ExpenseApi`] for unit tests
//!
//! Records every call by endpoint name and can be told to fail specific
//! endpoints.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use chrono::NaiveDate;

use super::ExpenseApi;
use crate::error::{TallyError, TallyResult};
use crate::models::{
    Advisory, AdvisoryKind, Category, CategoryStat, CategoryTrend, Expense, ExpenseId,
    FilterSpec, FilterSummary, Money, MonthLabel, MonthlyStat, NewExpense, StatsSummary,
    UploadKind, UploadResult,
};

#[derive(Debug, Default)]
pub struct MockApi {
    pub categories: Vec<Category>,
    pub expenses: RefCell<Vec<Expense>>,
    pub upload_result: UploadResult,
    calls: RefCell<Vec<String>>,
    failing: RefCell<HashSet<String>>,
    next_id: Cell<u32>,
}

impl MockApi {
    pub fn new(categories: Vec<Category>, expenses: Vec<Expense>) -> Self {
        Self {
            categories,
            expenses: RefCell::new(expenses),
            next_id: Cell::new(100),
            ..Default::default()
        }
    }

    /// Two expenses over the default categories: Coffee 50 (food, 2024-01-05)
    /// and Bus 20 (transport, 2024-01-10)
    pub fn coffee_and_bus() -> Self {
        Self::new(Category::defaults(), coffee_and_bus())
    }

    pub fn with_upload_result(mut self, result: UploadResult) -> Self {
        self.upload_result = result;
        self
    }

    /// Make every call to `endpoint` fail with a transport error
    pub fn fail(&self, endpoint: &str) {
        self.failing.borrow_mut().insert(endpoint.to_string());
    }

    pub fn recover(&self, endpoint: &str) {
        self.failing.borrow_mut().remove(endpoint);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == endpoint).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, endpoint: &str) -> TallyResult<()> {
        self.calls.borrow_mut().push(endpoint.to_string());
        if self.failing.borrow().contains(endpoint) {
            Err(TallyError::Http(format!("{} unreachable", endpoint)))
        } else {
            Ok(())
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn coffee_and_bus() -> Vec<Expense> {
    vec![
        Expense::new("1", "Coffee", Money::from_units(50), "food", date(2024, 1, 5)),
        Expense::new("2", "Bus", Money::from_units(20), "transport", date(2024, 1, 10)),
    ]
}

impl ExpenseApi for MockApi {
    fn categories(&self) -> TallyResult<Vec<Category>> {
        self.record("categories")?;
        Ok(self.categories.clone())
    }

    fn expenses(&self) -> TallyResult<Vec<Expense>> {
        self.record("expenses")?;
        Ok(self.expenses.borrow().clone())
    }

    fn expense(&self, id: &ExpenseId) -> TallyResult<Expense> {
        self.record("expense")?;
        self.expenses
            .borrow()
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or_else(|| TallyError::expense_not_found(id.as_str()))
    }

    fn create_expense(&self, body: &NewExpense) -> TallyResult<Expense> {
        self.record("create_expense")?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let mut expense = Expense::new(
            id.to_string(),
            body.title.clone(),
            body.amount,
            body.category.clone(),
            body.date,
        );
        expense.description = body.description.clone();
        self.expenses.borrow_mut().insert(0, expense.clone());
        Ok(expense)
    }

    fn delete_expense(&self, id: &ExpenseId) -> TallyResult<()> {
        self.record("delete_expense")?;
        let mut expenses = self.expenses.borrow_mut();
        let before = expenses.len();
        expenses.retain(|e| &e.id != id);
        if expenses.len() == before {
            return Err(TallyError::expense_not_found(id.as_str()));
        }
        Ok(())
    }

    fn search_expenses(&self, spec: &FilterSpec) -> TallyResult<Vec<Expense>> {
        self.record("search_expenses")?;
        Ok(self
            .expenses
            .borrow()
            .iter()
            .filter(|e| spec.matches(e))
            .cloned()
            .collect())
    }

    fn filter_summary(&self, spec: &FilterSpec) -> TallyResult<FilterSummary> {
        self.record("filter_summary")?;
        // The real endpoint ignores text and amount bounds
        let scope = FilterSpec {
            search: None,
            min_amount: None,
            max_amount: None,
            ..spec.clone()
        };
        let expenses = self.expenses.borrow();
        let matched: Vec<&Expense> = expenses.iter().filter(|e| scope.matches(e)).collect();
        let total: Money = matched.iter().map(|e| e.amount).sum();
        Ok(FilterSummary {
            total_amount: total,
            total_count: matched.len(),
            average_per_day: total.div_round(30),
        })
    }

    fn stats_summary(&self) -> TallyResult<StatsSummary> {
        self.record("stats_summary")?;
        let expenses = self.expenses.borrow();
        let mut summary = StatsSummary {
            total_amount: expenses.iter().map(|e| e.amount).sum(),
            expense_count: expenses.len(),
            ..Default::default()
        };
        for expense in expenses.iter() {
            let stat = summary
                .category_stats
                .entry(expense.category.clone())
                .or_insert_with(CategoryStat::default);
            stat.count += 1;
            stat.total += expense.amount;
        }
        Ok(summary)
    }

    fn stats_monthly(&self) -> TallyResult<Vec<MonthlyStat>> {
        self.record("stats_monthly")?;
        let mut months: Vec<MonthlyStat> = Vec::new();
        for expense in self.expenses.borrow().iter() {
            let label = MonthLabel::of(expense.date).label(Default::default());
            match months.iter_mut().find(|m| m.month == label) {
                Some(stat) => {
                    stat.total += expense.amount;
                    stat.count += 1;
                }
                None => months.push(MonthlyStat {
                    month: label,
                    total: expense.amount,
                    count: 1,
                }),
            }
        }
        Ok(months)
    }

    fn stats_trends(&self) -> TallyResult<Vec<CategoryTrend>> {
        self.record("stats_trends")?;
        Ok(Vec::new())
    }

    fn advisory(&self, kind: AdvisoryKind) -> TallyResult<Advisory> {
        let endpoint = match kind {
            AdvisoryKind::Insights => "insights",
            AdvisoryKind::Predictions => "predictions",
            AdvisoryKind::Limits => "limits",
        };
        self.record(endpoint)?;
        Ok(Advisory::default())
    }

    fn upload(
        &self,
        kind: UploadKind,
        _file_name: &str,
        _bytes: Vec<u8>,
    ) -> TallyResult<UploadResult> {
        self.record(kind.endpoint())?;
        Ok(self.upload_result.clone())
    }
}
