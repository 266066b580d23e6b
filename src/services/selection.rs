//! Chart drill-down selection
//!
//! Clicking a month bar or a category slice selects it and lists the
//! matching expenses. Only one selection exists at a time.

use tracing::debug;

use crate::models::category::find_by_name;
use crate::models::{Category, Expense, MonthLabel};

/// What the user drilled into
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    /// A month label as shown on the chart, e.g. "Ocak 2024"
    Month(String),
    /// A category name as shown on the chart
    Category(String),
}

impl Selection {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Short description for headers
    pub fn describe(&self) -> Option<String> {
        match self {
            Self::Idle => None,
            Self::Month(label) => Some(format!("Month: {}", label)),
            Self::Category(name) => Some(format!("Category: {}", name)),
        }
    }
}

/// The current selection and the expenses it matches
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selection: Selection,
    matches: Vec<Expense>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn matches(&self) -> &[Expense] {
        &self.matches
    }

    pub fn is_idle(&self) -> bool {
        self.selection.is_idle()
    }

    /// Select a month bar. A click without a payload is ignored; a label that
    /// can't be parsed selects nothing.
    pub fn select_month(&mut self, label: Option<&str>, expenses: &[Expense]) {
        let Some(label) = label else {
            return;
        };
        self.matches = month_matches(label, expenses);
        debug!(label, matches = self.matches.len(), "selected month");
        self.selection = Selection::Month(label.to_string());
    }

    /// Select a category slice by display name. Unknown names select nothing.
    pub fn select_category(
        &mut self,
        name: Option<&str>,
        categories: &[Category],
        expenses: &[Expense],
    ) {
        let Some(name) = name else {
            return;
        };
        self.matches = category_matches(name, categories, expenses);
        debug!(name, matches = self.matches.len(), "selected category");
        self.selection = Selection::Category(name.to_string());
    }

    pub fn clear(&mut self) {
        self.selection = Selection::Idle;
        self.matches.clear();
    }

    /// Re-derive the match list after the cached data changed
    pub fn recompute(&mut self, expenses: &[Expense], categories: &[Category]) {
        self.matches = match &self.selection {
            Selection::Idle => Vec::new(),
            Selection::Month(label) => month_matches(label, expenses),
            Selection::Category(name) => category_matches(name, categories, expenses),
        };
    }
}

fn month_matches(label: &str, expenses: &[Expense]) -> Vec<Expense> {
    match MonthLabel::parse(label) {
        Some(month) => expenses
            .iter()
            .filter(|e| month.contains(e.date))
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

fn category_matches(name: &str, categories: &[Category], expenses: &[Expense]) -> Vec<Expense> {
    match find_by_name(categories, name) {
        Some(category) => expenses
            .iter()
            .filter(|e| e.category == category.id)
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{coffee_and_bus, date};
    use crate::models::Money;

    fn categories() -> Vec<Category> {
        Category::defaults()
    }

    #[test]
    fn test_select_month_then_clear() {
        let mut model = SelectionModel::new();
        model.select_month(Some("Ocak 2024"), &coffee_and_bus());
        assert_eq!(model.selection(), &Selection::Month("Ocak 2024".into()));
        assert_eq!(model.matches().len(), 2);

        model.clear();
        assert!(model.is_idle());
        assert!(model.matches().is_empty());
    }

    #[test]
    fn test_select_month_only_that_month() {
        let mut expenses = coffee_and_bus();
        expenses.push(Expense::new("3", "Rent", Money::from_units(900), "bills", date(2024, 2, 1)));

        let mut model = SelectionModel::new();
        model.select_month(Some("Şubat 2024"), &expenses);
        assert_eq!(model.matches().len(), 1);
        assert_eq!(model.matches()[0].id.as_str(), "3");
    }

    #[test]
    fn test_unparseable_month_selects_nothing() {
        let mut model = SelectionModel::new();
        model.select_month(Some("Smarch 2024"), &coffee_and_bus());
        assert_eq!(model.selection(), &Selection::Month("Smarch 2024".into()));
        assert!(model.matches().is_empty());
    }

    #[test]
    fn test_missing_payload_is_a_no_op() {
        let mut model = SelectionModel::new();
        model.select_category(Some("Ulaşım"), &categories(), &coffee_and_bus());
        let before = model.selection().clone();

        model.select_month(None, &coffee_and_bus());
        model.select_category(None, &categories(), &coffee_and_bus());
        assert_eq!(model.selection(), &before);
        assert_eq!(model.matches().len(), 1);
    }

    #[test]
    fn test_select_category_by_name() {
        let mut model = SelectionModel::new();
        model.select_category(Some("Yiyecek & İçecek"), &categories(), &coffee_and_bus());
        assert_eq!(model.matches().len(), 1);
        assert_eq!(model.matches()[0].title, "Coffee");

        model.select_category(Some("ulaşım"), &categories(), &coffee_and_bus());
        assert_eq!(model.matches().len(), 1);
        assert_eq!(model.matches()[0].title, "Bus");
    }

    #[test]
    fn test_unknown_category_selects_nothing() {
        let mut model = SelectionModel::new();
        model.select_category(Some("Pets"), &categories(), &coffee_and_bus());
        assert_eq!(model.selection(), &Selection::Category("Pets".into()));
        assert!(model.matches().is_empty());
    }

    #[test]
    fn test_selections_replace_each_other() {
        let mut model = SelectionModel::new();
        model.select_month(Some("Ocak 2024"), &coffee_and_bus());
        model.select_category(Some("Ulaşım"), &categories(), &coffee_and_bus());
        assert!(matches!(model.selection(), Selection::Category(_)));

        model.select_month(Some("2024-01"), &coffee_and_bus());
        assert!(matches!(model.selection(), Selection::Month(_)));
        assert_eq!(model.matches().len(), 2);
    }

    #[test]
    fn test_recompute_after_refresh() {
        let mut model = SelectionModel::new();
        model.select_month(Some("Ocak 2024"), &coffee_and_bus());

        let mut refreshed = coffee_and_bus();
        refreshed.push(Expense::new("3", "Lunch", Money::from_units(80), "food", date(2024, 1, 20)));
        model.recompute(&refreshed, &categories());
        assert_eq!(model.matches().len(), 3);

        model.clear();
        model.recompute(&refreshed, &categories());
        assert!(model.matches().is_empty());
    }
}
