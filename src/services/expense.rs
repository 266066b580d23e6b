//! Expense service
//!
//! Creation and deletion of expenses. Expenses are never edited in place.

use tracing::info;

use crate::api::ExpenseApi;
use crate::error::{TallyError, TallyResult};
use crate::models::{Category, Expense, ExpenseId, NewExpense};

/// Service for expense management
pub struct ExpenseService<'a, A: ExpenseApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: ExpenseApi + ?Sized> ExpenseService<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Validate and submit a new expense.
    ///
    /// When `known` is non-empty the category must be one of them.
    pub fn create(&self, input: NewExpense, known: &[Category]) -> TallyResult<Expense> {
        let input = input.normalized();
        input
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        if !known.is_empty() && !known.iter().any(|c| c.id == input.category) {
            return Err(TallyError::category_not_found(input.category.as_str()));
        }

        let expense = self.api.create_expense(&input)?;
        info!(id = %expense.id, amount = %expense.amount, "created expense");
        Ok(expense)
    }

    pub fn get(&self, id: &ExpenseId) -> TallyResult<Expense> {
        self.api.expense(id)
    }

    pub fn delete(&self, id: &ExpenseId) -> TallyResult<()> {
        self.api.delete_expense(id)?;
        info!(%id, "deleted expense");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{date, MockApi};
    use crate::models::Money;

    fn input(title: &str, cents: i64, category: &str) -> NewExpense {
        NewExpense {
            title: title.into(),
            amount: Money::from_cents(cents),
            category: category.into(),
            description: Some("  ".into()),
            date: date(2024, 3, 1),
        }
    }

    #[test]
    fn test_create_expense() {
        let api = MockApi::coffee_and_bus();
        let service = ExpenseService::new(&api);

        let expense = service
            .create(input("  Market ", 12345, "shopping"), &Category::defaults())
            .unwrap();
        assert_eq!(expense.title, "Market");
        assert!(expense.description.is_none());
        assert_eq!(api.expenses.borrow().len(), 3);
    }

    #[test]
    fn test_create_rejects_invalid_input_without_calling_backend() {
        let api = MockApi::coffee_and_bus();
        let service = ExpenseService::new(&api);

        let err = service.create(input("   ", 100, "food"), &[]).unwrap_err();
        assert!(err.is_validation());

        let err = service.create(input("Tea", 0, "food"), &[]).unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create(input("Tea", 100, "pets"), &Category::defaults())
            .unwrap_err();
        assert!(err.is_not_found());

        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_create_with_unloaded_categories_trusts_backend() {
        let api = MockApi::coffee_and_bus();
        let service = ExpenseService::new(&api);
        assert!(service.create(input("Tea", 100, "pets"), &[]).is_ok());
    }

    #[test]
    fn test_get_and_delete() {
        let api = MockApi::coffee_and_bus();
        let service = ExpenseService::new(&api);

        assert_eq!(service.get(&"2".into()).unwrap().title, "Bus");
        service.delete(&"2".into()).unwrap();
        assert!(service.get(&"2".into()).unwrap_err().is_not_found());
        assert!(service.delete(&"2".into()).unwrap_err().is_not_found());
    }
}
