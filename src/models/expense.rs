//! Expense model
//!
//! An expense is a single recorded spend. Expenses are created through the
//! backend (form submission or file import) and deleted by explicit command;
//! the client never edits one in place.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// A recorded expense as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    pub title: String,

    /// Always positive
    pub amount: Money,

    pub category: CategoryId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Calendar date of the spend, no time component
    pub date: NaiveDate,

    /// Server-side creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Expense {
    pub fn new(
        id: impl Into<ExpenseId>,
        title: impl Into<String>,
        amount: Money,
        category: impl Into<CategoryId>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            amount,
            category: category.into(),
            description: None,
            date,
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Case-insensitive substring match on title or description.
    /// `needle` must already be folded with [`fold_case`].
    pub fn matches_text(&self, needle: &str) -> bool {
        fold_case(&self.title).contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| fold_case(d).contains(needle))
    }
}

/// Lowercase for matching. `İ` folds to a plain `i` so that
/// "İSTANBUL" and "istanbul" compare equal.
pub fn fold_case(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            'İ' => 'i'.to_lowercase(),
            other => other.to_lowercase(),
        })
        .collect()
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.title,
            self.amount
        )
    }
}

/// Body of `POST /expenses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub title: String,
    pub amount: Money,
    pub category: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl NewExpense {
    /// Validate the submission before it leaves the client
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.category.as_str().trim().is_empty() {
            return Err(ExpenseValidationError::MissingCategory);
        }
        Ok(())
    }

    /// Trimmed copy with blank descriptions dropped
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self
    }
}

/// Validation errors for new expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyTitle,
    NonPositiveAmount(Money),
    MissingCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Expense title cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive (got {})", amount)
            }
            Self::MissingCategory => write!(f, "Expense needs a category"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deserialize_backend_payload() {
        let json = r#"{
            "id": "1f0c",
            "title": "Coffee",
            "amount": 50.0,
            "category": "food",
            "description": null,
            "date": "2024-01-05",
            "created_at": "2024-01-05T09:30:00.123456"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount, Money::from_units(50));
        assert_eq!(expense.date, date(2024, 1, 5));
        assert!(expense.description.is_none());
        assert!(expense.created_at.is_some());
    }

    #[test]
    fn test_matches_text() {
        let expense = Expense::new("1", "Coffee", Money::from_units(5), "food", date(2024, 1, 5))
            .with_description("Starbucks Kadıköy");
        assert!(expense.matches_text("coff"));
        assert!(expense.matches_text("starbucks"));
        assert!(!expense.matches_text("bus"));
    }

    #[test]
    fn test_matches_text_folds_dotted_capital_i() {
        let expense = Expense::new(
            "1",
            "İSTANBUL KART",
            Money::from_units(20),
            "transport",
            date(2024, 1, 5),
        );
        assert!(expense.matches_text("istanbul"));
        assert!(expense.matches_text(&fold_case("İstanbul")));
        assert_eq!(fold_case("İZMİR"), "izmir");
    }

    #[test]
    fn test_new_expense_validation() {
        let valid = NewExpense {
            title: "Bus".into(),
            amount: Money::from_units(20),
            category: "transport".into(),
            description: None,
            date: date(2024, 1, 10),
        };
        assert!(valid.validate().is_ok());

        let mut empty = valid.clone();
        empty.title = "   ".into();
        assert_eq!(empty.validate(), Err(ExpenseValidationError::EmptyTitle));

        let mut zero = valid.clone();
        zero.amount = Money::zero();
        assert!(matches!(
            zero.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));

        let mut uncategorized = valid;
        uncategorized.category = "".into();
        assert_eq!(
            uncategorized.validate(),
            Err(ExpenseValidationError::MissingCategory)
        );
    }

    #[test]
    fn test_new_expense_body_shape() {
        let body = NewExpense {
            title: " Bus ".into(),
            amount: Money::from_cents(2050),
            category: "transport".into(),
            description: Some("  ".into()),
            date: date(2024, 1, 10),
        }
        .normalized();

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["title"], "Bus");
        assert_eq!(json["amount"], 20.5);
        assert_eq!(json["date"], "2024-01-10");
        assert!(json.get("description").is_none());
    }
}
