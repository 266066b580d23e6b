//! Expense display formatting
//!
//! Tables for expense lists and the detail view of a single expense.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::format::{truncate, DisplayLocale};
use crate::models::{Expense, FilterSummary};
use crate::services::DataCache;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table with resolved category names
pub fn format_expense_table(
    expenses: &[Expense],
    cache: &DataCache,
    locale: &DisplayLocale,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: locale.format_date(e.date),
        title: truncate(&e.title, 32),
        category: cache.category_info(&e.category).to_string(),
        amount: locale.format_money(e.amount),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(4), Alignment::right());
    format!("{}\n", table)
}

/// One-line totals for a filtered list
pub fn format_filter_summary(summary: &FilterSummary, locale: &DisplayLocale) -> String {
    format!(
        "Total: {}  Count: {}  Average/day: {}",
        locale.format_money(summary.total_amount),
        summary.total_count,
        locale.format_money(summary.average_per_day)
    )
}

/// Format a single expense for `expense show`
pub fn format_expense_details(
    expense: &Expense,
    cache: &DataCache,
    locale: &DisplayLocale,
) -> String {
    let category = cache.category_info(&expense.category);
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Title:       {}\n", expense.title));
    output.push_str(&format!("Amount:      {}\n", locale.format_money(expense.amount)));
    output.push_str(&format!("Date:        {}\n", locale.format_date(expense.date)));
    if category.is_unknown() {
        output.push_str(&format!("Category:    {} ({})\n", category, expense.category));
    } else {
        output.push_str(&format!("Category:    {}\n", category));
    }

    if let Some(description) = &expense.description {
        output.push_str(&format!("Description: {}\n", description));
    }
    if let Some(created_at) = expense.created_at {
        output.push_str(&format!(
            "Created:     {}\n",
            created_at.format("%Y-%m-%d %H:%M")
        ));
    }

    output
}
