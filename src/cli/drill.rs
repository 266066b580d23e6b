//! Drill-down CLI commands
//!
//! The command-line counterpart of clicking a chart bar: select a month or a
//! category and list the expenses behind it.

use clap::Subcommand;

use super::load_cache;
use crate::api::ExpenseApi;
use crate::config::Settings;
use crate::display::expense::format_expense_table;
use crate::error::TallyResult;
use crate::models::Money;
use crate::services::SelectionModel;

/// Drill-down subcommands
#[derive(Subcommand)]
pub enum DrillCommands {
    /// Expenses in one month ("Ocak 2024", "January 2024" or "2024-01")
    Month { label: String },
    /// Expenses in one category, by display name
    Category { name: String },
}

/// Handle a drill command
pub fn handle_drill_command<A: ExpenseApi + ?Sized>(
    api: &A,
    settings: &Settings,
    cmd: DrillCommands,
) -> TallyResult<()> {
    let locale = settings.locale();
    let mut cache = load_cache(api);
    cache.load_expenses(api)?;

    let mut selection = SelectionModel::new();
    match cmd {
        DrillCommands::Month { label } => selection.select_month(Some(&label), cache.expenses()),
        DrillCommands::Category { name } => {
            selection.select_category(Some(&name), cache.categories(), cache.expenses())
        }
    }

    if let Some(description) = selection.selection().describe() {
        println!("{}", description);
    }
    print!(
        "{}",
        format_expense_table(selection.matches(), &cache, &locale)
    );
    let total: Money = selection.matches().iter().map(|e| e.amount).sum();
    println!(
        "{} expenses, {}",
        selection.matches().len(),
        locale.format_money(total)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;

    #[test]
    fn test_drill_month_fetches_expenses_once() {
        let api = MockApi::coffee_and_bus();
        handle_drill_command(
            &api,
            &Settings::default(),
            DrillCommands::Month {
                label: "Ocak 2024".into(),
            },
        )
        .unwrap();
        assert_eq!(api.calls(), vec!["categories", "expenses"]);
    }

    #[test]
    fn test_drill_fails_when_expenses_unavailable() {
        let api = MockApi::coffee_and_bus();
        api.fail("expenses");
        let err = handle_drill_command(
            &api,
            &Settings::default(),
            DrillCommands::Category {
                name: "Ulaşım".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_transport());
    }
}
