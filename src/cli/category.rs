//! Category CLI commands

use clap::Subcommand;

use crate::api::ExpenseApi;
use crate::display::category::format_category_list;
use crate::error::TallyResult;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,
}

/// Handle a category command
pub fn handle_category_command<A: ExpenseApi + ?Sized>(
    api: &A,
    cmd: CategoryCommands,
) -> TallyResult<()> {
    match cmd {
        CategoryCommands::List => {
            let categories = api.categories()?;
            print!("{}", format_category_list(&categories));
        }
    }

    Ok(())
}
