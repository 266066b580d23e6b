//! Expense CLI commands
//!
//! Implements CLI commands for listing, adding, showing and deleting
//! expenses.

use clap::{Subcommand, ValueEnum};

use super::{load_cache, parse_amount, parse_date, resolve_category};
use crate::api::ExpenseApi;
use crate::config::Settings;
use crate::display::expense::{format_expense_details, format_expense_table, format_filter_summary};
use crate::error::{TallyError, TallyResult};
use crate::export::{export_view_csv, export_view_json, export_view_yaml};
use crate::models::{ExpenseId, FilterSpec, NewExpense};
use crate::services::{ExpenseService, FilterEngine, FilterService};

/// Output format for expense lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
    Yaml,
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses, optionally filtered
    List {
        /// Text to find in title or description
        #[arg(short, long)]
        search: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Minimum amount (inclusive)
        #[arg(long)]
        min: Option<String>,
        /// Maximum amount (inclusive)
        #[arg(long)]
        max: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Number of expenses to show (the summary covers all matches)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Add a new expense
    Add {
        /// Short title
        title: String,
        /// Amount (e.g. "50", "12.50" or "1.234,56")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
    },
    /// Show expense details
    Show {
        /// Expense ID
        id: String,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command<A: ExpenseApi + ?Sized>(
    api: &A,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TallyResult<()> {
    let locale = settings.locale();
    let service = ExpenseService::new(api);

    match cmd {
        ExpenseCommands::List {
            search,
            category,
            min,
            max,
            from,
            to,
            limit,
            format,
        } => {
            let cache = load_cache(api);

            let mut spec = FilterSpec::new();
            if let Some(search) = search {
                spec = spec.search(search);
            }
            if let Some(category) = &category {
                spec = spec.category(resolve_category(&cache, category)?);
            }
            if let Some(min) = &min {
                spec = spec.min_amount(parse_amount(min)?);
            }
            if let Some(max) = &max {
                spec = spec.max_amount(parse_amount(max)?);
            }
            if let Some(from) = &from {
                spec = spec.start_date(parse_date(from)?);
            }
            if let Some(to) = &to {
                spec = spec.end_date(parse_date(to)?);
            }

            let filter_service = FilterService::new(api, FilterEngine::new(settings.average_divisor))
                .remote(settings.remote_filtering);
            let cached = if settings.remote_filtering && spec.needs_remote() {
                Vec::new()
            } else {
                api.expenses()?
            };
            let mut view = filter_service.run(&spec, &cached)?;

            let total = view.expenses.len();
            if let Some(limit) = limit {
                view.expenses.truncate(limit);
            }

            let stdout = std::io::stdout();
            match format {
                OutputFormat::Table => {
                    print!("{}", format_expense_table(&view.expenses, &cache, &locale));
                    println!("{}", format_filter_summary(&view.summary, &locale));
                    if view.expenses.len() < total {
                        println!("Showing {} of {} expenses", view.expenses.len(), total);
                    }
                }
                OutputFormat::Csv => export_view_csv(&view, &cache, stdout.lock())?,
                OutputFormat::Json => export_view_json(&spec, &view, &cache, &mut stdout.lock())?,
                OutputFormat::Yaml => export_view_yaml(&spec, &view, &cache, &mut stdout.lock())?,
            }
        }

        ExpenseCommands::Add {
            title,
            amount,
            category,
            date,
            description,
        } => {
            let cache = load_cache(api);
            let input = NewExpense {
                title,
                amount: parse_amount(&amount)?,
                category: resolve_category(&cache, &category)?,
                description,
                date: match date {
                    Some(date) => parse_date(&date)?,
                    None => chrono::Local::now().date_naive(),
                },
            };

            let expense = service.create(input, cache.categories())?;
            println!("Created expense:");
            print!("{}", format_expense_details(&expense, &cache, &locale));
        }

        ExpenseCommands::Show { id } => {
            let cache = load_cache(api);
            let expense = service.get(&ExpenseId::new(id.trim()))?;
            print!("{}", format_expense_details(&expense, &cache, &locale));
        }

        ExpenseCommands::Delete { id, force } => {
            let id = ExpenseId::new(id.trim());
            if !force {
                let cache = load_cache(api);
                let expense = service.get(&id)?;
                println!("About to delete expense:");
                print!("{}", format_expense_details(&expense, &cache, &locale));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service.delete(&id).map_err(|e| match e {
                TallyError::NotFound { .. } => TallyError::expense_not_found(id.as_str()),
                other => other,
            })?;
            println!("Deleted expense: {}", id);
        }
    }

    Ok(())
}
