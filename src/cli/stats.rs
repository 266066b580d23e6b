//! Statistics CLI commands
//!
//! Prints the backend's aggregate endpoints.

use clap::Subcommand;

use super::load_cache;
use crate::api::ExpenseApi;
use crate::config::Settings;
use crate::display::stats::{format_advisory, format_monthly, format_stats_summary, format_trends};
use crate::error::TallyResult;
use crate::models::AdvisoryKind;

/// Statistics subcommands
#[derive(Subcommand)]
pub enum StatsCommands {
    /// Overall total and per-category breakdown
    Summary,
    /// Monthly totals
    Monthly,
    /// Per-category monthly trends
    Trends,
    /// Spending insights
    Insights,
    /// Spending predictions
    Predictions,
    /// Category limit warnings
    Limits,
}

/// Handle a stats command
pub fn handle_stats_command<A: ExpenseApi + ?Sized>(
    api: &A,
    settings: &Settings,
    cmd: StatsCommands,
) -> TallyResult<()> {
    let locale = settings.locale();

    match cmd {
        StatsCommands::Summary => {
            let cache = load_cache(api);
            let summary = api.stats_summary()?;
            print!("{}", format_stats_summary(&summary, &cache, &locale));
        }
        StatsCommands::Monthly => {
            print!("{}", format_monthly(&api.stats_monthly()?, &locale));
        }
        StatsCommands::Trends => {
            print!("{}", format_trends(&api.stats_trends()?, &locale));
        }
        StatsCommands::Insights => print_advisory(api, AdvisoryKind::Insights)?,
        StatsCommands::Predictions => print_advisory(api, AdvisoryKind::Predictions)?,
        StatsCommands::Limits => print_advisory(api, AdvisoryKind::Limits)?,
    }

    Ok(())
}

fn print_advisory<A: ExpenseApi + ?Sized>(api: &A, kind: AdvisoryKind) -> TallyResult<()> {
    let advisory = api.advisory(kind)?;
    print!("{}", format_advisory(kind, &advisory));
    Ok(())
}
