use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tally_cli::api::HttpApi;
use tally_cli::cli::{
    handle_category_command, handle_drill_command, handle_expense_command, handle_stats_command,
    handle_upload_command,
};
use tally_cli::config::{paths::TallyPaths, settings::Settings};
use tally_cli::logging;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Terminal client for a personal expense tracker",
    long_about = "tally records, filters and imports expenses kept by an expense \
                  tracker backend. Use the subcommands for scripting or launch the \
                  interactive dashboard with 'tally tui'."
)]
struct Cli {
    /// Backend base URL, e.g. http://localhost:8001/api
    #[arg(long, global = true, env = "TALLY_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Tui,

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(tally_cli::cli::ExpenseCommands),

    /// Category commands
    #[command(subcommand)]
    Category(tally_cli::cli::CategoryCommands),

    /// Statistics from the backend
    #[command(subcommand)]
    Stats(tally_cli::cli::StatsCommands),

    /// List the expenses behind a month or category
    #[command(subcommand)]
    Drill(tally_cli::cli::DrillCommands),

    /// Import a CSV, Excel (.xlsx/.xls) or PDF file
    Upload {
        /// File to import
        file: PathBuf,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?.with_api_url(cli.api_url);

    if matches!(cli.command, Some(Commands::Tui)) {
        paths.ensure_directories()?;
        logging::init_file_tracing(&paths.log_file());
    } else {
        logging::init_tracing();
    }

    match cli.command {
        Some(Commands::Tui) => {
            let api = HttpApi::from_settings(&settings)?;
            tally_cli::tui::run_tui(&api, &settings)?;
        }
        Some(Commands::Expense(cmd)) => {
            let api = HttpApi::from_settings(&settings)?;
            handle_expense_command(&api, &settings, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let api = HttpApi::from_settings(&settings)?;
            handle_category_command(&api, cmd)?;
        }
        Some(Commands::Stats(cmd)) => {
            let api = HttpApi::from_settings(&settings)?;
            handle_stats_command(&api, &settings, cmd)?;
        }
        Some(Commands::Drill(cmd)) => {
            let api = HttpApi::from_settings(&settings)?;
            handle_drill_command(&api, &settings, cmd)?;
        }
        Some(Commands::Upload { file }) => {
            let api = HttpApi::from_settings(&settings)?;
            handle_upload_command(&api, &settings, &file)?;
        }
        Some(Commands::Config) => {
            println!("tally Configuration");
            println!("===================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("TUI log file:     {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  API base URL:      {}", settings.api_base_url);
            println!("  Request timeout:   {}s", settings.request_timeout_secs);
            println!("  Currency:          {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Language:          {:?}", settings.language);
            println!("  Filter debounce:   {}ms", settings.filter_debounce_ms);
            println!("  Average divisor:   {:?}", settings.average_divisor);
            println!("  Remote filtering:  {}", settings.remote_filtering);
        }
        None => {
            println!("tally - Terminal client for a personal expense tracker");
            println!();
            println!("Run 'tally --help' for usage information.");
            println!("Run 'tally tui' to launch the interactive dashboard.");
        }
    }

    Ok(())
}
