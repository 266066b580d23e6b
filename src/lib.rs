//! tally - Terminal client for a personal expense tracker
//!
//! This library provides the core functionality for the `tally` command:
//! recording and deleting expenses, filtering them, drilling into monthly and
//! per-category charts, and importing bank statements. Storage, file parsing
//! and statistics live in a REST backend; this crate is the client.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `api`: The backend REST contract and its HTTP implementation
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Data models (expenses, categories, filters, stats, uploads)
//! - `services`: Filter engine, selection, data cache, imports, dashboard
//! - `state`: Dashboard state and its reducer
//! - `display`: Terminal formatting
//! - `export`: CSV/JSON/YAML export of filtered views
//! - `cli`: Command handlers
//! - `tui`: Interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use tally_cli::api::HttpApi;
//! use tally_cli::config::{paths::TallyPaths, settings::Settings};
//! use tally_cli::services::Dashboard;
//!
//! let paths = TallyPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let api = HttpApi::from_settings(&settings)?;
//! let mut dashboard = Dashboard::new(&api, &settings);
//! dashboard.start();
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;
pub mod tui;

pub use error::{TallyError, TallyResult};
