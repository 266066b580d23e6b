//! Terminal User Interface module
//!
//! The interactive dashboard: a filtered expense table, a monthly bar chart
//! and a category breakdown that drill down on Enter, plus dialogs for
//! adding, deleting, filtering and importing.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
