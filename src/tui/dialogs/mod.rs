//! Dialog modules for the TUI
//!
//! Contains modal dialogs for various operations

pub mod confirm;
pub mod expense;
pub mod filter;
pub mod help;
pub mod upload;
