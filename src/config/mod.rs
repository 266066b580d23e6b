//! Configuration module for tally
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TallyPaths;
pub use settings::Settings;
