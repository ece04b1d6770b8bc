//! Core application functionality
//!
//! This module contains the application shell around the font tools:
//! - CLI parsing and validation
//! - User configuration file
//! - Error types
//! - Command runners

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use errors::{AnchorEditError, AnchorNameError, DataWarning, EditError, RecomposeError};
pub use runner::run_app;
