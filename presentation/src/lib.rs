//! Presentation layer for consilium
//!
//! CLI argument definitions, console output formatting, and progress
//! display implementations.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::{Cli, OutputFormat};
pub use output::ConsoleFormatter;
pub use progress::{ProgressReporter, SimpleProgress};
