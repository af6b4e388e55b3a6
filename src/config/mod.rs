//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoint, timeouts, defaults)
//! - CLI option types and parsing
//! - The validated, immutable `Config` passed into every component

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::Opt;
pub use constants::*;
pub use types::{Config, DateRange, LogFormat, LogLevel, OutputFormat, QueryMode};
