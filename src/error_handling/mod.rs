//! Error handling and statistics.
//!
//! This module provides typed errors for initialization and fetch failures,
//! plus thread-safe counters categorizing everything that went wrong (or
//! was skipped) during a run.

mod stats;
mod types;

pub use stats::{print_statistics, ProcessingStats};
pub use types::{ErrorType, FetchError, InitializationError, WarningType};
