//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP client (with per-request timeout)
//! - Rate limiter
//! - Concurrency semaphore
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod rate_limiter;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use rate_limiter::{init_rate_limiter, RateLimiter};

/// Initializes a semaphore for controlling concurrency.
///
/// Creates a new semaphore with the specified permit count. This semaphore is
/// used to limit the number of concurrent line-processing workers.
///
/// # Arguments
///
/// * `count` - Maximum number of concurrent operations allowed
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
