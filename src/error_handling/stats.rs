//! Processing statistics tracking.
//!
//! This module provides thread-safe statistics tracking for errors and
//! warnings encountered during index processing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;
use strum::IntoEnumIterator;

use super::types::{ErrorType, WarningType};

/// Thread-safe processing statistics tracker.
///
/// Tracks errors and warnings using atomic counters, allowing concurrent
/// access from multiple tasks. All types are initialized to zero on creation.
///
/// # Categories
///
/// - **Errors**: Fetch failures that prevent a domain from being processed
/// - **Warnings**: Non-fatal parse anomalies (skipped lines, disabled filter)
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across multiple tasks using `Arc`.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    warnings: HashMap<WarningType, AtomicUsize>,
}

impl ProcessingStats {
    /// Creates a tracker with every counter initialized to zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        let mut warnings = HashMap::new();
        for warning in WarningType::iter() {
            warnings.insert(warning, AtomicUsize::new(0));
        }

        ProcessingStats { errors, warnings }
    }

    /// Increment an error counter.
    ///
    /// All error types are initialized in the constructor; a missing entry
    /// indicates a bug, so it is logged rather than panicking.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                error
            );
        }
    }

    /// Increment a warning counter.
    pub fn increment_warning(&self, warning: WarningType) {
        if let Some(counter) = self.warnings.get(&warning) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment warning counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                warning
            );
        }
    }

    /// Current count for one error type.
    pub fn error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map_or(0, |counter| counter.load(Ordering::Relaxed))
    }

    /// Current count for one warning type.
    pub fn warning_count(&self, warning: WarningType) -> usize {
        self.warnings
            .get(&warning)
            .map_or(0, |counter| counter.load(Ordering::Relaxed))
    }

    /// Sum of all error counters.
    pub fn total_errors(&self) -> usize {
        self.errors
            .values()
            .map(|counter| counter.load(Ordering::Relaxed))
            .sum()
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Logs the non-zero error and warning counts at the end of a run.
pub fn print_statistics(stats: &ProcessingStats) {
    let total_errors = stats.total_errors();
    let total_warnings: usize = WarningType::iter().map(|w| stats.warning_count(w)).sum();
    if total_errors == 0 && total_warnings == 0 {
        info!("No errors or warnings during processing");
        return;
    }

    if total_errors > 0 {
        info!("Errors ({} total):", total_errors);
        for error in ErrorType::iter() {
            let count = stats.error_count(error);
            if count > 0 {
                info!("  {:?}: {}", error, count);
            }
        }
    }
    if total_warnings > 0 {
        info!("Warnings ({} total):", total_warnings);
        for warning in WarningType::iter() {
            let count = stats.warning_count(warning);
            if count > 0 {
                info!("  {:?}: {}", warning, count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = ProcessingStats::new();
        for error in ErrorType::iter() {
            assert_eq!(stats.error_count(error), 0);
        }
        for warning in WarningType::iter() {
            assert_eq!(stats.warning_count(warning), 0);
        }
        assert_eq!(stats.total_errors(), 0);
    }

    #[test]
    fn test_increment_counters() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::FetchStatus);
        stats.increment_error(ErrorType::FetchStatus);
        stats.increment_warning(WarningType::MalformedLine);

        assert_eq!(stats.error_count(ErrorType::FetchStatus), 2);
        assert_eq!(stats.error_count(ErrorType::FetchTransport), 0);
        assert_eq!(stats.warning_count(WarningType::MalformedLine), 1);
        assert_eq!(stats.total_errors(), 2);
    }

    #[test]
    fn test_concurrent_increments() {
        use std::sync::Arc;

        let stats = Arc::new(ProcessingStats::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    stats.increment_warning(WarningType::UnparsableTimestamp);
                }
            }));
        }
        for handle in handles {
            handle.join().expect("thread panicked");
        }
        assert_eq!(stats.warning_count(WarningType::UnparsableTimestamp), 800);
    }
}
