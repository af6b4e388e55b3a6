//! Error type definitions.
//!
//! This module defines all error and warning types used throughout the
//! application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for a single domain's index fetch.
///
/// A fetch error is terminal for that one domain only; in multi-domain
/// runs it is reported and iteration continues with the next domain.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connection, DNS, read).
    #[error("failed to fetch index: {0}")]
    Transport(#[from] ReqwestError),

    /// The index responded with a non-200 status.
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The request exceeded the configured timeout.
    #[error("request timed out after {0} seconds")]
    Timeout(u64),
}

/// Types of errors that can occur while processing a domain.
///
/// This enum categorizes actual error conditions - failures that prevent
/// a domain's index from being retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Transport-level fetch failure.
    FetchTransport,
    /// Non-200 response from the index.
    FetchStatus,
    /// Fetch exceeded the configured timeout.
    FetchTimeout,
}

impl ErrorType {
    /// Categorizes a `FetchError` for statistics tracking.
    pub fn from_fetch_error(error: &FetchError) -> Self {
        match error {
            FetchError::Transport(_) => ErrorType::FetchTransport,
            FetchError::Status(_) => ErrorType::FetchStatus,
            FetchError::Timeout(_) => ErrorType::FetchTimeout,
        }
    }
}

/// Types of non-fatal anomalies encountered while parsing index records.
///
/// Warnings never abort the run: the offending line is skipped or the
/// filter is disabled, and the rest of the pipeline proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    /// Index line with fewer than 3 whitespace-separated fields.
    MalformedLine,
    /// Record timestamp that does not parse as `YYYYMMDDhhmmss`.
    UnparsableTimestamp,
    /// Invalid `--filter` pattern; filtering was disabled for the run.
    InvalidRegexFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let error = FetchError::Status(503);
        assert_eq!(error.to_string(), "HTTP error: 503");

        let error = FetchError::Timeout(30);
        assert_eq!(error.to_string(), "request timed out after 30 seconds");
    }

    #[test]
    fn test_error_type_categorization() {
        assert_eq!(
            ErrorType::from_fetch_error(&FetchError::Status(500)),
            ErrorType::FetchStatus
        );
        assert_eq!(
            ErrorType::from_fetch_error(&FetchError::Timeout(5)),
            ErrorType::FetchTimeout
        );
    }
}
