//! Configuration types.
//!
//! This module defines the enums and structs that describe a single run:
//! the query mode, output format, logging options, and the immutable
//! `Config` snapshot passed into every component.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_RATE_LIMIT_RPS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// The primary query mode.
///
/// Exactly one mode is active per run. The mode is resolved once during
/// configuration validation, so an invalid multi-mode combination can never
/// reach the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryMode {
    /// Emit the raw archived URLs, one per line (default).
    Urls,
    /// Emit browsable snapshot replay links, one per line.
    Browsable,
    /// Emit the unique, sorted subdomains discovered in the archived URLs.
    Subdomains,
    /// Emit full records with metadata, serialized per the output format.
    Records,
}

/// Output serialization format for records mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One value per line (URL or browsable link).
    Text,
    /// `URL,LENGTH,TIMESTAMP,DATE` rows with a header.
    Csv,
    /// A single `{"results": [...], "count": N}` object.
    Json,
    /// A `<wayback>` document with one `<result>` element per record.
    Xml,
}

/// Inclusive date range restricting which snapshots are emitted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DateRange {
    /// Earliest admissible capture time; `None` leaves the range open at the start.
    pub start: Option<DateTime<Utc>>,
    /// Latest admissible capture time.
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Returns whether a record's capture time falls inside the range.
    ///
    /// A record whose timestamp failed to parse (`None`) is excluded: the
    /// caller only consults the range when date filtering is active.
    pub fn contains(&self, date: Option<DateTime<Utc>>) -> bool {
        match date {
            Some(d) => self.start.map_or(true, |s| d >= s) && d <= self.end,
            None => false,
        }
    }
}

/// Immutable snapshot of all run parameters.
///
/// Built once per invocation (normally via `Config::try_from(Opt)`) and
/// passed by shared reference into every component; no component mutates it.
///
/// # Examples
///
/// ```no_run
/// use wayback_index::Config;
///
/// let config = Config {
///     domain: Some("example.com".to_string()),
///     concurrent: 20,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Single target domain (mutually exclusive with `input_file`).
    pub domain: Option<String>,

    /// File to read target domains from, one per line; `-` reads stdin.
    pub input_file: Option<PathBuf>,

    /// Output file; `None` writes to standard output.
    pub output: Option<PathBuf>,

    /// Active query mode.
    pub mode: QueryMode,

    /// Output serialization format.
    pub format: OutputFormat,

    /// Drop repeated URLs within a domain's result set.
    pub unique_urls: bool,

    /// Regex pattern retained URLs must match; invalid patterns disable
    /// filtering rather than failing the run.
    pub regex_filter: Option<String>,

    /// Restrict output to snapshots captured inside this range.
    pub date_range: Option<DateRange>,

    /// Maximum number of records to emit per domain (0 = unlimited).
    pub max_results: usize,

    /// Number of concurrent line-processing workers per domain.
    pub concurrent: usize,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,

    /// Maximum upstream requests per second across all domains (0 disables).
    pub rate_limit_rps: u32,

    /// Emit diagnostic detail for skipped lines and a run summary.
    pub verbose: bool,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: None,
            input_file: None,
            output: None,
            mode: QueryMode::Urls,
            format: OutputFormat::Text,
            unique_urls: false,
            regex_filter: None,
            date_range: None,
            max_results: 0,
            concurrent: DEFAULT_CONCURRENCY,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            rate_limit_rps: DEFAULT_RATE_LIMIT_RPS,
            verbose: false,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.mode, QueryMode::Urls);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.concurrent, DEFAULT_CONCURRENCY);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.rate_limit_rps, DEFAULT_RATE_LIMIT_RPS);
        assert_eq!(config.max_results, 0);
        assert!(!config.unique_urls);
        assert!(config.date_range.is_none());
    }

    #[test]
    fn test_date_range_contains() {
        let range = DateRange {
            start: Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
            end: Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap(),
        };

        let inside = Utc.with_ymd_and_hms(2023, 6, 15, 12, 0, 0).unwrap();
        let before = Utc.with_ymd_and_hms(2022, 6, 15, 12, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        assert!(range.contains(Some(inside)));
        assert!(!range.contains(Some(before)));
        assert!(!range.contains(Some(after)));
        // Boundary values are inclusive
        assert!(range.contains(Some(range.end)));
        assert!(range.contains(range.start));
    }

    #[test]
    fn test_date_range_open_start() {
        let range = DateRange {
            start: None,
            end: Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap(),
        };
        let ancient = Utc.with_ymd_and_hms(1996, 1, 1, 0, 0, 0).unwrap();
        assert!(range.contains(Some(ancient)));
    }

    #[test]
    fn test_date_range_excludes_unparsed_dates() {
        let range = DateRange {
            start: None,
            end: Utc::now(),
        };
        assert!(!range.contains(None));
    }
}
