//! Shared helpers for integration tests.

use std::io::Write;

use tempfile::NamedTempFile;
use wayback_index::Config;

/// Builds a CDX response body from `(url, length, timestamp)` rows.
pub fn cdx_body(rows: &[(&str, &str, &str)]) -> String {
    rows.iter()
        .map(|(url, length, timestamp)| format!("{} {} {}", url, length, timestamp))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes target domains to a temporary input file, one per line.
pub fn write_domains_file(domains: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for domain in domains {
        writeln!(file, "{}", domain).expect("Failed to write domain");
    }
    file.flush().expect("Failed to flush file");
    file
}

/// A quiet base configuration for tests: no rate limiting, short timeout.
pub fn base_config() -> Config {
    Config {
        rate_limit_rps: 0,
        timeout_seconds: 5,
        ..Config::default()
    }
}
