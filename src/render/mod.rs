//! Output rendering.
//!
//! Serializes a domain's final result set into the selected output encoding
//! and writes it to a caller-supplied sink. The core never decides *where*
//! output goes, only what bytes to write. Write errors are surfaced to the
//! caller, never swallowed.

mod csv;
mod json;
mod text;
mod xml;

use std::io::Write;

use anyhow::Result;

use crate::aggregate::RunResult;
use crate::config::{Config, OutputFormat, QueryMode};

pub use self::csv::write_csv;
pub use self::json::write_json;
pub use self::text::{write_subdomains, write_urls};
pub use self::xml::write_xml;

/// Renders a domain's result set into the configured encoding.
///
/// Consumes the result: ownership transfers to the renderer once
/// aggregation is complete.
///
/// # Errors
///
/// Returns an error when writing to the sink fails (closed sink, disk
/// full, encoding failure).
pub fn render(result: RunResult, config: &Config, sink: &mut dyn Write) -> Result<()> {
    match config.mode {
        QueryMode::Subdomains => write_subdomains(&result, sink),
        QueryMode::Urls => write_urls(&result, false, sink),
        QueryMode::Browsable => write_urls(&result, true, sink),
        QueryMode::Records => match config.format {
            OutputFormat::Csv => write_csv(&result, sink),
            OutputFormat::Json => write_json(&result, sink),
            OutputFormat::Xml => write_xml(&result, sink),
            OutputFormat::Text => write_urls(&result, false, sink),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_line;

    pub(super) fn sample_result() -> RunResult {
        let records: Vec<_> = [
            "http://example.com/a 1024 20230101120000",
            "http://sub.example.com/b,c 2048 20230615080910",
            "http://example.com/undated 0 bad-timestamp",
        ]
        .iter()
        .map(|line| parse_line(line).expect("sample line should parse"))
        .collect();
        let count = records.len();
        RunResult { records, count }
    }

    #[test]
    fn test_render_dispatches_on_mode() {
        let config = Config {
            mode: QueryMode::Records,
            format: OutputFormat::Json,
            ..Config::default()
        };
        let mut sink = Vec::new();
        render(sample_result(), &config, &mut sink).expect("render should succeed");
        let output = String::from_utf8(sink).expect("utf8");
        assert!(output.starts_with('{'));
    }

    #[test]
    fn test_render_surfaces_write_errors() {
        struct FailingSink;
        impl std::io::Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "sink closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "sink closed"))
            }
        }

        let config = Config::default();
        let mut sink = FailingSink;
        let result = render(sample_result(), &config, &mut sink);
        assert!(result.is_err(), "write failures must be surfaced");
    }
}
