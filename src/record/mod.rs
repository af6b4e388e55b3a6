//! Index record parsing and URL filtering.
//!
//! One line of the CDX index response holds three whitespace-separated
//! fields: the original URL, the recorded content length, and a 14-digit
//! capture timestamp. Parsing failures are never fatal: malformed lines are
//! skipped, and a timestamp that does not parse leaves the derived date
//! empty without dropping the record.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::Serialize;

use crate::config::TIMESTAMP_FORMAT;

/// One snapshot entry from the archive index.
///
/// Records are immutable once constructed; derived values (browsable links,
/// hosts) are produced as new strings rather than by mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchiveRecord {
    /// Original URL as indexed by the archive.
    pub url: String,
    /// Recorded content length, kept verbatim (the upstream value is not
    /// guaranteed to be numeric).
    pub length: String,
    /// Capture time in 14-digit `YYYYMMDDhhmmss` form.
    pub timestamp: String,
    /// Parsed form of `timestamp`; `None` when parsing failed.
    pub date: Option<DateTime<Utc>>,
}

impl ArchiveRecord {
    /// The capture time as an RFC 3339 string, or empty when the timestamp
    /// did not parse.
    pub fn date_rfc3339(&self) -> String {
        self.date
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default()
    }
}

/// A record paired with the index of the response line it came from.
///
/// Line workers run concurrently, so arrival order at the fan-in channel is
/// arbitrary; the index lets the aggregator restore upstream response order.
#[derive(Debug)]
pub struct IndexedRecord {
    /// Zero-based position of the source line in the response body.
    pub index: usize,
    /// The parsed record.
    pub record: ArchiveRecord,
}

/// Parses one line of the index response.
///
/// Returns `None` for blank lines and lines with fewer than 3
/// whitespace-separated fields; this is a skip signal, not an error. Extra
/// fields beyond the first three are ignored.
pub fn parse_line(line: &str) -> Option<ArchiveRecord> {
    let mut fields = line.split_whitespace();
    let (url, length, timestamp) = match (fields.next(), fields.next(), fields.next()) {
        (Some(url), Some(length), Some(timestamp)) => (url, length, timestamp),
        _ => return None,
    };

    Some(ArchiveRecord {
        url: url.to_string(),
        length: length.to_string(),
        timestamp: timestamp.to_string(),
        date: parse_timestamp(timestamp),
    })
}

/// Parses a 14-digit capture timestamp into a UTC datetime.
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// URL filter compiled once per run from the `--filter` pattern.
///
/// An invalid pattern fails open: filtering is disabled for the run rather
/// than aborting it over a cosmetic input mistake.
pub struct UrlFilter {
    regex: Option<Regex>,
}

impl UrlFilter {
    /// Compiles the filter pattern, if any.
    ///
    /// An invalid pattern is logged and treated as "no filtering".
    pub fn compile(pattern: Option<&str>) -> Self {
        let regex = pattern.and_then(|p| match Regex::new(p) {
            Ok(regex) => Some(regex),
            Err(e) => {
                log::warn!("Invalid regex filter {:?}, matching all URLs: {}", p, e);
                None
            }
        });
        UrlFilter { regex }
    }

    /// Whether a pattern was supplied and compiled successfully.
    pub fn is_active(&self) -> bool {
        self.regex.is_some()
    }

    /// Whether a URL passes the filter; always true when inactive.
    pub fn matches(&self, url: &str) -> bool {
        self.regex.as_ref().map_or(true, |regex| regex.is_match(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_line_well_formed() {
        let record = parse_line("http://example.com/page 1024 20230101120000")
            .expect("well-formed line should parse");
        assert_eq!(record.url, "http://example.com/page");
        assert_eq!(record.length, "1024");
        assert_eq!(record.timestamp, "20230101120000");
        assert_eq!(
            record.date,
            Some(Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_line_skips_short_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("http://example.com").is_none());
        assert!(parse_line("http://example.com 1024").is_none());
    }

    #[test]
    fn test_parse_line_ignores_extra_fields() {
        let record = parse_line("http://example.com 1024 20230101120000 trailing junk")
            .expect("line with extra fields should still parse");
        assert_eq!(record.timestamp, "20230101120000");
    }

    #[test]
    fn test_parse_line_keeps_record_on_bad_timestamp() {
        let record = parse_line("http://example.com 1024 not-a-timestamp")
            .expect("record must survive an unparseable timestamp");
        assert_eq!(record.url, "http://example.com");
        assert!(record.date.is_none());
        assert_eq!(record.date_rfc3339(), "");
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_timestamp("20230101120000"),
            Some(Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap())
        );
        assert!(parse_timestamp("202301011200").is_none());
        assert!(parse_timestamp("garbage").is_none());
    }

    #[test]
    fn test_date_rfc3339() {
        let record = parse_line("http://example.com 0 20230101120000").unwrap();
        assert_eq!(record.date_rfc3339(), "2023-01-01T12:00:00Z");
    }

    #[test]
    fn test_url_filter_matches() {
        let filter = UrlFilter::compile(Some(r"\.pdf$"));
        assert!(filter.is_active());
        assert!(filter.matches("http://example.com/report.pdf"));
        assert!(!filter.matches("http://example.com/index.html"));
    }

    #[test]
    fn test_url_filter_no_pattern() {
        let filter = UrlFilter::compile(None);
        assert!(!filter.is_active());
        assert!(filter.matches("http://example.com/anything"));
    }

    #[test]
    fn test_url_filter_invalid_pattern_fails_open() {
        let filter = UrlFilter::compile(Some("[unclosed"));
        assert!(!filter.is_active());
        assert!(filter.matches("http://example.com/anything"));
        assert!(filter.matches(""));
    }
}
