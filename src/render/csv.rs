//! CSV rendering.
//!
//! Emits a `URL,LENGTH,TIMESTAMP,DATE` header followed by one row per
//! record, with the capture date rendered as RFC 3339 (empty when the
//! timestamp did not parse). Quoting follows standard CSV rules.

use std::io::Write;

use anyhow::{Context, Result};
use csv::Writer;

use crate::aggregate::RunResult;

/// Writes the result set as CSV.
pub fn write_csv(result: &RunResult, sink: &mut dyn Write) -> Result<()> {
    let mut writer = Writer::from_writer(sink);

    writer
        .write_record(["URL", "LENGTH", "TIMESTAMP", "DATE"])
        .context("Failed to write CSV header")?;

    for record in &result.records {
        let date = record.date_rfc3339();
        writer
            .write_record([
                record.url.as_str(),
                record.length.as_str(),
                record.timestamp.as_str(),
                date.as_str(),
            ])
            .context("Failed to write CSV record")?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_line;

    fn result_from_lines(lines: &[&str]) -> RunResult {
        let records: Vec<_> = lines
            .iter()
            .map(|line| parse_line(line).expect("test line should parse"))
            .collect();
        let count = records.len();
        RunResult { records, count }
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let result = result_from_lines(&["http://example.com/a 1024 20230101120000"]);
        let mut sink = Vec::new();
        write_csv(&result, &mut sink).unwrap();
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "URL,LENGTH,TIMESTAMP,DATE\n\
             http://example.com/a,1024,20230101120000,2023-01-01T12:00:00Z\n"
        );
    }

    #[test]
    fn test_write_csv_empty_date_on_bad_timestamp() {
        let result = result_from_lines(&["http://example.com/a 1024 bad-timestamp"]);
        let mut sink = Vec::new();
        write_csv(&result, &mut sink).unwrap();
        let output = String::from_utf8(sink).unwrap();
        assert!(output.ends_with("http://example.com/a,1024,bad-timestamp,\n"));
    }

    #[test]
    fn test_write_csv_round_trip() {
        let result = result_from_lines(&[
            "http://example.com/a,b 1024 20230101120000",
            "http://example.com/plain 2048 20230615080910",
        ]);
        let mut sink = Vec::new();
        write_csv(&result, &mut sink).unwrap();

        let mut reader = csv::Reader::from_reader(sink.as_slice());
        let rows: Vec<csv::StringRecord> = reader
            .records()
            .collect::<Result<_, _>>()
            .expect("rendered CSV should parse back");

        assert_eq!(rows.len(), result.records.len());
        for (row, record) in rows.iter().zip(&result.records) {
            assert_eq!(&row[0], record.url);
            assert_eq!(&row[1], record.length);
            assert_eq!(&row[2], record.timestamp);
        }
    }
}
