//! JSON rendering.
//!
//! Emits a single object with a `results` array and a `count` field. Each
//! record object carries `url`, `length`, `timestamp`, and `date` keys;
//! `date` is an RFC 3339 string or null when the timestamp did not parse.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::aggregate::RunResult;
use crate::record::ArchiveRecord;

#[derive(Serialize)]
struct JsonEnvelope<'a> {
    results: &'a [ArchiveRecord],
    count: usize,
}

/// Writes the result set as a JSON document, newline-terminated.
pub fn write_json(result: &RunResult, sink: &mut dyn Write) -> Result<()> {
    let envelope = JsonEnvelope {
        results: &result.records,
        count: result.count,
    };
    serde_json::to_writer(&mut *sink, &envelope).context("Failed to encode JSON output")?;
    writeln!(sink).context("Failed to write JSON output")?;
    Ok(())
}
