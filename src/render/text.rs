//! Text rendering: plain URLs, browsable links, and subdomain lists.

use std::io::Write;

use anyhow::{Context, Result};

use crate::aggregate::RunResult;
use crate::config::REPLAY_PREFIX;
use crate::record::ArchiveRecord;
use crate::subdomain::collect_subdomains;

/// Builds the browsable replay link for one record.
pub fn browsable_link(record: &ArchiveRecord) -> String {
    format!("{}/{}/{}", REPLAY_PREFIX, record.timestamp, record.url)
}

/// Writes one value per line: the plain URL, or the browsable replay link.
pub fn write_urls(result: &RunResult, browsable: bool, sink: &mut dyn Write) -> Result<()> {
    for record in &result.records {
        if browsable {
            writeln!(sink, "{}", browsable_link(record))
        } else {
            writeln!(sink, "{}", record.url)
        }
        .context("Failed to write text output")?;
    }
    Ok(())
}

/// Writes the unique hosts of the result set, one per line, sorted.
pub fn write_subdomains(result: &RunResult, sink: &mut dyn Write) -> Result<()> {
    let hosts = collect_subdomains(result.records.iter().map(|record| record.url.as_str()));
    for host in &hosts {
        writeln!(sink, "{}", host).context("Failed to write subdomain output")?;
    }
    Ok(())
}
