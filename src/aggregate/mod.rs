//! Result aggregation: order restoration, dedup, date filtering, capping.

use std::collections::HashSet;

use tokio::sync::mpsc;

use crate::config::Config;
use crate::record::{ArchiveRecord, IndexedRecord};

/// The final ordered result set for one domain.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Records in upstream response order, after all filtering.
    pub records: Vec<ArchiveRecord>,
    /// Number of records retained.
    pub count: usize,
}

/// Drains the fan-in channel and produces the final result set.
///
/// Line workers emit records in arbitrary arrival order; sorting on the
/// carried line index restores upstream response order before the
/// order-sensitive stages run. Filters apply in sequence:
///
/// 1. date range, when one is configured (records without a parsed date
///    are excluded only in that case)
/// 2. uniqueness on the URL, scoped to this domain's result set
/// 3. the max-results cap, a hard stop rather than a sample
///
/// The regex filter has already been applied by the line workers.
pub async fn aggregate(mut rx: mpsc::UnboundedReceiver<IndexedRecord>, config: &Config) -> RunResult {
    let mut indexed: Vec<IndexedRecord> = Vec::new();
    while let Some(item) = rx.recv().await {
        indexed.push(item);
    }
    indexed.sort_by_key(|item| item.index);

    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for item in indexed {
        let record = item.record;

        if let Some(range) = &config.date_range {
            if !range.contains(record.date) {
                continue;
            }
        }

        if config.unique_urls && !seen_urls.insert(record.url.clone()) {
            continue;
        }

        records.push(record);
        if config.max_results > 0 && records.len() >= config.max_results {
            break;
        }
    }

    let count = records.len();
    RunResult { records, count }
}
