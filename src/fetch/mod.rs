//! CDX index retrieval and concurrent line processing.
//!
//! One rate-limited, timeout-bounded GET per domain retrieves the raw index
//! body; record construction then fans out over the body's lines across a
//! semaphore-bounded worker pool, fanning results into a single channel
//! that closes only after every worker has finished.

use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::sync::mpsc;
use url::Url;

use crate::config::CDX_FIELDS;
use crate::error_handling::{FetchError, ProcessingStats, WarningType};
use crate::initialization::{init_semaphore, RateLimiter};
use crate::record::{parse_line, IndexedRecord, UrlFilter};
use crate::subdomain::extract_host;

/// Shared resources for processing one or more domains.
///
/// Built once per run and passed by reference into `process_domain` for
/// every target.
pub struct QueryContext {
    /// HTTP client configured with the per-request timeout.
    pub client: Arc<reqwest::Client>,
    /// Base URL of the CDX search endpoint.
    pub endpoint: Url,
    /// Compiled URL filter (inactive when no valid pattern was supplied).
    pub filter: Arc<UrlFilter>,
    /// Run-wide error/warning counters.
    pub stats: Arc<ProcessingStats>,
    /// Global request pacer; `None` when rate limiting is disabled.
    pub rate_limiter: Option<Arc<RateLimiter>>,
}

/// Builds the index query URL for one domain.
///
/// The query requests a wildcard match on the domain (`*.<domain>/*`) and
/// the original URL, length, and timestamp fields. Percent-encoding of the
/// pattern is handled by the URL serializer.
pub fn build_query_url(endpoint: &Url, domain: &str) -> Url {
    let mut query = endpoint.clone();
    query
        .query_pairs_mut()
        .append_pair("url", &format!("*.{}/*", domain))
        .append_pair("fl", CDX_FIELDS);
    query
}

/// Normalizes a target into a bare host for query construction.
///
/// Targets may arrive with a scheme, path, or port attached; the CDX
/// wildcard pattern wants the host alone, lower-cased.
pub fn normalize_target(target: &str) -> String {
    extract_host(target.trim()).unwrap_or_else(|| target.trim().to_ascii_lowercase())
}

/// Fetches the raw index body for one domain.
///
/// Waits for the rate limiter before initiating the request, so request
/// initiation is serialized across all domains being processed. A non-200
/// status or transport failure is a terminal error for this domain only.
///
/// # Errors
///
/// Returns a `FetchError` on transport failure, non-200 status, or when the
/// request exceeds `timeout_seconds`.
pub async fn fetch_index(
    ctx: &QueryContext,
    domain: &str,
    timeout_seconds: u64,
) -> Result<String, FetchError> {
    let query = build_query_url(&ctx.endpoint, domain);

    if let Some(limiter) = &ctx.rate_limiter {
        limiter.wait().await;
    }

    log::debug!("Fetching index for {} from {}", domain, query);

    let request = async {
        let response = ctx.client.get(query.clone()).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    };

    match tokio::time::timeout(std::time::Duration::from_secs(timeout_seconds), request).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(timeout_seconds)),
    }
}

/// Fans record construction out over the body's lines.
///
/// Each line is handed to a worker task gated by a semaphore of
/// `concurrent` permits; a worker parses its line, applies the URL filter,
/// and sends zero or one `(line index, record)` pair into the returned
/// channel. The spawned coordinator joins every worker before dropping the
/// sender, so the channel closes only once all workers have finished; the
/// consumer drains it until exhaustion.
pub fn spawn_line_workers(
    body: String,
    concurrent: usize,
    filter: Arc<UrlFilter>,
    stats: Arc<ProcessingStats>,
) -> mpsc::UnboundedReceiver<IndexedRecord> {
    let (tx, rx) = mpsc::unbounded_channel();
    let semaphore = init_semaphore(concurrent);

    tokio::spawn(async move {
        let mut workers = FuturesUnordered::new();

        for (index, line) in body.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let line = line.to_string();
            let tx = tx.clone();
            let filter = Arc::clone(&filter);
            let stats = Arc::clone(&stats);
            workers.push(tokio::spawn(async move {
                let _permit = permit;

                let Some(record) = parse_line(&line) else {
                    stats.increment_warning(WarningType::MalformedLine);
                    log::debug!("Skipping malformed index line: {:?}", line);
                    return;
                };
                if record.date.is_none() {
                    stats.increment_warning(WarningType::UnparsableTimestamp);
                    log::debug!("Unparseable timestamp in index line: {:?}", line);
                }
                if !filter.matches(&record.url) {
                    return;
                }
                let _ = tx.send(IndexedRecord { index, record });
            }));
        }

        // Completion barrier: every worker finishes before the sender is
        // dropped and the channel closes
        while let Some(result) = workers.next().await {
            if let Err(join_error) = result {
                log::warn!("Line worker panicked: {:?}", join_error);
            }
        }
        drop(tx);
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_context_parts() -> (Arc<UrlFilter>, Arc<ProcessingStats>) {
        (
            Arc::new(UrlFilter::compile(None)),
            Arc::new(ProcessingStats::new()),
        )
    }

    #[test]
    fn test_build_query_url() {
        let endpoint = Url::parse("https://web.archive.org/cdx/search/cdx").unwrap();
        let query = build_query_url(&endpoint, "example.com");

        let params: HashMap<String, String> = query
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(params.get("url").map(String::as_str), Some("*.example.com/*"));
        assert_eq!(
            params.get("fl").map(String::as_str),
            Some("original,length,timestamp")
        );
        assert_eq!(query.path(), "/cdx/search/cdx");
    }

    #[test]
    fn test_normalize_target() {
        assert_eq!(normalize_target("example.com"), "example.com");
        assert_eq!(normalize_target("http://Example.com/path"), "example.com");
        assert_eq!(normalize_target("https://example.com:8443"), "example.com");
        assert_eq!(normalize_target("  example.com "), "example.com");
    }

    #[tokio::test]
    async fn test_spawn_line_workers_emits_all_records() {
        let (filter, stats) = test_context_parts();
        let body = (0..50)
            .map(|i| format!("http://example.com/page{} {} 20230101120000", i, i))
            .collect::<Vec<_>>()
            .join("\n");

        let mut rx = spawn_line_workers(body, 4, filter, stats);
        let mut received = Vec::new();
        while let Some(item) = rx.recv().await {
            received.push(item);
        }

        assert_eq!(received.len(), 50);
        // Every line index arrives exactly once, in some order
        let mut indices: Vec<usize> = received.iter().map(|item| item.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..50).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_spawn_line_workers_skips_malformed_lines() {
        let (filter, stats) = test_context_parts();
        let body = "http://example.com/a 10 20230101120000\n\
                    short line\n\
                    \n\
                    http://example.com/b 20 20230102120000"
            .to_string();

        let mut rx = spawn_line_workers(body, 2, filter, Arc::clone(&stats));
        let mut received = Vec::new();
        while let Some(item) = rx.recv().await {
            received.push(item);
        }

        assert_eq!(received.len(), 2);
        assert_eq!(stats.warning_count(WarningType::MalformedLine), 1);
    }

    #[tokio::test]
    async fn test_spawn_line_workers_applies_regex_filter() {
        let filter = Arc::new(UrlFilter::compile(Some(r"/a$")));
        let stats = Arc::new(ProcessingStats::new());
        let body = "http://example.com/a 10 20230101120000\n\
                    http://example.com/b 20 20230102120000"
            .to_string();

        let mut rx = spawn_line_workers(body, 2, filter, stats);
        let mut received = Vec::new();
        while let Some(item) = rx.recv().await {
            received.push(item);
        }

        assert_eq!(received.len(), 1);
        assert_eq!(received[0].record.url, "http://example.com/a");
    }
}
