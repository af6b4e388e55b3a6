//! Configuration constants.
//!
//! Central location for endpoint URLs, defaults, and format strings used
//! throughout the application.

/// Base URL of the CDX index search endpoint.
pub const CDX_ENDPOINT: &str = "https://web.archive.org/cdx/search/cdx";

/// Fields requested from the CDX index, in response column order.
pub const CDX_FIELDS: &str = "original,length,timestamp";

/// Base URL for browsable snapshot replay links.
pub const REPLAY_PREFIX: &str = "https://web.archive.org/web";

/// Default number of concurrent line-processing workers per domain.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default request rate limit in requests per second.
pub const DEFAULT_RATE_LIMIT_RPS: u32 = 10;

/// `chrono` format of the 14-digit snapshot timestamps in index records.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// `chrono` format accepted by the `--start-date` / `--end-date` flags.
pub const DATE_FLAG_FORMAT: &str = "%Y-%m-%d";

/// HTTP User-Agent header value, versioned from Cargo.toml at compile time.
pub const DEFAULT_USER_AGENT: &str = concat!("wayback_index/", env!("CARGO_PKG_VERSION"));
