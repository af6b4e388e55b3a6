//! Host extraction for subdomain mode.

use std::collections::BTreeSet;

/// Extracts the normalized host component of a URL.
///
/// Strips a leading literal `http://` or `https://` (these two prefixes
/// only), truncates at the first `/` and the first `:`, and lower-cases the
/// remainder. Returns `None` when nothing is left after stripping.
pub fn extract_host(url: &str) -> Option<String> {
    let stripped = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url);

    let host = stripped.split('/').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();

    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

/// Collects the unique hosts of a set of URLs.
///
/// The underlying discovery order is arbitrary, so the result is a
/// `BTreeSet`: deduplicated and deterministically sorted.
pub fn collect_subdomains<'a>(urls: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    urls.filter_map(extract_host).collect()
}
