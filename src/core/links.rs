// src/core/links.rs
use url::Url;

use super::sanitize::ensure_url;

/// Resolve `href` against `base`.
///
/// An href that is already absolute comes back exactly as written (no trailing
/// `/` added, host case kept); stored `web` columns are resume keys. If either
/// side won't parse, `href` comes back as-is.
pub fn urljoin(base: &str, href: &str) -> String {
    let href = href.trim();
    if Url::parse(href).is_ok() {
        return s!(href);
    }
    match Url::parse(base).and_then(|b| b.join(href)) {
        Ok(u) => u.to_string(),
        Err(_) => s!(href),
    }
}

/// Lowercased host without a leading `www.`. Empty when there is nothing to parse.
pub fn domain_from_url(url: &str) -> String {
    let url = ensure_url(url);
    if url.is_empty() {
        return s!();
    }
    let host = Url::parse(&url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .unwrap_or_default();
    match host.strip_prefix("www.") {
        Some(rest) => s!(rest),
        None => host,
    }
}

/// Lowercased host, `www.` kept. Empty when the URL doesn't parse.
pub fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .unwrap_or_default()
}

/// Integer query parameter, `default` when missing or not a number.
pub fn query_number(url: &str, key: &str, default: i64) -> i64 {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.query_pairs()
                .find(|(k, v)| k == key && !v.is_empty())
                .and_then(|(_, v)| v.trim().parse::<i64>().ok())
        })
        .unwrap_or(default)
}
