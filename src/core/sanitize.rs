// src/core/sanitize.rs
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::canonical_combining_class;

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Bare domains get `https://`; anything already http(s) is left alone.
pub fn ensure_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return s!();
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return s!(raw);
    }
    join!("https://", raw)
}

/// Rejects the junk that shows up in "website" fields: street addresses,
/// comma lists, single words.
pub fn looks_like_url(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    let has_scheme = s.contains("://");
    if (s.contains(',') || s.contains(' ')) && !has_scheme && !s.contains('.') {
        return false;
    }
    if !has_scheme && !s.contains('.') && !s.starts_with('/') {
        return false;
    }
    true
}

pub fn safe_website(raw: &str) -> String {
    if !looks_like_url(raw) {
        return s!();
    }
    ensure_url(raw)
}

/// Hrefs worth following from a category menu.
pub fn is_real_http_url(href: &str) -> bool {
    let h = href.trim().to_ascii_lowercase();
    if h.is_empty() || h.starts_with("javascript:") {
        return false;
    }
    h.starts_with("http://") || h.starts_with("https://") || h.starts_with('/')
}

/// Dedupe key for company names: lowercase, accents folded, ®/™ dropped,
/// whitespace collapsed, surrounding quotes trimmed.
pub fn normalize_empresa(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    if lower.is_empty() {
        return s!();
    }
    let folded: String = lower
        .nfkd()
        .filter(|&c| canonical_combining_class(c) == 0)
        .filter(|&c| c != '™' && c != '®')
        .collect();

    normalize_ws(&folded)
        .trim_matches(|c| c == ' ' || c == '"' || c == '\'')
        .to_string()
}
