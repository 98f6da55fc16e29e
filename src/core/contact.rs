// src/core/contact.rs
//! Contact-data extraction from raw page HTML: emails, Spanish phone numbers,
//! shop platform fingerprints and parked-domain detection.
//!
//! Pure string work over the whole document. The regexes run on markup as well
//! as text: `mailto:` and `tel:` links carry most of the contact data.

use std::collections::BTreeSet;

/// Image/asset names like `logo@2x.png` match the email pattern.
const BAD_EMAIL_SUFFIXES: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".pdf", ".mp4", ".mov", ".avi", ".zip",
    ".rar",
];

/// Platform/newsletter vendors whose addresses show up in shop footers.
const BAD_EMAIL_DOMAINS: &[&str] = &[
    "prestashop.com",
    "shopify.com",
    "myshopify.com",
    "mailchimp.com",
    "klaviyo.com",
    "sendgrid.net",
];

const FREE_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "hotmail.com",
    "outlook.com",
    "live.com",
    "yahoo.com",
    "icloud.com",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Shopify,
    Wordpress,
    Prestashop,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Shopify => "shopify",
            Platform::Wordpress => "wordpress",
            Platform::Prestashop => "prestashop",
        }
    }
}

/* ---------------- Emails ---------------- */

pub fn is_valid_email(email: &str) -> bool {
    let e = email.trim().to_lowercase();
    if e.is_empty() || e.matches('@').count() != 1 {
        return false;
    }
    if BAD_EMAIL_SUFFIXES.iter().any(|suf| e.ends_with(suf)) {
        return false;
    }
    !e.contains("/@")
}

/// Distinct valid matches in sorted order.
fn valid_emails(html: &str) -> Vec<String> {
    // local part, `@`, dotted domain, 2+ letter TLD
    let email_re = regex!(r"(?i)[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}");

    email_re
        .find_iter(html)
        .map(|m| s!(m.as_str()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter(|e| is_valid_email(e))
        .collect()
}

fn email_domain(email: &str) -> String {
    email.rsplit('@').next().unwrap_or("").to_lowercase()
}

/// Prefer an address on the site's own domain, then on one of its subdomains,
/// else the first valid address on the page.
pub fn pick_best_email(html: &str, domain: &str) -> String {
    let emails = valid_emails(html);
    if emails.is_empty() {
        return s!();
    }

    let d = domain.to_lowercase();
    if !d.is_empty() {
        let at_domain = join!("@", &d);
        if let Some(e) = emails.iter().find(|e| e.to_lowercase().ends_with(&at_domain)) {
            return e.clone();
        }
        let dot_domain = join!(".", &d);
        if let Some(e) = emails.iter().find(|e| email_domain(e).ends_with(&dot_domain)) {
            return e.clone();
        }
    }
    emails.into_iter().next().unwrap_or_default()
}

/// Only an address on the site's own domain (or a subdomain of it).
pub fn pick_email_strict(html: &str, domain: &str) -> String {
    if domain.is_empty() {
        return s!();
    }
    let d = domain.to_lowercase();
    let dot_domain = join!(".", &d);
    valid_emails(html)
        .into_iter()
        .find(|e| {
            let at = email_domain(e);
            at == d || at.ends_with(&dot_domain)
        })
        .unwrap_or_default()
}

/// First address that is neither a vendor's nor a free-mail account.
pub fn pick_email_fallback(html: &str) -> String {
    valid_emails(html)
        .into_iter()
        .find(|e| {
            let at = email_domain(e);
            !BAD_EMAIL_DOMAINS.contains(&at.as_str()) && !FREE_EMAIL_DOMAINS.contains(&at.as_str())
        })
        .unwrap_or_default()
}

/* ---------------- Phones ---------------- */

fn phone_matches(text: &str) -> impl Iterator<Item = &str> {
    // (+34) 91 016 75 00 | +34 91 016 75 00 | 0034 91 016 75 00
    // or a bare 9-digit Spanish number, separators allowed
    let phone_re = regex!(
        r"(?x)
        (?:
            (?:\(\s*\+34\s*\)|\+34|0034)\s*[\-\.]?\s*(?:\d[\s\-\.]?){8,12}
            |
            \b(?:6|7|8|9)(?:[\s\-\.]?\d){8}\b
        )"
    );
    phone_re.find_iter(text).map(|m| m.as_str())
}

/// Digits and `+` only, with the Spanish prefix spelled `+34`.
pub fn normalize_phone(raw: &str) -> String {
    let mut p: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    if let Some(rest) = p.strip_prefix("0034") {
        p = join!("+34", rest);
    }
    if p.starts_with("34") && p.len() >= 11 {
        p = join!("+34", &p[2..]);
    }
    p
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}

/// `+34910167500` → `(+34) 91 016 75 00`, `+34634544507` → `(+34) 634 54 45 07`.
/// Anything that isn't `+34` plus nine digits is returned unchanged.
pub fn format_es_phone(norm: &str) -> String {
    let digits: String = norm.chars().filter(|c| c.is_ascii_digit()).collect();
    if !norm.starts_with("+34") || digits.len() != 11 {
        return s!(norm);
    }
    let nat = &digits[2..];
    if nat.starts_with('8') || nat.starts_with('9') {
        format!("(+34) {} {} {} {}", &nat[0..2], &nat[2..5], &nat[5..7], &nat[7..9])
    } else {
        format!("(+34) {} {} {} {}", &nat[0..3], &nat[3..5], &nat[5..7], &nat[7..9])
    }
}

/// Best phone on a page: plausible lengths only, `+34` numbers first, formatted.
pub fn pick_best_phone(html: &str) -> String {
    let candidates: Vec<String> = phone_matches(html)
        .map(normalize_phone)
        .filter(|p| (9..=15).contains(&digit_count(p)))
        .collect();

    match candidates.iter().find(|p| p.starts_with("+34")).or(candidates.first()) {
        Some(p) => format_es_phone(p),
        None => s!(),
    }
}

/// First phone-looking match, normalized but not formatted.
pub fn first_phone(text: &str) -> String {
    phone_matches(text).next().map(normalize_phone).unwrap_or_default()
}

/* ---------------- Site fingerprints ---------------- */

/// Checked in order; the first hit wins.
pub fn detect_platform(html: &str) -> Option<Platform> {
    if regex!(r"(?i)(cdn\.shopify\.com|shopifyassets\.com|myshopify\.com)").is_match(html) {
        return Some(Platform::Shopify);
    }
    if regex!(r"(?i)(wp-content/|wp-includes/|wp-json|xmlrpc\.php)").is_match(html) {
        return Some(Platform::Wordpress);
    }
    if regex!(r"(?i)(prestashop|/modules/|/themes/|controller=)").is_match(html) {
        return Some(Platform::Prestashop);
    }
    None
}

/// Domain-for-sale and registrar parking pages.
pub fn is_parked(html: &str) -> bool {
    regex!(
        r"(?i)(domain (is )?for sale|comprar dominio|this domain is for sale|sedo|dan\.com|afternic|parking|parked domain)"
    )
    .is_match(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <footer>
          <img src="/img/logo@2x.png">
          <a href="mailto:ventas@mail.tienda.es">ventas</a>
          <a href="mailto:info@tienda.es">info</a>
          <p>Escríbenos a zzz@gmail.com o llama al (+34) 91 016 75 00</p>
          <p>Móvil 634 54 45 07</p>
        </footer>
    "#;

    #[test]
    fn email_validity() {
        assert!(is_valid_email("info@tienda.es"));
        assert!(!is_valid_email("logo@2x.png"));
        assert!(!is_valid_email("a@b@c.es"));
        assert!(!is_valid_email("https://x.es/@user.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn best_email_prefers_own_domain() {
        assert_eq!(pick_best_email(PAGE, "tienda.es"), "info@tienda.es");
        // no domain known: first in sort order
        assert_eq!(pick_best_email(PAGE, ""), "info@tienda.es");
        assert_eq!(pick_best_email("<p>nada</p>", "tienda.es"), "");
    }

    #[test]
    fn best_email_accepts_subdomain() {
        let html = "ventas@mail.tienda.es otro@zeta.com";
        assert_eq!(pick_best_email(html, "tienda.es"), "ventas@mail.tienda.es");
        assert_eq!(pick_best_email(html, "nada.es"), "otro@zeta.com");
    }

    #[test]
    fn strict_and_fallback_emails() {
        assert_eq!(pick_email_strict(PAGE, "tienda.es"), "info@tienda.es");
        assert_eq!(pick_email_strict(PAGE, "otra.es"), "");
        assert_eq!(pick_email_strict(PAGE, ""), "");

        let html = "a@gmail.com b@shopify.com hola@mitienda.com";
        assert_eq!(pick_email_fallback(html), "hola@mitienda.com");
        assert_eq!(pick_email_fallback("a@gmail.com"), "");
    }

    #[test]
    fn phone_normalization() {
        assert_eq!(normalize_phone("(+34) 91 016 75 00"), "+34910167500");
        assert_eq!(normalize_phone("0034 634-54-45-07"), "+34634544507");
        assert_eq!(normalize_phone("34910167500"), "+34910167500");
        assert_eq!(normalize_phone("910 16 75 00"), "910167500");
    }

    #[test]
    fn phone_formatting() {
        assert_eq!(format_es_phone("+34910167500"), "(+34) 91 016 75 00");
        assert_eq!(format_es_phone("+34634544507"), "(+34) 634 54 45 07");
        assert_eq!(format_es_phone("910167500"), "910167500");
        assert_eq!(format_es_phone("+3491016"), "+3491016");
    }

    #[test]
    fn best_phone_prefers_prefixed() {
        assert_eq!(pick_best_phone(PAGE), "(+34) 91 016 75 00");
        assert_eq!(pick_best_phone("Tel. 0034 634 54 45 07"), "(+34) 634 54 45 07");
        assert_eq!(pick_best_phone("Llámanos: 981 23 45 67"), "981234567");
        assert_eq!(pick_best_phone("sin teléfono"), "");
    }

    #[test]
    fn first_phone_is_unformatted() {
        assert_eq!(first_phone("Tel: 981 23 45 67 / 600 111 222"), "981234567");
        assert_eq!(first_phone("+34 600 111 222"), "+34600111222");
        assert_eq!(first_phone(""), "");
    }

    #[test]
    fn platform_precedence() {
        assert_eq!(
            detect_platform(r#"<script src="https://cdn.shopify.com/s/x.js"></script><link href="/wp-content/a.css">"#),
            Some(Platform::Shopify)
        );
        assert_eq!(detect_platform(r#"<link href="/wp-content/a.css">"#), Some(Platform::Wordpress));
        assert_eq!(detect_platform(r#"<a href="index.php?controller=cart">"#), Some(Platform::Prestashop));
        assert_eq!(detect_platform("<html></html>"), None);
    }

    #[test]
    fn parked_pages() {
        assert!(is_parked("<h1>This domain is for sale!</h1>"));
        assert!(is_parked("Comprar dominio ahora"));
        assert!(!is_parked("<h1>Bienvenido a nuestra tienda</h1>"));
    }
}
