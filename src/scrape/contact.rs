// src/scrape/contact.rs
//! Contact probing on a company's own website: home page first, then the usual
//! contact / legal / privacy paths.

use crate::config::consts::CONTACT_PATHS;
use crate::core::Fetcher;
use crate::core::contact::{is_parked, pick_best_email, pick_best_phone};
use crate::core::links::{domain_from_url, urljoin};
use crate::core::sanitize::{ensure_url, safe_website};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contact {
    pub email: String,
    pub telefono: String,
}

/// Home page fetch result for the liveness check.
/// A parked domain is not alive but its HTML is still handed back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Liveness {
    pub alive: bool,
    pub html: String,
}

/// `https://shop.es/tienda` → `https://shop.es/tienda/`, `https://shop.es/tienda/contacto/`, …
pub fn probe_urls(base: &str) -> Vec<String> {
    let root = join!(base.trim_end_matches('/'), "/");
    CONTACT_PATHS.iter().map(|p| urljoin(&root, p)).collect()
}

/// First email found walking the probe paths. Empty when none.
pub fn probe_email(fetcher: &Fetcher, website: &str) -> String {
    let base = ensure_url(website);
    if base.is_empty() {
        return s!();
    }
    let domain = domain_from_url(&base);

    for url in probe_urls(&base) {
        let Some(html) = fetcher.get_ok(&url) else { continue };
        let email = pick_best_email(&html, &domain);
        if !email.is_empty() {
            logd!("email on {url}");
            return email;
        }
    }
    s!()
}

/// Email and phone, walking the probe paths until both are known.
pub fn probe_contact(fetcher: &Fetcher, website: &str) -> Contact {
    let mut found = Contact::default();
    let base = ensure_url(website);
    if base.is_empty() {
        return found;
    }
    let domain = domain_from_url(&base);

    for url in probe_urls(&base) {
        let Some(html) = fetcher.get_ok(&url) else { continue };

        if found.email.is_empty() {
            found.email = pick_best_email(&html, &domain);
        }
        if found.telefono.is_empty() {
            found.telefono = pick_best_phone(&html);
        }
        if !found.email.is_empty() && !found.telefono.is_empty() {
            break;
        }
    }
    found
}

pub fn check_alive(fetcher: &Fetcher, website: &str) -> Liveness {
    let url = safe_website(website);
    if url.is_empty() {
        return Liveness::default();
    }
    match fetcher.get_ok(&url) {
        None => Liveness::default(),
        Some(html) if !html.is_empty() && is_parked(&html) => {
            logd!("parked domain: {url}");
            Liveness { alive: false, html }
        }
        Some(html) => Liveness { alive: true, html },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_urls_in_order() {
        let urls = probe_urls("https://shop.es");
        assert_eq!(urls.len(), CONTACT_PATHS.len());
        assert_eq!(urls[0], "https://shop.es/");
        assert_eq!(urls[1], "https://shop.es/contacto/");
        assert_eq!(urls[2], "https://shop.es/contacto");
    }

    #[test]
    fn probe_urls_keep_subpath() {
        let urls = probe_urls("https://shop.es/tienda///");
        assert_eq!(urls[0], "https://shop.es/tienda/");
        assert_eq!(urls[3], "https://shop.es/tienda/contact/");
    }
}
