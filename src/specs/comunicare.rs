// src/specs/comunicare.rs
//! Parsers for comunicare.es "best advertising agencies" articles.
//!
//! The index article links one page per city from its `h3.wp-block-heading`
//! titles. Each city article then has one heading per agency, carrying a
//! table-of-contents anchor (`span.ez-toc-section`) and a link to the agency's
//! own site. Section headings use the same markup, hence the prefix list.

use std::collections::HashSet;

use scraper::Html;

use crate::core::html::{attr, text_joined};
use crate::core::links::{host_of, urljoin};

pub const CIUDADES_URL: &str = "https://www.comunicare.es/mejores-agencias-publicidad-espana/";

/// Index headings read "Agencias de publicidad en <ciudad>".
pub const CITY_PREFIX: &str = "Agencias de publicidad en ";

/// Article sections that share the agency heading markup.
pub const SKIP_PREFIXES: &[&str] = &[
    "Agencia publicidad",
    "Agencias de publicidad",
    "Contactar",
    "Ventajas",
    "Aumenta",
    "Agencias marketing",
    "Marketing digital",
    "Redes sociales",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciudad {
    pub ciudad: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Company {
    pub empresa: String,
    /// Id of the heading's TOC span.
    pub anchor: String,
    pub web: String,
}

pub fn extract_city_links(html: &str) -> Vec<Ciudad> {
    let doc = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for h3 in doc.select(selector!("h3.wp-block-heading")) {
        let Some(a) = h3.select(selector!("a[href]")).next() else {
            continue;
        };
        let text = text_joined(a);
        let Some(rest) = text.strip_prefix(CITY_PREFIX) else {
            continue;
        };
        let ciudad = rest.trim();
        let url = attr(a, "href");
        if ciudad.is_empty() || url.is_empty() {
            continue;
        }
        if seen.insert(s!(url)) {
            out.push(Ciudad { ciudad: s!(ciudad), url: s!(url) });
        }
    }
    out
}

pub fn is_company_heading(text: &str) -> bool {
    let t = text.trim();
    !t.is_empty() && !SKIP_PREFIXES.iter().any(|p| t.starts_with(p))
}

/// Agencies on one city page, deduped by resolved website.
/// Links back into comunicare.es itself are dropped.
pub fn extract_companies(html: &str, city_url: &str) -> Vec<Company> {
    let doc = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for h3 in doc.select(selector!("h3.wp-block-heading")) {
        let span = h3.select(selector!("span.ez-toc-section[id]")).next();
        let a = h3.select(selector!("a[href]")).next();
        let (Some(span), Some(a)) = (span, a) else {
            continue;
        };

        let empresa = text_joined(a);
        if !is_company_heading(&empresa) {
            continue;
        }
        let href = attr(a, "href");
        if href.is_empty() {
            continue;
        }

        let web = urljoin(city_url, href);
        if host_of(&web).contains("comunicare.es") {
            logd!("internal link skipped: {web}");
            continue;
        }
        if !seen.insert(web.clone()) {
            continue;
        }
        out.push(Company { empresa, anchor: s!(attr(span, "id")), web });
    }
    out
}
