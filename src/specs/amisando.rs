// src/specs/amisando.rs
//! Parsers for amisando.es, a pest-control company directory.
//!
//! Three page kinds:
//! - the province index (`article a` links),
//! - a province listing (`article.article-loop` cards),
//! - a company ficha (`#ficha` with `<strong>Label:</strong> value<br>` pairs).
//!
//! Links are stored exactly as the site writes them; amisando already uses
//! absolute URLs everywhere.

use std::collections::HashSet;

use scraper::Html;

use crate::core::html::{text_joined, text_tight, text_until_br};

pub const PROVINCIAS_URL: &str =
    "https://amisando.es/empresas-para-el-control-de-plagas-en-espana-por-provincia/";
pub const DEFAULT_PROVINCIA_URL: &str = "https://amisando.es/servicios/a-coruna/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Provincia {
    pub provincia: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ficha {
    pub direccion: String,
    pub telefono: String,
    pub paginaweb: String,
}

/// Every link inside an `<article>` with a name and an href. No dedupe.
pub fn extract_provincias(html: &str) -> Vec<Provincia> {
    let doc = Html::parse_document(html);
    doc.select(selector!("article a"))
        .filter_map(|a| {
            let provincia = text_tight(a);
            let url = a.value().attr("href").unwrap_or("");
            if provincia.is_empty() || url.is_empty() {
                return None;
            }
            Some(Provincia { provincia, url: s!(url) })
        })
        .collect()
}

/// First link of each listing card, deduped, page order kept.
pub fn extract_empresa_urls(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for card in doc.select(selector!("section.content-area article.article-loop")) {
        let Some(a) = card.select(selector!("a[href]")).next() else {
            continue;
        };
        let link = a.value().attr("href").unwrap_or("");
        if !link.is_empty() && seen.insert(s!(link)) {
            out.push(s!(link));
        }
    }
    out
}

/// Address, phone and website from the `#ficha` block.
///
/// The website label is often missing; the fallback is the last link whose text
/// mentions `web:` (its href, or its text if the href is empty).
pub fn extract_ficha(html: &str) -> Ficha {
    let doc = Html::parse_document(html);
    let Some(ficha) = doc.select(selector!("#ficha")).next() else {
        return Ficha::default();
    };

    let mut out = Ficha::default();
    for strong in ficha.select(selector!("strong")) {
        let label = text_joined(strong).to_lowercase();
        match label.trim_end_matches(':') {
            "dirección" => out.direccion = text_until_br(strong),
            "teléfono" => out.telefono = text_until_br(strong),
            "página web" => out.paginaweb = text_until_br(strong),
            _ => {}
        }
    }

    if out.paginaweb.is_empty() {
        for a in ficha.select(selector!("a[href]")) {
            if !text_joined(a).to_lowercase().contains("web:") {
                continue;
            }
            out.paginaweb = match a.value().attr("href") {
                Some(href) if !href.is_empty() => s!(href),
                _ => text_tight(a),
            };
        }
    }
    out
}
