// src/specs/seraportiendas.rs
//! Parsers for seraportiendasonline.com, an online-shop directory.
//!
//! Page kinds:
//! - home: category sidebar (`div.categorySideHolder div.catitemHolder h2 a`)
//! - category: subcategory links `Name (count)` in `div.catitemHolder2`
//! - subcategory listing: `div.productListItem` cards, paginated with `?np=N`
//!   and a "Siguiente" link
//! - shop ficha: `div.linkshop` button plus `p.infoLabel` / `p` value pairs

use std::collections::HashSet;

use scraper::Html;

use crate::core::contact::first_phone;
use crate::core::html::{attr, next_sibling_named, text_joined, text_tight};
use crate::core::links::{query_number, urljoin};
use crate::core::sanitize::{is_real_http_url, safe_website};

pub const HOME_URL: &str = "http://www.seraportiendasonline.com/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Categoria {
    pub categoria: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subcategoria {
    pub subcat_id: String,
    pub subcategoria: String,
    pub subcategoria_url: String,
    pub empresas_count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub empresa: String,
    /// Raw href as printed on the listing.
    pub ficha_url: String,
    pub imagen: String,
}

/// One page of a subcategory listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub items: Vec<Item>,
    pub next: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShopFicha {
    pub website: String,
    pub telefono: String,
}

/* ---------------- Home ---------------- */

/// Sidebar categories. Blocks are looked up anywhere if the sidebar container is missing.
pub fn extract_categories(html: &str, base_url: &str) -> Vec<Categoria> {
    let doc = Html::parse_document(html);
    let blocks: Vec<_> = match doc.select(selector!("div.categorySideHolder")).next() {
        Some(side) => side.select(selector!("div.catitemHolder")).collect(),
        None => {
            logd!("no category sidebar; scanning whole page");
            doc.select(selector!("div.catitemHolder")).collect()
        }
    };

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for block in blocks {
        let Some(a) = block.select(selector!("h2 a[href]")).next() else {
            continue;
        };
        let categoria = text_joined(a);
        let href = attr(a, "href");
        if categoria.is_empty() || !is_real_http_url(href) {
            continue;
        }
        let url = urljoin(base_url, href);
        if seen.insert(url.clone()) {
            out.push(Categoria { categoria, url });
        }
    }
    out
}

/* ---------------- Category ---------------- */

/// `"Moda infantil (12)"` → `("Moda infantil", 12)`; no count means 0.
pub fn parse_name_and_count(text: &str) -> (String, u64) {
    let t = text.trim();
    if t.is_empty() {
        return (s!(), 0);
    }
    let count_re = regex!(r"^(?P<name>.+?)\s*\((?P<count>[0-9]+)\)\s*$");
    match count_re.captures(t) {
        Some(caps) => (
            s!(caps["name"].trim()),
            caps["count"].parse().unwrap_or(0),
        ),
        None => (s!(t), 0),
    }
}

pub fn extract_subcategories(html: &str, category_url: &str) -> Vec<Subcategoria> {
    let doc = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for block in doc.select(selector!("div.catitemHolder2")) {
        for span in block.select(selector!(r#"span[id^="subcat"]"#)) {
            let Some(a) = span.select(selector!("a[href]")).next() else {
                continue;
            };
            let (subcategoria, empresas_count) = parse_name_and_count(&text_joined(a));
            let href = attr(a, "href");
            if href.is_empty() || subcategoria.is_empty() {
                continue;
            }

            let subcategoria_url = urljoin(category_url, href);
            if !seen.insert(subcategoria_url.clone()) {
                continue;
            }
            out.push(Subcategoria {
                subcat_id: s!(attr(span, "id")),
                subcategoria,
                subcategoria_url,
                empresas_count,
            });
        }
    }
    out
}

/* ---------------- Listing ---------------- */

/// `np` query parameter, 1 when absent.
pub fn page_number(url: &str) -> i64 {
    query_number(url, "np", 1)
}

pub fn parse_listing(html: &str, base_url: &str) -> ListingPage {
    let doc = Html::parse_document(html);
    ListingPage {
        items: extract_items(&doc, base_url),
        next: find_next_page(&doc, base_url),
    }
}

fn extract_items(doc: &Html, base_url: &str) -> Vec<Item> {
    doc.select(selector!("div.productListItem"))
        .filter_map(|card| {
            let a = card.select(selector!("h3 a[href]")).next()?;
            let imagen = card
                .select(selector!("div.productListItemImage img[src]"))
                .next()
                .map(|img| urljoin(base_url, attr(img, "src")))
                .unwrap_or_default();
            Some(Item {
                empresa: text_joined(a),
                ficha_url: s!(attr(a, "href")),
                imagen,
            })
        })
        .collect()
}

fn find_next_page(doc: &Html, base_url: &str) -> Option<String> {
    doc.select(selector!("a[href]"))
        .find(|a| text_tight(*a).to_lowercase() == "siguiente")
        .map(|a| urljoin(base_url, attr(a, "href")))
}

/// Next-page link only, for pages whose items are already stored.
pub fn next_page(html: &str, base_url: &str) -> Option<String> {
    find_next_page(&Html::parse_document(html), base_url)
}

/* ---------------- Shop ficha ---------------- */

/// Shop website and phone from a ficha page.
/// Website is empty unless it looks like a URL; phone is normalized when it parses as one.
pub fn extract_ficha(html: &str) -> ShopFicha {
    let doc = Html::parse_document(html);

    let mut website = doc
        .select(selector!("div.linkshop a[href]"))
        .next()
        .map(|a| s!(attr(a, "href")))
        .unwrap_or_default();
    let mut telefono = s!();

    for label in doc.select(selector!("p.infoLabel")) {
        let key = text_joined(label).to_lowercase();
        if key == "tags" {
            continue;
        }
        let Some(value_el) = next_sibling_named(label, "p") else {
            continue;
        };
        let value = text_joined(value_el);

        if website.is_empty() && key == "url" {
            website = s!(value.trim());
        }
        if telefono.is_empty() && key.starts_with("tel") {
            telefono = phone_or_raw(&value);
        }
    }

    ShopFicha {
        website: safe_website(&website),
        telefono: phone_or_raw(&telefono),
    }
}

fn phone_or_raw(text: &str) -> String {
    let phone = first_phone(text);
    if phone.is_empty() { s!(text) } else { phone }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_from_sidebar_only() {
        let html = r#"
            <div class="categorySideHolder">
              <div class="catitemHolder"><h2><a href="/moda/">Moda</a></h2></div>
              <div class="catitemHolder"><h2><a href="javascript:void(0)">Menú</a></h2></div>
              <div class="catitemHolder"><h2><a href="http://www.seraportiendasonline.com/moda/">Moda otra</a></h2></div>
              <div class="catitemHolder"><h2><a href="https://x.com/hogar">Hogar y jardín</a></h2></div>
              <div class="catitemHolder"><h3><a href="/no-h2/">Sin h2</a></h3></div>
            </div>
            <div class="catitemHolder"><h2><a href="/fuera/">Fuera</a></h2></div>
        "#;
        let got = extract_categories(html, HOME_URL);
        assert_eq!(
            got,
            vec![
                Categoria { categoria: s!("Moda"), url: s!("http://www.seraportiendasonline.com/moda/") },
                Categoria { categoria: s!("Hogar y jardín"), url: s!("https://x.com/hogar") },
            ]
        );
    }

    #[test]
    fn categories_without_sidebar() {
        let html = r#"<div class="catitemHolder"><h2><a href="/deportes/">Deportes</a></h2></div>"#;
        let got = extract_categories(html, HOME_URL);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].url, "http://www.seraportiendasonline.com/deportes/");
    }

    #[test]
    fn name_and_count() {
        assert_eq!(parse_name_and_count("Moda infantil (12)"), (s!("Moda infantil"), 12));
        assert_eq!(parse_name_and_count("  Bolsos(3) "), (s!("Bolsos"), 3));
        assert_eq!(parse_name_and_count("Joyería"), (s!("Joyería"), 0));
        assert_eq!(parse_name_and_count("Ropa (muchas)"), (s!("Ropa (muchas)"), 0));
        assert_eq!(parse_name_and_count(""), (s!(), 0));
    }

    #[test]
    fn subcategories_resolve_and_dedupe() {
        let html = r#"
            <div class="catitemHolder2">
              <span id="subcat12"><a href="/moda/bolsos/">Bolsos (40)</a></span>
              <span id="subcat13"><a href="bolsos/">Bolsos repetido (40)</a></span>
              <span id="subcat14"><a href="/moda/calzado/">Calzado</a></span>
              <span id="other"><a href="/moda/no/">No (1)</a></span>
            </div>
        "#;
        let got = extract_subcategories(html, "http://www.seraportiendasonline.com/moda/");
        assert_eq!(
            got,
            vec![
                Subcategoria {
                    subcat_id: s!("subcat12"),
                    subcategoria: s!("Bolsos"),
                    subcategoria_url: s!("http://www.seraportiendasonline.com/moda/bolsos/"),
                    empresas_count: 40,
                },
                Subcategoria {
                    subcat_id: s!("subcat14"),
                    subcategoria: s!("Calzado"),
                    subcategoria_url: s!("http://www.seraportiendasonline.com/moda/calzado/"),
                    empresas_count: 0,
                },
            ]
        );
    }

    #[test]
    fn listing_items_and_next_link() {
        let base = "http://www.seraportiendasonline.com/moda/bolsos/";
        let html = r#"
            <div class="productListItem">
              <div class="productListItemImage"><img src="/img/tienda1.jpg"></div>
              <h3><a href=" tienda-uno.html ">Tienda Uno</a></h3>
            </div>
            <div class="productListItem">
              <h3><a href="http://www.seraportiendasonline.com/tienda-dos.html">Tienda Dos</a></h3>
            </div>
            <div class="productListItem"><h3>Sin enlace</h3></div>
            <div class="paginacion"><a href="?np=1">Anterior</a> <a href="?np=3"> <b>Siguiente</b> </a></div>
        "#;
        let page = parse_listing(html, base);
        assert_eq!(
            page.items,
            vec![
                Item {
                    empresa: s!("Tienda Uno"),
                    ficha_url: s!("tienda-uno.html"),
                    imagen: s!("http://www.seraportiendasonline.com/img/tienda1.jpg"),
                },
                Item {
                    empresa: s!("Tienda Dos"),
                    ficha_url: s!("http://www.seraportiendasonline.com/tienda-dos.html"),
                    imagen: s!(),
                },
            ]
        );
        assert_eq!(page.next.as_deref(), Some("http://www.seraportiendasonline.com/moda/bolsos/?np=3"));
        assert_eq!(next_page("<p>fin</p>", base), None);
    }

    #[test]
    fn page_numbers() {
        assert_eq!(page_number("http://x.com/moda/?np=4"), 4);
        assert_eq!(page_number("http://x.com/moda/"), 1);
        assert_eq!(page_number("http://x.com/moda/?np="), 1);
    }

    #[test]
    fn ficha_prefers_linkshop_and_normalizes_phone() {
        let html = r#"
            <div class="linkshop"><a href="www.tienda.es">Visitar tienda</a></div>
            <div>
              <p class="infoLabel">Tags</p><p>moda, bolsos</p>
              <p class="infoLabel">Url</p><p>http://otra.es</p>
              <p class="infoLabel">Teléfono</p><p>Tel. 0034 634 54 45 07</p>
            </div>
        "#;
        let f = extract_ficha(html);
        assert_eq!(f.website, "https://www.tienda.es");
        assert_eq!(f.telefono, "+34634544507");
    }

    #[test]
    fn ficha_url_label_and_raw_phone() {
        let html = r#"
            <p class="infoLabel">url</p><p> tiendados.com </p>
            <p class="infoLabel">Tel</p><p>llamar por las tardes</p>
        "#;
        let f = extract_ficha(html);
        assert_eq!(f.website, "https://tiendados.com");
        assert_eq!(f.telefono, "llamar por las tardes");
    }

    #[test]
    fn ficha_rejects_non_url_website() {
        let html = r#"<p class="infoLabel">Url</p><p>Calle Mayor</p>"#;
        assert_eq!(extract_ficha(html).website, "");
    }
}
