// src/core/html.rs
// Small helpers over `scraper` that mirror how the directory pages are read:
// visible text with stripped pieces, attribute lookups, sibling walks.

use scraper::{ElementRef, Node};

use super::sanitize::normalize_ws;

/// Visible text: each text node trimmed, empties dropped, joined with a space.
pub fn text_joined(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Same as `text_joined` but pieces are glued with no separator.
pub fn text_tight(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

/// Trimmed attribute value, empty when absent.
pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> &'a str {
    el.value().attr(name).map(str::trim).unwrap_or("")
}

/// Text that follows `el` among its siblings, up to the next `<br>`.
/// Bare text nodes are taken verbatim, elements by their visible text.
/// Result is whitespace-collapsed.
///
/// For `<strong>Teléfono:</strong> 981 000 000<br>` called on the `<strong>`,
/// yields `"981 000 000"`.
pub fn text_until_br(el: ElementRef<'_>) -> String {
    let mut value = s!();
    for node in el.next_siblings() {
        match node.value() {
            Node::Element(e) if e.name().eq_ignore_ascii_case("br") => break,
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(node) {
                    value.push_str(&text_joined(child));
                }
            }
            Node::Text(t) => value.push_str(t),
            _ => {}
        }
    }
    normalize_ws(&value)
}

/// Next sibling element with the given tag name, skipping everything else.
pub fn next_sibling_named<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn joined_vs_tight() {
        let doc = Html::parse_fragment("<a>  Agencias de  <b>Madrid</b> </a>");
        let a = doc.select(selector!("a")).next().unwrap();
        assert_eq!(text_joined(a), "Agencias de Madrid");
        assert_eq!(text_tight(a), "Agencias deMadrid");
    }

    #[test]
    fn until_br_stops_at_break() {
        let doc = Html::parse_fragment(
            "<p><strong>Dirección:</strong> Rúa  Real, <em>12</em><br>Otra cosa</p>",
        );
        let strong = doc.select(selector!("strong")).next().unwrap();
        assert_eq!(text_until_br(strong), "Rúa Real, 12");
    }

    #[test]
    fn sibling_named_skips_other_tags() {
        let doc = Html::parse_fragment(
            r#"<div><p class="infoLabel">Url</p><span>x</span><p>www.shop.es</p></div>"#,
        );
        let label = doc.select(selector!("p.infoLabel")).next().unwrap();
        let value = next_sibling_named(label, "p").unwrap();
        assert_eq!(text_joined(value), "www.shop.es");
    }

    #[test]
    fn attr_trims_and_defaults() {
        let doc = Html::parse_fragment(r#"<a href="  /x  ">x</a>"#);
        let a = doc.select(selector!("a")).next().unwrap();
        assert_eq!(attr(a, "href"), "/x");
        assert_eq!(attr(a, "title"), "");
    }
}
