// src/scrape/seraportiendas.rs
//! seraportiendasonline.com stages: categorias → subcategorias → empresas → websites.
//!
//! `empresas` walks every subcategory's pagination and can be resumed page by
//! page. `websites` visits each shop's ficha, then the shop itself, and ends
//! with a summary over the whole output file.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::consts::{HEADERS_INDEX, HEADERS_LISTING, LISTING_PAUSE_MS, PROBE_PAUSE_MS};
use crate::config::{RunOptions, TimeoutPolicy};
use crate::core::Fetcher;
use crate::core::contact::{detect_platform, first_phone, pick_email_fallback, pick_email_strict};
use crate::core::links::domain_from_url;
use crate::core::sanitize::{ensure_url, normalize_empresa};
use crate::error::Result;
use crate::file::require_input;
use crate::progress::Progress;
use crate::specs::seraportiendas as spec;
use crate::store::{self, AppendWriter, non_empty};

use super::contact::check_alive;
use super::{RunSummary, budget_spent, load_page, pause};

const CATEGORIAS_COLUMNS: &[&str] = &["categoria", "url"];
const SUBCATEGORIAS_COLUMNS: &[&str] = &[
    "categoria",
    "categoria_url",
    "subcategoria",
    "subcategoria_url",
    "empresas_count",
    "subcat_id",
];
const EMPRESAS_COLUMNS: &[&str] = &[
    "categoria",
    "subcategoria",
    "subcategoria_url",
    "page",
    "empresa",
    "imagen",
    "ficha_url",
];
const WEBSITES_COLUMNS: &[&str] = &[
    "empresa",
    "website",
    "platform",
    "is_alive",
    "email",
    "telefono",
    "ficha_url",
];

const UNKNOWN_PLATFORM: &str = "(unknown)";

pub fn categorias(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    // with --html-file, --url is still the base for relative links
    let url = opts.url_or(spec::HOME_URL);
    let html = load_page(opts, HEADERS_INDEX, url)?;
    let cats = spec::extract_categories(&html, url);

    let out = opts.out_dir().join("categorias.csv");
    let n = store::write_table(
        &out,
        CATEGORIAS_COLUMNS,
        cats.iter().map(|c| [c.categoria.as_str(), c.url.as_str()]),
    )?;

    progress.log(&format!("✅ Saved {n} categories to {}", out.display()));
    Ok(RunSummary::new(out, n))
}

/// One GET per category (fatal on error). Unique per `(categoria_url, subcategoria_url)`.
pub fn subcategorias(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    let input = require_input(&opts.input_dir(), "categorias.csv")?;
    let fetcher = Fetcher::new(HEADERS_LISTING, opts.timeouts(TimeoutPolicy::STANDARD))?;

    let mut rows: Vec<[String; 6]> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    let cats = store::read_rows(&input)?;
    progress.begin(cats.len());
    for row in &cats {
        let categoria = row.get("categoria");
        let categoria_url = row.get("url");
        if categoria.is_empty() || categoria_url.is_empty() {
            continue;
        }
        progress.log(&format!("\n▶ {categoria}: {categoria_url}"));

        let html = fetcher.get_text(categoria_url)?;
        let subs = spec::extract_subcategories(&html, categoria_url);
        progress.log(&format!("  - found {} subcategories", subs.len()));

        let mut added = 0;
        for sub in subs {
            if !seen.insert((s!(categoria_url), sub.subcategoria_url.clone())) {
                continue;
            }
            rows.push([
                s!(categoria),
                s!(categoria_url),
                sub.subcategoria,
                sub.subcategoria_url,
                sub.empresas_count.to_string(),
                sub.subcat_id,
            ]);
            added += 1;
        }
        progress.log(&format!("  +{added} new (total: {})", rows.len()));
        progress.item_done(categoria);
        pause(LISTING_PAUSE_MS);
    }

    let out = opts.out_dir().join("subcategorias.csv");
    let n = store::write_table(&out, SUBCATEGORIAS_COLUMNS, &rows)?;

    progress.log(&format!("\n✅ Saved {n} subcategories to {}", out.display()));
    Ok(RunSummary::new(out, n))
}

/// Listing pages already in `empresas.csv`: `(subcategoria_url, page)` → rows stored for it.
fn load_done_pages(path: &Path) -> Result<HashMap<(String, i64), usize>> {
    let mut done = HashMap::new();
    if !path.exists() {
        return Ok(done);
    }
    for r in store::read_rows(path)? {
        let Ok(page) = r.get("page").parse::<i64>() else {
            continue;
        };
        *done.entry((s!(r.get("subcategoria_url")), page)).or_insert(0) += 1;
    }
    Ok(done)
}

/// Walks each subcategory's pages, following "Siguiente".
/// Pages already stored are fetched again only to find the next link; their
/// stored rows count as skipped.
pub fn empresas(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    let input = require_input(&opts.input_dir(), "subcategorias.csv")?;

    let out = opts.out_dir().join("empresas.csv");
    let mut done = load_done_pages(&out)?;
    if !done.is_empty() {
        progress.log(&format!("↩️ Resuming: {} pages already processed", done.len()));
    }

    let fetcher = Fetcher::new(HEADERS_LISTING, opts.timeouts(TimeoutPolicy::STANDARD))?;
    let mut writer = AppendWriter::open(&out, EMPRESAS_COLUMNS)?;
    let (mut written, mut skipped) = (0, 0);

    for row in store::read_rows(&input)? {
        let categoria = row.get("categoria");
        let subcategoria = row.get("subcategoria");
        let subcat_url = row.get("subcategoria_url");
        if subcat_url.is_empty() {
            continue;
        }
        progress.log(&format!("\n▶ Subcategory: {categoria} / {subcategoria}"));

        let mut visited: HashSet<String> = HashSet::new();
        let mut next = Some(s!(subcat_url));

        while let Some(url) = next.take() {
            if !visited.insert(url.clone()) {
                logw!("pagination of {subcat_url} loops back to {url}; moving on");
                break;
            }
            let page = spec::page_number(&url);

            if let Some(&stored) = done.get(&(s!(subcat_url), page)) {
                progress.log(&format!("  ⏭️ page {page} already processed"));
                skipped += stored;
                next = spec::next_page(&fetcher.get_any(&url)?, subcat_url);
                continue;
            }
            progress.log(&format!("  📄 page {page}"));

            let html = fetcher.get_text(&url)?;
            let listing = spec::parse_listing(&html, subcat_url);
            let page_str = page.to_string();
            for item in &listing.items {
                writer.write_row([
                    categoria,
                    subcategoria,
                    subcat_url,
                    page_str.as_str(),
                    item.empresa.as_str(),
                    item.imagen.as_str(),
                    item.ficha_url.as_str(),
                ])?;
            }
            writer.flush()?;
            written += listing.items.len();
            done.insert((s!(subcat_url), page), listing.items.len());

            next = listing.next;
            pause(LISTING_PAUSE_MS);
        }
    }

    progress.log(&format!("\n✅ Company scraping finished: {}", out.display()));
    Ok(RunSummary { output: out, rows_written: written, skipped })
}

/// One `websites.csv` row minus the name and ficha URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct ShopCheck {
    website: String,
    platform: &'static str,
    alive: bool,
    email: String,
    telefono: String,
}

/// Ficha first, then the shop's home page when the ficha names one.
fn check_shop(fetcher: &Fetcher, ficha_html: &str) -> ShopCheck {
    let ficha = spec::extract_ficha(ficha_html);
    let mut shop = ShopCheck {
        website: ficha.website,
        telefono: ficha.telefono,
        ..ShopCheck::default()
    };
    if shop.website.is_empty() {
        return shop;
    }

    let live = check_alive(fetcher, &shop.website);
    shop.alive = live.alive;
    if live.html.is_empty() {
        return shop;
    }

    shop.platform = detect_platform(&live.html).map(|p| p.as_str()).unwrap_or("");
    let domain = domain_from_url(&shop.website);
    shop.email = pick_email_strict(&live.html, &domain);
    if shop.email.is_empty() {
        shop.email = pick_email_fallback(&live.html);
    }
    if shop.telefono.is_empty() {
        shop.telefono = first_phone(&live.html);
    }
    shop
}

/// Distinct shops by normalized name. Resumable; a ficha that fails to load
/// still gets a row (not alive, everything else empty).
pub fn websites(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    let input = require_input(&opts.input_dir(), "empresas.csv")?;
    let timeouts = opts.timeouts(TimeoutPolicy::FAST);
    logf!("Timeouts: connect {:?}, read {:?}", timeouts.connect, timeouts.read);

    let out = opts.out_dir().join("websites.csv");
    let mut seen = if store::is_missing_or_empty(&out) {
        HashSet::new()
    } else {
        store::load_key_set(&out, |r| non_empty(&normalize_empresa(r.get("empresa"))))?
    };
    if !seen.is_empty() {
        progress.log(&format!(
            "↩️ Resuming: {} companies already in {}",
            seen.len(),
            out.display()
        ));
    }

    let fetcher = Fetcher::new(HEADERS_LISTING, timeouts)?;
    let mut writer = AppendWriter::open(&out, WEBSITES_COLUMNS)?;
    let (mut written, mut skipped, mut considered) = (0, 0, 0);

    let rows = store::read_rows(&input)?;
    progress.begin(rows.len());
    for row in &rows {
        if budget_spent(opts, considered) {
            break;
        }
        let empresa = row.get("empresa");
        let ficha_url = row.get("ficha_url");
        if empresa.is_empty() || ficha_url.is_empty() {
            continue;
        }
        let key = normalize_empresa(empresa);
        if key.is_empty() {
            continue;
        }
        if seen.contains(&key) {
            skipped += 1;
            continue;
        }

        considered += 1;
        progress.log(&format!("▶ {empresa} | {ficha_url}"));

        let (shop, fetched) = match fetcher.get_text(&ensure_url(ficha_url)) {
            Ok(html) => (check_shop(&fetcher, &html), true),
            Err(e) => {
                progress.item_failed(empresa, &e.to_string());
                (ShopCheck::default(), false)
            }
        };

        writer.write_row([
            empresa,
            shop.website.as_str(),
            shop.platform,
            if shop.alive { "1" } else { "0" },
            shop.email.as_str(),
            shop.telefono.as_str(),
            ficha_url,
        ])?;
        writer.flush()?;

        seen.insert(key);
        written += 1;
        if fetched {
            progress.item_done(empresa);
        }
        pause(PROBE_PAUSE_MS);
    }

    progress.log(&format!("✅ Added {written} new rows to {}", out.display()));

    for line in summary_lines(&out)? {
        progress.log(&line);
    }
    Ok(RunSummary { output: out, rows_written: written, skipped })
}

/* ---------------- Summary ---------------- */

/// Counts over a whole `websites.csv`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WebsitesSummary {
    pub rows: usize,
    pub websites: usize,
    pub alive: usize,
    pub alive_with_phone: usize,
    pub alive_with_email: usize,
    /// Most common first; ties keep first-seen order.
    pub platforms_alive: Vec<(String, usize)>,
    pub platforms_all: Vec<(String, usize)>,
}

/// Insertion-ordered counter.
#[derive(Default)]
struct Tally(Vec<(String, usize)>);

impl Tally {
    fn add(&mut self, key: &str) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some((_, n)) => *n += 1,
            None => self.0.push((s!(key), 1)),
        }
    }

    fn most_common(mut self) -> Vec<(String, usize)> {
        // stable: equal counts stay in first-seen order
        self.0.sort_by(|a, b| b.1.cmp(&a.1));
        self.0
    }
}

fn is_truthy(v: &str) -> bool {
    matches!(v, "1" | "true" | "True")
}

/// `None` while the output file doesn't exist or is empty.
pub fn summarize(path: &Path) -> Result<Option<WebsitesSummary>> {
    if store::is_missing_or_empty(path) {
        return Ok(None);
    }

    let mut sum = WebsitesSummary::default();
    let mut plat_all = Tally::default();
    let mut plat_alive = Tally::default();

    for row in store::read_rows(path)? {
        sum.rows += 1;
        if !row.get("website").is_empty() {
            sum.websites += 1;
        }

        let platform = match row.get("platform") {
            "" => UNKNOWN_PLATFORM,
            p => p,
        };
        plat_all.add(platform);

        if is_truthy(row.get("is_alive")) {
            sum.alive += 1;
            plat_alive.add(platform);
            if !row.get("telefono").is_empty() {
                sum.alive_with_phone += 1;
            }
            if !row.get("email").is_empty() {
                sum.alive_with_email += 1;
            }
        }
    }

    sum.platforms_alive = plat_alive.most_common();
    sum.platforms_all = plat_all.most_common();
    Ok(Some(sum))
}

impl WebsitesSummary {
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![
            s!("\n📊 SUMMARY"),
            format!("- Companies (rows): {}", self.rows),
            format!("- Websites (non-empty): {}", self.websites),
            format!("- Alive: {}", self.alive),
            format!("- Phones (alive only): {}", self.alive_with_phone),
            format!("- Emails (alive only): {}", self.alive_with_email),
            s!("\n🧩 Platforms (alive only):"),
        ];
        out.extend(self.platforms_alive.iter().map(|(k, v)| format!("  - {k}: {v}")));
        out.push(s!("\n🧩 Platforms (all):"));
        out.extend(self.platforms_all.iter().map(|(k, v)| format!("  - {k}: {v}")));
        out
    }
}

pub fn summary_lines(path: &Path) -> Result<Vec<String>> {
    Ok(match summarize(path)? {
        Some(sum) => sum.lines(),
        None => vec![s!("\n📊 SUMMARY"), s!("- No output yet.")],
    })
}
