// src/scrape/comunicare.rs
//! comunicare.es stages: ciudades → empresas → websites.

use std::collections::HashSet;

use crate::config::consts::{HEADERS_INDEX, HEADERS_LISTING, HEADERS_PROBE, LISTING_PAUSE_MS};
use crate::config::{RunOptions, TimeoutPolicy};
use crate::core::Fetcher;
use crate::core::sanitize::ensure_url;
use crate::error::Result;
use crate::file::require_input;
use crate::progress::Progress;
use crate::specs::comunicare as spec;
use crate::store::{self, AppendWriter, non_empty};

use super::contact::probe_contact;
use super::{RunSummary, budget_spent, load_page, pause};

const CIUDADES_COLUMNS: &[&str] = &["ciudad", "url"];
const EMPRESAS_COLUMNS: &[&str] = &["ciudad", "ciudad_url", "empresa", "anchor", "web"];
const WEBSITE_COLUMNS: &[&str] = &["ciudad", "ciudad_url", "empresa", "web", "email", "telefono"];

pub fn ciudades(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    let html = load_page(opts, HEADERS_INDEX, opts.url_or(spec::CIUDADES_URL))?;
    let cities = spec::extract_city_links(&html);

    let out = opts.out_dir().join("ciudades.csv");
    let n = store::write_table(
        &out,
        CIUDADES_COLUMNS,
        cities.iter().map(|c| [c.ciudad.as_str(), c.url.as_str()]),
    )?;

    progress.log(&format!("✅ Saved {n} cities to {}", out.display()));
    Ok(RunSummary::new(out, n))
}

/// One GET per city; any failure aborts the run. Companies are unique per `(ciudad, web)`.
pub fn empresas(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    let input = require_input(&opts.input_dir(), "ciudades.csv")?;
    let fetcher = Fetcher::new(HEADERS_LISTING, opts.timeouts(TimeoutPolicy::STANDARD))?;

    let mut rows: Vec<[String; 5]> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    let cities = store::read_rows(&input)?;
    progress.begin(cities.len());
    for row in &cities {
        let ciudad = row.get("ciudad");
        let ciudad_url = row.get("url");
        if ciudad.is_empty() || ciudad_url.is_empty() {
            continue;
        }
        progress.log(&format!("\n▶ {ciudad}: {ciudad_url}"));

        let html = fetcher.get_text(ciudad_url)?;
        let companies = spec::extract_companies(&html, ciudad_url);
        progress.log(&format!("  - found {} companies", companies.len()));

        let mut added = 0;
        for c in companies {
            if !seen.insert((s!(ciudad), c.web.clone())) {
                continue;
            }
            rows.push([s!(ciudad), s!(ciudad_url), c.empresa, c.anchor, c.web]);
            added += 1;
        }
        progress.log(&format!("  +{added} new (total: {})", rows.len()));
        progress.item_done(ciudad);
        pause(LISTING_PAUSE_MS);
    }

    let out = opts.out_dir().join("empresas.csv");
    let n = store::write_table(&out, EMPRESAS_COLUMNS, &rows)?;

    progress.log(&format!("\n✅ Saved {n} companies to {}", out.display()));
    Ok(RunSummary::new(out, n))
}

/// Email and phone for every company website. Resumable by `web`.
pub fn websites(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    let input = require_input(&opts.input_dir(), "empresas.csv")?;
    let timeouts = opts.timeouts(TimeoutPolicy::STANDARD);
    logf!("Timeouts: connect {:?}, read {:?}", timeouts.connect, timeouts.read);

    let out = opts.out_dir().join("website.csv");
    let mut processed = store::load_key_set(&out, |r| non_empty(r.get("web")))?;
    if !processed.is_empty() {
        progress.log(&format!(
            "↩️ Resuming: {} websites already in {}",
            processed.len(),
            out.display()
        ));
    }

    let fetcher = Fetcher::new(HEADERS_PROBE, timeouts)?;
    let mut writer = AppendWriter::open(&out, WEBSITE_COLUMNS)?;
    let (mut written, mut skipped, mut considered) = (0, 0, 0);

    let rows = store::read_rows(&input)?;
    progress.begin(rows.len());
    for row in &rows {
        if budget_spent(opts, considered) {
            break;
        }
        let ciudad = row.get("ciudad");
        let ciudad_url = row.get("ciudad_url");
        let empresa = row.get("empresa");
        let web = ensure_url(row.get("web"));
        if web.is_empty() {
            continue;
        }
        considered += 1;

        if processed.contains(&web) {
            skipped += 1;
            continue;
        }
        progress.log(&format!("▶ {empresa} | {ciudad} | {web}"));

        let contact = probe_contact(&fetcher, &web);
        if contact.email.is_empty() && contact.telefono.is_empty() {
            logd!("no contact data on {web}");
        }

        writer.write_row([
            ciudad,
            ciudad_url,
            empresa,
            web.as_str(),
            contact.email.as_str(),
            contact.telefono.as_str(),
        ])?;
        writer.flush()?;

        progress.item_done(&web);
        processed.insert(web);
        written += 1;
    }

    progress.log(&format!("✅ Added {written} new rows to {}", out.display()));
    Ok(RunSummary { output: out, rows_written: written, skipped })
}
