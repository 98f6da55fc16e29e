// src/scrape/amisando.rs
//! amisando.es stages: provincias → empresas → websites.
//!
//! `website-probe` is the quick look at the first few companies that came
//! before `websites`; it rewrites its output every time.

use crate::config::consts::{HEADERS_PLAIN, PROBE_DEFAULT_ITEMS};
use crate::config::{RunOptions, TimeoutPolicy};
use crate::core::Fetcher;
use crate::core::sanitize::ensure_url;
use crate::error::{Error, Result};
use crate::file::require_input;
use crate::progress::Progress;
use crate::specs::amisando::{self as spec, Ficha};
use crate::store::{self, AppendWriter, non_empty};

use super::contact::probe_email;
use super::{RunSummary, budget_spent, load_page};

const PROVINCIAS_COLUMNS: &[&str] = &["provincia", "url"];
const EMPRESAS_COLUMNS: &[&str] = &["empresa_url"];
const WEBSITE_COLUMNS: &[&str] = &[
    "direccion",
    "telefono",
    "paginaweb",
    "email",
    "provincia_url",
    "empresa_url",
];
const PROBE_COLUMNS: &[&str] = &["direccion", "telefono", "paginaweb", "email"];

pub fn provincias(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    let html = load_page(opts, HEADERS_PLAIN, opts.url_or(spec::PROVINCIAS_URL))?;
    let rows = spec::extract_provincias(&html);

    let out = opts.out_dir().join("provincias.csv");
    let n = store::write_table(
        &out,
        PROVINCIAS_COLUMNS,
        rows.iter().map(|p| [p.provincia.as_str(), p.url.as_str()]),
    )?;

    progress.log(&format!("✅ Saved {n} rows to {}", out.display()));
    Ok(RunSummary::new(out, n))
}

pub fn empresas(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    let url = opts
        .provincia_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(spec::DEFAULT_PROVINCIA_URL);
    let html = load_page(opts, HEADERS_PLAIN, url)?;
    let links = spec::extract_empresa_urls(&html);

    let out = opts.out_dir().join("empresas.csv");
    let n = store::write_table(&out, EMPRESAS_COLUMNS, links.iter().map(|l| [l.as_str()]))?;

    progress.log(&format!("✅ Saved {n} rows to {}", out.display()));
    Ok(RunSummary::new(out, n))
}

/// Ficha plus the email found on the company's own site.
/// `paginaweb` comes back normalized to a full URL.
fn enrich(fetcher: &Fetcher, html: &str) -> (Ficha, String) {
    let mut ficha = spec::extract_ficha(html);
    ficha.paginaweb = ensure_url(&ficha.paginaweb);
    let email = if ficha.paginaweb.is_empty() {
        s!()
    } else {
        probe_email(fetcher, &ficha.paginaweb)
    };
    (ficha, email)
}

fn describe(err: &Error) -> String {
    if err.is_timeout() { s!("timeout") } else { err.to_string() }
}

/// Resumable by `empresa_url`. A ficha that can't be fetched still gets a row,
/// with every field but the URLs empty.
pub fn websites(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    let input = require_input(&opts.input_dir(), "empresas.csv")?;
    let timeouts = opts.timeouts(TimeoutPolicy::STANDARD);
    logf!("Timeouts: connect {:?}, read {:?}", timeouts.connect, timeouts.read);

    let out = opts.out_dir().join("website.csv");
    let mut processed = store::load_key_set(&out, |r| non_empty(r.get("empresa_url")))?;
    if !processed.is_empty() {
        progress.log(&format!(
            "↩️ Resuming: {} companies already in {}",
            processed.len(),
            out.display()
        ));
    }

    let fetcher = Fetcher::new(HEADERS_PLAIN, timeouts)?;
    let mut writer = AppendWriter::open(&out, WEBSITE_COLUMNS)?;
    let (mut written, mut skipped, mut considered) = (0, 0, 0);

    let rows = store::read_rows(&input)?;
    progress.begin(rows.len());
    for row in &rows {
        if budget_spent(opts, considered) {
            break;
        }
        let provincia_url = row.get("provincia_url");
        let empresa_url = row.get("empresa_url");
        if empresa_url.is_empty() {
            continue;
        }
        considered += 1;

        if processed.contains(empresa_url) {
            skipped += 1;
            continue;
        }
        progress.log(&format!("▶ {provincia_url},{empresa_url}"));

        let (ficha, email, fetched) = match fetcher.get_text(empresa_url) {
            Ok(html) => {
                let (ficha, email) = enrich(&fetcher, &html);
                (ficha, email, true)
            }
            Err(e) => {
                progress.item_failed(empresa_url, &describe(&e));
                (Ficha::default(), s!(), false)
            }
        };

        writer.write_row([
            ficha.direccion.as_str(),
            ficha.telefono.as_str(),
            ficha.paginaweb.as_str(),
            email.as_str(),
            provincia_url,
            empresa_url,
        ])?;
        writer.flush()?;

        processed.insert(s!(empresa_url));
        written += 1;
        if fetched {
            progress.item_done(empresa_url);
        }
    }

    progress.log(&format!("✅ Added {written} new rows to {}", out.display()));
    Ok(RunSummary { output: out, rows_written: written, skipped })
}

/// First `--max-items` rows (default 10) of `empresas.csv`; failed fichas are left out.
pub fn website_probe(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    let input = require_input(&opts.input_dir(), "empresas.csv")?;
    let limit = opts.max_items.unwrap_or(PROBE_DEFAULT_ITEMS);
    let fetcher = Fetcher::new(HEADERS_PLAIN, opts.timeouts(TimeoutPolicy::STANDARD))?;

    let input_rows = store::read_rows(&input)?;
    progress.begin(input_rows.len().min(limit));

    let mut rows: Vec<[String; 4]> = Vec::new();
    for (i, row) in input_rows.iter().enumerate().take(limit) {
        let empresa_url = row.get("empresa_url");
        if empresa_url.is_empty() {
            continue;
        }
        progress.log(&format!("▶ [{}/{limit}] {empresa_url}", i + 1));

        let html = match fetcher.get_text(empresa_url) {
            Ok(html) => html,
            Err(e) => {
                progress.item_failed(empresa_url, &describe(&e));
                continue;
            }
        };
        let (ficha, email) = enrich(&fetcher, &html);
        rows.push([ficha.direccion, ficha.telefono, ficha.paginaweb, email]);
        progress.item_done(empresa_url);
    }

    let out = opts.out_dir().join("website_probe.csv");
    let n = store::write_table(&out, PROBE_COLUMNS, &rows)?;

    progress.log(&format!("✅ Saved {n} rows to {}", out.display()));
    Ok(RunSummary::new(out, n))
}
