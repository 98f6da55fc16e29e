// src/scrape/mod.rs
//! Stage runners. Each public fn here is one pipeline stage: read the previous
//! stage's CSV (or fetch a start page), drive the `specs` parsers, write CSV.
pub mod amisando;
pub mod comunicare;
pub mod contact;
pub mod seraportiendas;

use std::path::PathBuf;
use std::{thread, time::Duration};

use crate::config::{RunOptions, TimeoutPolicy};
use crate::core::net::{Fetcher, read_snapshot};
use crate::error::Result;

/// What a stage produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub rows_written: usize,
    /// Items skipped because the output already had them.
    pub skipped: usize,
}

impl RunSummary {
    pub fn new(output: PathBuf, rows_written: usize) -> Self {
        Self { output, rows_written, skipped: 0 }
    }
}

/// Start page of a single-page stage: the `--html-file` snapshot if given, else a GET.
pub(crate) fn load_page(
    opts: &RunOptions,
    headers: &[(&'static str, &'static str)],
    url: &str,
) -> Result<String> {
    if let Some(path) = &opts.html_file {
        logf!("Reading snapshot {}", path.display());
        return read_snapshot(path);
    }
    logf!("Fetching {url}");
    Fetcher::new(headers, opts.timeouts(TimeoutPolicy::STANDARD))?.get_text(url)
}

/// Politeness delay between requests to the same site.
pub(crate) fn pause(ms: u64) {
    thread::sleep(Duration::from_millis(ms));
}

/// `--max-items` reached?
pub(crate) fn budget_spent(opts: &RunOptions, considered: usize) -> bool {
    opts.max_items.is_some_and(|max| considered >= max)
}
