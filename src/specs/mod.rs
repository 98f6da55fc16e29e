// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! This module hosts the **page-specific parsers** for every directory site the
//! pipeline reads. Each spec knows *where the ground truth lives in the HTML* of
//! one kind of page and how to pull it out with CSS selectors.
//!
//! ## What lives here
//! - **Pure HTML parsing**: a page's markup in, small typed rows out
//!   (`Provincia`, `Company`, `Subcategoria`, …).
//! - **Selector choice & precedence** (e.g. the `div.linkshop` button beats the
//!   `Url` info label on a seraportiendasonline ficha).
//! - **Per-page dedupe** where the page itself repeats entries.
//! - Default entry URLs for each site.
//!
//! ## What does **not** live here
//! - **Networking**: callers hand in the HTML (fetched or read from a snapshot).
//! - **CSV reading/writing and resume sets**: `store` and the `scrape` stages.
//! - **Cross-page dedupe**: a stage decides what "seen" means across pages.
//!
//! ## Typical call chain
//! ```text
//! cli → runner → registry → scrape::<site>::<stage>()
//!                               ├─ core::net::Fetcher::get_text()
//!                               ├─ specs::<site>::extract_*()
//!                               └─ store::AppendWriter / write_table
//! ```
//!
//! ## Conventions & invariants
//! - Visible text is read as trimmed pieces joined by a
//!   space (`core::html::text_joined`) unless noted.
//! - Relative links are resolved against the page they came from, except where a
//!   stage stores the raw `href` on purpose (amisando links, ficha URLs).
//! - Column shapes are fixed per stage and documented next to the stage.
//!
//! ## Testing notes
//! - Every spec is tested **offline** against small HTML fixtures.
//!
//! In short: **`specs` knows how to read the pages.** Other layers decide when
//! to fetch, what to skip and where rows go.
pub mod amisando;
pub mod comunicare;
pub mod seraportiendas;
