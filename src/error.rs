// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing argument: {0}")]
    MissingArg(&'static str),

    #[error("input not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("no stage `{entity}` for {customer}/{base} (try `lead_scrape list`)")]
    UnknownStage {
        customer: String,
        base: String,
        entity: String,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request failed for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Timeouts are the one transport failure worth calling out in logs.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http { source, .. } if source.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
