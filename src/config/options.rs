// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::{DEFAULT_DATA_ROOT, TIMEOUT_ENV};

/// Everything a stage may read from the command line.
/// Stages ignore the fields they have no use for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub customer: String,
    pub base: String,
    pub entity: String,
    /// Root of the `<customer>/<base>/*.csv` tree.
    pub data_root: PathBuf,
    /// Where output goes; defaults to the input directory.
    pub out_dir: Option<PathBuf>,
    /// Overrides the stage's built-in start URL.
    pub url: Option<String>,
    /// Parse a saved page instead of fetching (for sites that answer 403).
    pub html_file: Option<PathBuf>,
    pub provincia_url: Option<String>,
    /// Raw seconds as given; parsed per stage so a bad value falls back to that stage's default.
    pub timeout: Option<String>,
    pub max_items: Option<usize>,
}

impl RunOptions {
    pub fn new(customer: &str, base: &str, entity: &str) -> Self {
        Self {
            customer: s!(customer),
            base: s!(base),
            entity: s!(entity),
            data_root: PathBuf::from(DEFAULT_DATA_ROOT),
            out_dir: None,
            url: None,
            html_file: None,
            provincia_url: None,
            timeout: None,
            max_items: None,
        }
    }

    /// `<data_root>/<customer>/<base>`
    pub fn input_dir(&self) -> PathBuf {
        self.data_root.join(&self.customer).join(&self.base)
    }

    pub fn out_dir(&self) -> PathBuf {
        self.out_dir.clone().unwrap_or_else(|| self.input_dir())
    }

    pub fn url_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.url.as_deref().filter(|u| !u.trim().is_empty()).unwrap_or(default)
    }

    /// `--timeout`, then `SCRAPE_TIMEOUT`, then the policy default.
    pub fn timeouts(&self, policy: TimeoutPolicy) -> Timeouts {
        let raw = self.timeout.clone().or_else(|| std::env::var(TIMEOUT_ENV).ok());
        policy.resolve(raw.as_deref())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeoutPolicy {
    pub default_secs: f64,
    pub connect_cap_secs: f64,
}

impl TimeoutPolicy {
    /// Directory pages and contact probing.
    pub const STANDARD: TimeoutPolicy = TimeoutPolicy { default_secs: 30.0, connect_cap_secs: 10.0 };
    /// Liveness checks over thousands of shop sites; dead hosts must fail fast.
    pub const FAST: TimeoutPolicy = TimeoutPolicy { default_secs: 8.0, connect_cap_secs: 4.0 };

    pub fn resolve(&self, raw: Option<&str>) -> Timeouts {
        let secs = raw
            .and_then(|r| r.trim().parse::<f64>().ok())
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(self.default_secs);

        let connect = secs.min(self.connect_cap_secs);
        Timeouts {
            connect: Duration::try_from_secs_f64(connect).unwrap_or(Duration::from_secs(10)),
            read: Duration::try_from_secs_f64(secs).unwrap_or(Duration::from_secs(30)),
        }
    }
}

/// Connect timeout is kept short so a dead handshake doesn't eat the read budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
}
