// src/core/net.rs
// Blocking HTTP GET. One client per stage so cookies and keep-alive carry across requests.

use std::path::Path;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::Timeouts;
use crate::error::{Error, Result};

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// `headers` is one of the presets in `config::consts`.
    pub fn new(headers: &[(&'static str, &'static str)], timeouts: Timeouts) -> Result<Self> {
        let mut map = HeaderMap::new();
        for &(name, value) in headers {
            map.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }

        let client = Client::builder()
            .default_headers(map)
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.read)
            .build()
            .map_err(Error::Client)?;

        Ok(Self { client })
    }

    /// GET and return the body. Any status >= 400 is an error.
    pub fn get_text(&self, url: &str) -> Result<String> {
        let resp = self.send(url)?;
        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(Error::Status { url: s!(url), status: status.as_u16() });
        }
        resp.text().map_err(|source| Error::Http { url: s!(url), source })
    }

    /// GET and return the body whatever the status.
    /// Only used to rediscover pagination links on pages already stored.
    pub fn get_any(&self, url: &str) -> Result<String> {
        self.send(url)?
            .text()
            .map_err(|source| Error::Http { url: s!(url), source })
    }

    /// Tolerant variant for probing: any failure is `None` and only logged.
    pub fn get_ok(&self, url: &str) -> Option<String> {
        match self.get_text(url) {
            Ok(body) => Some(body),
            Err(e) => {
                if e.is_timeout() {
                    logd!("probe timeout: {url}");
                } else {
                    logd!("probe skipped: {e}");
                }
                None
            }
        }
    }

    fn send(&self, url: &str) -> Result<reqwest::blocking::Response> {
        logd!("GET {url}");
        self.client
            .get(url)
            .send()
            .map_err(|source| Error::Http { url: s!(url), source })
    }
}

/// Read a saved HTML snapshot. Invalid UTF-8 bytes are dropped.
pub fn read_snapshot(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::MissingInput { path: path.to_path_buf() });
    }
    let bytes = std::fs::read(path)?;
    Ok(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_drops_invalid_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("page.html");
        std::fs::write(&path, b"<p>Caf\xc3\xa9 \xff\xfeNorte</p>").unwrap();
        assert_eq!(read_snapshot(&path).unwrap(), "<p>Café Norte</p>");
    }

    #[test]
    fn missing_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_snapshot(&tmp.path().join("nope.html")),
            Err(Error::MissingInput { .. })
        ));
    }
}
