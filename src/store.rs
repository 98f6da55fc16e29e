// src/store.rs
//! Flat-file storage: every stage reads and writes plain CSV.
//!
//! - Input rows are read by header name. Short rows are fine; a missing column
//!   reads as an empty string and every value is trimmed.
//! - Output is comma-separated with CRLF record terminators and minimal quoting.
//! - Resumable stages open their output with [`AppendWriter`], which writes the
//!   header only when the file is new or empty.

use std::collections::{HashMap, HashSet};
use std::fs::{self, File, OpenOptions};
use std::hash::Hash;
use std::path::Path;

use csv::{ReaderBuilder, Terminator, WriterBuilder};

use crate::error::Result;

/// One input record keyed by column name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row(HashMap<String, String>);

impl Row {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Row(pairs.into_iter().map(|(k, v)| (s!(k), s!(v))).collect())
    }

    /// Trimmed value, empty when the column is missing.
    pub fn get(&self, column: &str) -> &str {
        self.0.get(column).map(|v| v.trim()).unwrap_or("")
    }
}

/// `Some(owned)` for non-empty values. Handy as a key extractor.
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() { None } else { Some(s!(value)) }
}

fn writer_builder() -> WriterBuilder {
    let mut b = WriterBuilder::new();
    b.terminator(Terminator::CRLF);
    b
}

pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(Row(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), s!(v)))
                .collect(),
        ));
    }
    logd!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Keys already present in a stage's own output. A missing file is an empty set.
pub fn load_key_set<K, F>(path: &Path, key: F) -> Result<HashSet<K>>
where
    K: Eq + Hash,
    F: Fn(&Row) -> Option<K>,
{
    if !path.exists() {
        return Ok(HashSet::new());
    }
    Ok(read_rows(path)?.iter().filter_map(key).collect())
}

pub fn is_missing_or_empty(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true)
}

/// Overwrite `path` with a header and all rows.
pub fn write_table<R, I, T>(path: &Path, headers: &[&str], rows: R) -> Result<usize>
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut w = writer_builder().from_path(path)?;
    w.write_record(headers)?;
    let mut n = 0;
    for row in rows {
        w.write_record(row)?;
        n += 1;
    }
    w.flush()?;
    logd!("wrote {n} rows to {}", path.display());
    Ok(n)
}

/// Append-mode CSV writer for resumable stages.
pub struct AppendWriter {
    inner: csv::Writer<File>,
}

impl AppendWriter {
    pub fn open(path: &Path, headers: &[&str]) -> Result<Self> {
        let fresh = is_missing_or_empty(path);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut inner = writer_builder().has_headers(false).from_writer(file);
        if fresh {
            inner.write_record(headers)?;
            inner.flush()?;
        }
        Ok(Self { inner })
    }

    pub fn write_row<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.inner.write_record(fields)?;
        Ok(())
    }

    /// Push buffered rows to disk; stages call this per item so an interrupted run keeps its work.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
