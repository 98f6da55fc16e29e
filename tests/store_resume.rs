// tests/store_resume.rs
//
// Append/resume behaviour of store::AppendWriter and store::load_key_set.
//
use std::fs;

use lead_scrape::core::sanitize::normalize_empresa;
use lead_scrape::store::{self, AppendWriter, non_empty};

#[test]
fn header_written_once_across_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("website.csv");

    let mut w = AppendWriter::open(&path, &["web", "email"]).unwrap();
    w.write_row(["https://a.es", "info@a.es"]).unwrap();
    w.flush().unwrap();
    drop(w);

    let mut w = AppendWriter::open(&path, &["web", "email"]).unwrap();
    w.write_row(["https://b.es", ""]).unwrap();
    w.flush().unwrap();
    drop(w);

    let raw = fs::read_to_string(&path).unwrap();
    assert_eq!(raw.matches("web,email").count(), 1);
    assert_eq!(raw, "web,email\r\nhttps://a.es,info@a.es\r\nhttps://b.es,\r\n");
}

#[test]
fn empty_existing_file_gets_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empresas.csv");
    fs::write(&path, "").unwrap();

    let mut w = AppendWriter::open(&path, &["empresa"]).unwrap();
    w.write_row(["Tienda"]).unwrap();
    w.flush().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "empresa\r\nTienda\r\n");
}

#[test]
fn key_set_from_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let keys = store::load_key_set(&dir.path().join("nope.csv"), |r| non_empty(r.get("web"))).unwrap();
    assert!(keys.is_empty());
}

#[test]
fn key_set_skips_blank_keys_and_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("website.csv");
    fs::write(&path, "ciudad,web\nMadrid, https://a.es \nSevilla,\nBilbao,https://b.es\n").unwrap();

    let keys = store::load_key_set(&path, |r| non_empty(r.get("web"))).unwrap();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains("https://a.es"));

    // column the file doesn't have
    let none = store::load_key_set(&path, |r| non_empty(r.get("empresa_url"))).unwrap();
    assert!(none.is_empty());
}

#[test]
fn normalized_name_keys_collapse_variants() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("websites.csv");
    fs::write(&path, "empresa,website\nZapatería López,\n\"ZAPATERIA  LOPEZ\",x\nOtra®,\n").unwrap();

    let keys = store::load_key_set(&path, |r| non_empty(&normalize_empresa(r.get("empresa")))).unwrap();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains("zapateria lopez"));
    assert!(keys.contains("otra"));
}
