// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// `<dir>/<name>`, which must already exist (it is the previous stage's output).
pub fn require_input(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(Error::MissingInput { path });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_directory_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a/b/c");
        ensure_directory(&dir).unwrap();
        assert!(dir.is_dir());
        // second call is a no-op
        ensure_directory(&dir).unwrap();
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("f");
        fs::write(&file, "x").unwrap();
        assert!(matches!(ensure_directory(&file), Err(Error::NotADirectory(_))));
    }

    #[test]
    fn require_input_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        match require_input(tmp.path(), "ciudades.csv") {
            Err(Error::MissingInput { path }) => assert!(path.ends_with("ciudades.csv")),
            other => panic!("unexpected: {other:?}"),
        }
        fs::write(tmp.path().join("ciudades.csv"), "ciudad,url\n").unwrap();
        assert!(require_input(tmp.path(), "ciudades.csv").is_ok());
    }
}
