// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::config::consts::DATA_EXT;

/// Read a one-entry-per-line list (leagues, seasons). Lines are trimmed;
/// blank lines and `#` comments are skipped.
pub fn read_list_file(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect())
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Ensure the parent of `path` exists, then create/truncate the file.
pub fn create_with_parents(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::File::create(path)
}

/// Sub-directories of `dir`, sorted by name.
pub fn sorted_subdirs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() { out.push(path); }
    }
    out.sort();
    Ok(out)
}

/// Regular files of `dir`, sorted by name. Extension is not checked here;
/// loading a non-CSV file is reported by `Championship::load`.
pub fn sorted_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() { out.push(path); }
    }
    out.sort();
    Ok(out)
}

pub fn has_data_ext(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(DATA_EXT)
}

pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_file_skips_blanks_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("leagues.txt");
        fs::write(&p, "spain/acb\n\n  # retired\nitaly/lega-a  \n").unwrap();
        assert_eq!(read_list_file(&p).unwrap(), vec!["spain/acb", "italy/lega-a"]);
    }

    #[test]
    fn ensure_directory_refuses_files() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("taken");
        fs::write(&p, "x").unwrap();
        assert!(ensure_directory(&p).is_err());
        assert!(ensure_directory(&dir.path().join("a/b")).is_ok());
    }

    #[test]
    fn listings_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for n in ["b.csv", "a.csv"] { fs::write(dir.path().join(n), "").unwrap(); }
        fs::create_dir(dir.path().join("2021-2022")).unwrap();
        fs::create_dir(dir.path().join("2020-2021")).unwrap();
        let files: Vec<_> = sorted_files(dir.path()).unwrap().iter().map(|p| file_name_lossy(p)).collect();
        assert_eq!(files, vec!["a.csv", "b.csv"]);
        let dirs: Vec<_> = sorted_subdirs(dir.path()).unwrap().iter().map(|p| file_name_lossy(p)).collect();
        assert_eq!(dirs, vec!["2020-2021", "2021-2022"]);
    }
}
