// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::sport::Sport;

/// Library-wide errors.
///
/// Recoverable data problems (a malformed match body, a missing results
/// table, a season that fails validation) are *not* errors: they are logged
/// and collected by the runners. Everything here is either a caller-level
/// misconfiguration or a misuse of the API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error for {url}: {message}")]
    Http { url: String, message: String },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("File extension not supported (expected .csv): {}", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("Unknown sport: {0:?}")]
    InvalidSport(String),

    #[error("Line {line}: invalid {field} value {value:?}")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: home/away period scores differ in length")]
    MismatchedPeriods { line: u64 },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid season {0:?} (expected e.g. 2020-2021)")]
    InvalidSeason(String),

    #[error("Point computation is not defined for {0}")]
    UnsupportedSport(Sport),

    #[error("Refusing to write an empty match list to {}", .0.display())]
    NoMatches(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
