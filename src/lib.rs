// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod specs;

pub mod championship;
pub mod dates;
pub mod file;
pub mod outcomes;
pub mod progress;
pub mod record;
pub mod report;
pub mod runner;
pub mod source;
pub mod sport;
pub mod standings;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use championship::Championship;
pub use error::{Error, Result};
pub use record::{MatchRecord, Outcome, Stage};
pub use sport::Sport;
