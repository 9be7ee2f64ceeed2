// src/specs/mod.rs
//! # Results-page “specs”
//!
//! This module hosts the **page-specific reading rules**: how the flattened
//! text of a results table turns into typed [`MatchRecord`](crate::record::MatchRecord)s.
//!
//! ## What lives here
//! - **Pure token parsing**. The input is the table's visible text split on
//!   line breaks; no tags or classes survive to this point, so everything is
//!   decided by token shape and position.
//! - **Date-token recognition** (`DD.MM. HH:MM`) and the year-less timestamp
//!   it produces.
//!
//! ## What does **not** live here
//! - **Fetching/rendering** pages (`source`), **year resolution** (`dates`),
//!   **persistence** (`store`).
//!
//! ## Typical call chain
//! ```text
//! runner::crawl → source::PageSource::fetch_results_text
//!               → specs::results_table::tokenize → parse_tokens
//!               → dates::enhance_season_dates → store::write_matches
//! ```
//!
//! ## Testing notes
//! - The parser is a plain state machine over a token slice; tests feed
//!   slices directly, no fixtures needed.
pub mod results_table;
