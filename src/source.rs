// src/source.rs
//
// Where results-table text comes from. The crawler only needs the table's
// visible text, one line per cell; how the page is obtained is up to the
// source.

use std::path::PathBuf;

use log::debug;
use reqwest::blocking::Client;

use crate::config::consts::{BASE_URL, RESULTS_TABLE_ID};
use crate::core::{html, net, sanitize};
use crate::error::{Error, Result};
use crate::sport::Sport;

/// `{base}/{sport}/{league}-{season}/results`
pub fn league_url(sport: Sport, league: &str, season: &str) -> String {
    format!("{BASE_URL}/{}/{league}-{season}/results", sport.slug())
}

/// `{sport}_{league}_{season}`, used in logs, failures and snapshot names.
pub fn league_id(sport: Sport, league: &str, season: &str) -> String {
    format!("{}_{league}_{season}", sport.slug())
}

/// Visible text of the results table, one line per text run.
/// `None` when the page has no results table.
pub fn extract_results_text(page: &str) -> Option<String> {
    let inner = html::element_by_id(page, RESULTS_TABLE_ID)?;
    Some(html::visible_lines(inner).join("\n"))
}

pub trait PageSource {
    /// Results-table text for one league season.
    /// `Ok(None)`: the page was fetched but carries no results table.
    fn fetch_results_text(&mut self, url: &str, league_id: &str) -> Result<Option<String>>;
}

/* ---------------- Live pages ---------------- */

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        Ok(Self { client: net::client()? })
    }
}

impl PageSource for HttpSource {
    fn fetch_results_text(&mut self, url: &str, league_id: &str) -> Result<Option<String>> {
        let t = std::time::Instant::now();
        let page = net::http_get(&self.client, url)?;
        debug!("{league_id}: fetched {} bytes in {:?}", page.len(), t.elapsed());
        Ok(extract_results_text(&page))
    }
}

/* ---------------- Saved pages ---------------- */

/// Pre-rendered pages saved as `{dir}/{sanitized league id}.html`.
/// Results pages are filled in by scripts, so a plain GET of a live page
/// often has an empty table; a browser-saved copy does not.
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn snapshot_path(&self, league_id: &str) -> PathBuf {
        self.dir.join(join!(&sanitize::sanitize_file_stem(league_id), ".html"))
    }
}

impl PageSource for SnapshotSource {
    fn fetch_results_text(&mut self, _url: &str, league_id: &str) -> Result<Option<String>> {
        let path = self.snapshot_path(league_id);
        if !path.is_file() {
            return Err(Error::FileNotFound(path));
        }
        let page = std::fs::read_to_string(&path)?;
        Ok(extract_results_text(&page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_and_ids() {
        assert_eq!(
            league_url(Sport::Basketball, "spain/acb", "2020-2021"),
            "https://www.flashscore.com/basketball/spain/acb-2020-2021/results"
        );
        assert_eq!(league_id(Sport::Football, "england/premier-league", "2019-2020"),
            "football_england/premier-league_2019-2020");
    }

    #[test]
    fn snapshot_source_reads_table_text() {
        let dir = tempfile::tempdir().unwrap();
        let src_id = league_id(Sport::Football, "x/y", "2020-2021");
        let mut src = SnapshotSource::new(dir.path());
        std::fs::write(
            src.snapshot_path(&src_id),
            "<div id=\"live-table\"><div>ROUND 1</div><div>01.09. 18:00</div></div>",
        )
        .unwrap();
        let text = src.fetch_results_text("unused", &src_id).unwrap();
        assert_eq!(text.as_deref(), Some("ROUND 1\n01.09. 18:00"));
    }

    #[test]
    fn snapshot_without_table_or_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut src = SnapshotSource::new(dir.path());
        assert!(matches!(src.fetch_results_text("u", "missing"), Err(Error::FileNotFound(_))));

        std::fs::write(src.snapshot_path("empty"), "<html><body>Cookie wall</body></html>").unwrap();
        assert_eq!(src.fetch_results_text("u", "empty").unwrap(), None);
    }
}
