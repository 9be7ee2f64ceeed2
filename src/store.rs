// src/store.rs
//
// Persisted championship files: one CSV row per match.
//
//   sport,date,round,home_team,away_team,home_total_score,away_total_score,
//   home_score_by_period,away_score_by_period
//
// Rows are read as plain text columns and converted field by field, so a bad
// cell is reported with its line and column name instead of a generic serde
// message.

use std::{fs, io, path::Path};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::consts::{PERIOD_SEP, PERSISTED_DATE_FMT};
use crate::error::{Error, Result};
use crate::record::{MatchRecord, Stage};
use crate::sport::Sport;

/// One persisted row, all columns as text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRow {
    pub sport: String,
    pub date: String,
    pub round: String,
    pub home_team: String,
    pub away_team: String,
    pub home_total_score: String,
    pub away_total_score: String,
    #[serde(default)]
    pub home_score_by_period: String,
    #[serde(default)]
    pub away_score_by_period: String,
}

impl From<&MatchRecord> for MatchRow {
    fn from(m: &MatchRecord) -> Self {
        let (home_periods, away_periods) = m.period_columns();
        Self {
            sport: s!(m.sport().label()),
            date: m.date.format(PERSISTED_DATE_FMT).to_string(),
            round: m.stage.to_string(),
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            home_total_score: m.home_score.to_string(),
            away_total_score: m.away_score.to_string(),
            home_score_by_period: home_periods,
            away_score_by_period: away_periods,
        }
    }
}

impl MatchRow {
    /// Convert into a record; `line` is only used for error messages.
    pub fn into_record(self, line: u64) -> Result<MatchRecord> {
        let bad = |field: &'static str, value: &str| Error::InvalidField { line, field, value: value.to_string() };

        let sport: Sport = self.sport.parse().map_err(|_| bad("sport", &self.sport))?;
        let date = NaiveDateTime::parse_from_str(self.date.trim(), PERSISTED_DATE_FMT)
            .map_err(|_| bad("date", &self.date))?;
        let home_team = non_empty(&self.home_team).ok_or_else(|| bad("home_team", &self.home_team))?;
        let away_team = non_empty(&self.away_team).ok_or_else(|| bad("away_team", &self.away_team))?;
        let home_score = score(&self.home_total_score).ok_or_else(|| bad("home_total_score", &self.home_total_score))?;
        let away_score = score(&self.away_total_score).ok_or_else(|| bad("away_total_score", &self.away_total_score))?;
        let home_periods = periods(&self.home_score_by_period)
            .ok_or_else(|| bad("home_score_by_period", &self.home_score_by_period))?;
        let away_periods = periods(&self.away_score_by_period)
            .ok_or_else(|| bad("away_score_by_period", &self.away_score_by_period))?;
        if home_periods.len() != away_periods.len() {
            return Err(Error::MismatchedPeriods { line });
        }

        let mut m = MatchRecord::new(
            sport, home_team, away_team, home_score, away_score, date, Stage::parse(&self.round),
        );
        for (h, a) in home_periods.into_iter().zip(away_periods) {
            m.add_period_scores(h, a);
        }
        Ok(m)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let t = s.trim();
    (!t.is_empty()).then_some(t)
}

fn score(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

fn periods(s: &str) -> Option<Vec<u32>> {
    let t = s.trim();
    if t.is_empty() {
        return Some(Vec::new());
    }
    t.split(PERIOD_SEP).map(score).collect()
}

/* ---------------- Reading ---------------- */

/// Read every match from CSV text (header row required).
pub fn read_matches<R: io::Read>(reader: R) -> Result<Vec<MatchRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut out = Vec::new();
    while rdr.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let row: MatchRow = record.deserialize(Some(&headers))?;
        out.push(row.into_record(line)?);
    }
    Ok(out)
}

/// Read a persisted championship file.
pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>> {
    let file = fs::File::open(path)?;
    read_matches(io::BufReader::new(file))
}

/* ---------------- Writing ---------------- */

pub fn write_matches_to<W: io::Write>(writer: W, matches: &[MatchRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for m in matches {
        wtr.serialize(MatchRow::from(m))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create/overwrite `path` with a header row and one row per match.
/// Parent directories are created. An empty list is refused.
pub fn write_matches(path: &Path, matches: &[MatchRecord]) -> Result<()> {
    if matches.is_empty() {
        return Err(Error::NoMatches(path.to_path_buf()));
    }
    let file = crate::file::create_with_parents(path)?;
    write_matches_to(io::BufWriter::new(file), matches)
}
