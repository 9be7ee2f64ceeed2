// src/championship.rs
use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::{Error, Result};
use crate::record::MatchRecord;
use crate::store;

/// One league season, as loaded from a single persisted file.
#[derive(Clone, Debug)]
pub struct Championship {
    source: PathBuf,
    matches: Vec<MatchRecord>,
}

impl Championship {
    pub fn new(source: impl Into<PathBuf>, matches: Vec<MatchRecord>) -> Self {
        Self { source: source.into(), matches }
    }

    /// Load a championship CSV. A missing file or a non-CSV path is the
    /// caller's mistake and is returned as an error straight away.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        if !crate::file::has_data_ext(path) {
            return Err(Error::UnsupportedExtension(path.to_path_buf()));
        }
        let matches = store::load_matches(path)?;
        debug!("Loaded {} matches from {}", matches.len(), path.display());
        Ok(Self::new(path, matches))
    }

    pub fn source(&self) -> &Path { &self.source }

    /// File name of the source, for reports.
    pub fn name(&self) -> String { crate::file::file_name_lossy(&self.source) }

    pub fn matches(&self) -> &[MatchRecord] { &self.matches }

    pub fn matches_from_round(&self, round: u32) -> impl Iterator<Item = &MatchRecord> {
        self.matches.iter().filter(move |m| m.round_number() == Some(round))
    }

    /// Highest `ROUND n` seen; 0 when the season has no numbered rounds.
    pub fn last_round_number(&self) -> u32 {
        self.matches.iter().filter_map(MatchRecord::round_number).max().unwrap_or(0)
    }

    /// Distinct team identifiers, sorted.
    pub fn teams(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .matches
            .iter()
            .flat_map(|m| [m.home_team.as_str(), m.away_team.as_str()])
            .collect();
        set.into_iter().collect()
    }

    /// Structural check before statistics are computed.
    ///
    /// `None` when the season looks complete, otherwise a human-readable
    /// finding. Checks stop at the first failure:
    /// 1. no matches at all;
    /// 2. no `ROUND n` labels;
    /// 3. gaps in the round numbering;
    /// 4. (even team count) rounds whose size differs from `teams / 2`.
    ///    Every short round being short by the same amount, no more than
    ///    `max_withdrawn_teams / 2` matches, is read as teams having
    ///    withdrawn mid-season and is let through.
    pub fn validate(&self, max_withdrawn_teams: usize) -> Option<String> {
        let name = self.name();

        if self.matches.is_empty() {
            return Some(format!("{name}: no match found"));
        }

        let last = self.last_round_number();
        if last == 0 {
            return Some(format!("{name}: not organized by rounds"));
        }

        let mut per_round: BTreeMap<u32, usize> = BTreeMap::new();
        for r in self.matches.iter().filter_map(MatchRecord::round_number) {
            *per_round.entry(r).or_default() += 1;
        }

        let missing: Vec<String> = (1..=last)
            .filter(|r| !per_round.contains_key(r))
            .map(|r| r.to_string())
            .collect();
        if !missing.is_empty() {
            return Some(format!("{name}: missing rounds {}", missing.join(", ")));
        }

        let teams = self.teams().len();
        if teams % 2 != 0 {
            return None;
        }
        let expected = teams / 2;

        let deviating: BTreeMap<u32, usize> = per_round
            .into_iter()
            .filter(|&(_, n)| n != expected)
            .collect();
        if deviating.is_empty() {
            return None;
        }

        let shortfalls: BTreeSet<usize> = deviating
            .values()
            .map(|&n| expected.saturating_sub(n))
            .collect();
        let uniform_shortfall = match (shortfalls.len(), shortfalls.first()) {
            (1, Some(&s)) if deviating.values().all(|&n| n < expected) => Some(s),
            _ => None,
        };
        if let Some(s) = uniform_shortfall {
            if s >= 1 && s <= max_withdrawn_teams / 2 {
                debug!("{name}: {} rounds short by {s}; treating as withdrawn teams", deviating.len());
                return None;
            }
        }

        let detail = deviating
            .iter()
            .map(|(r, n)| format!("{r}: {n}"))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!(
            "{name}: uneven rounds for {teams} teams (expected {expected} matches per round): {{{detail}}}"
        ))
    }
}
