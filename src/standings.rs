// src/standings.rs
use std::{cmp::Ordering, collections::HashMap};

use chrono::{NaiveDateTime, TimeDelta};
use log::debug;

use crate::championship::Championship;
use crate::config::consts::ROUND_SPAN_DAYS;
use crate::error::Result;
use crate::record::MatchRecord;

/// When did a round effectively end?
///
/// Dates are sorted newest first and the element at `len / 2` is taken as
/// the pivot. The newest date less than [`ROUND_SPAN_DAYS`] away from the
/// pivot is the answer, so a handful of postponed fixtures played weeks
/// later do not drag the cutoff with them. `None` for an empty round.
pub fn round_end(dates: &[NaiveDateTime]) -> Option<NaiveDateTime> {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let pivot = *sorted.get(sorted.len() / 2)?;
    let span = TimeDelta::days(ROUND_SPAN_DAYS);

    Some(
        sorted
            .into_iter()
            .find(|d| (*d - pivot).abs() < span)
            .unwrap_or(pivot),
    )
}

/// Cutoff for "standings after round `round`".
pub fn round_cutoff(championship: &Championship, round: u32) -> Option<NaiveDateTime> {
    let dates: Vec<NaiveDateTime> = championship.matches_from_round(round).map(|m| m.date).collect();
    round_end(&dates)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamStanding {
    pub team: String,
    pub points: u32,
    pub games: u32,
}

impl TeamStanding {
    pub fn points_per_game(&self) -> f64 {
        if self.games == 0 { 0.0 } else { f64::from(self.points) / f64::from(self.games) }
    }

    /// Exact points-per-game comparison (cross-multiplied, no floats).
    fn cmp_ppg(&self, other: &Self) -> Ordering {
        let lhs = u64::from(self.points) * u64::from(other.games);
        let rhs = u64::from(other.points) * u64::from(self.games);
        lhs.cmp(&rhs)
    }
}

/// League table ordered by points per game, best first.
/// Equal ratios are ordered by team name so the table never depends on
/// the order matches were read in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Standings {
    cutoff: Option<NaiveDateTime>,
    rows: Vec<TeamStanding>,
}

impl Standings {
    pub fn from_rows(cutoff: Option<NaiveDateTime>, mut rows: Vec<TeamStanding>) -> Self {
        rows.retain(|r| r.games > 0);
        rows.sort_by(|a, b| b.cmp_ppg(a).then_with(|| a.team.cmp(&b.team)));
        Self { cutoff, rows }
    }

    /// Fold every match played on or before `cutoff`, whatever its stage.
    /// No cutoff means no round to measure from, hence an empty table.
    pub fn compute(matches: &[MatchRecord], cutoff: Option<NaiveDateTime>) -> Result<Self> {
        let Some(limit) = cutoff else {
            return Ok(Self::default());
        };

        let mut acc: HashMap<&str, (u32, u32)> = HashMap::new();
        for m in matches.iter().filter(|m| m.date <= limit) {
            let (home_pts, away_pts) = m.compute_points()?;
            let home = acc.entry(m.home_team.as_str()).or_default();
            home.0 += home_pts;
            home.1 += 1;
            let away = acc.entry(m.away_team.as_str()).or_default();
            away.0 += away_pts;
            away.1 += 1;
        }

        let rows = acc
            .into_iter()
            .map(|(team, (points, games))| TeamStanding { team: s!(team), points, games })
            .collect();
        Ok(Self::from_rows(cutoff, rows))
    }

    /// Standings once round `round` is over (its cutoff included).
    pub fn as_of_round(championship: &Championship, round: u32) -> Result<Self> {
        let cutoff = round_cutoff(championship, round);
        let table = Self::compute(championship.matches(), cutoff)?;
        debug!(
            "{}: standings after round {round} (cutoff {:?}): {} teams",
            championship.name(), table.cutoff(), table.len()
        );
        Ok(table)
    }

    pub fn cutoff(&self) -> Option<NaiveDateTime> { self.cutoff }
    pub fn rows(&self) -> &[TeamStanding] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn get(&self, team: &str) -> Option<&TeamStanding> {
        self.rows.iter().find(|r| r.team == team)
    }

    /// Top `k` teams, best first. `k` larger than the table returns everyone.
    pub fn first_k(&self, k: usize) -> Vec<&str> {
        self.rows.iter().take(k).map(|r| r.team.as_str()).collect()
    }

    /// Bottom `k` teams, worst first (the table read backwards).
    pub fn last_k(&self, k: usize) -> Vec<&str> {
        self.rows.iter().rev().take(k).map(|r| r.team.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Stage;
    use crate::sport::Sport;
    use chrono::NaiveDate;

    fn mar(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 3, d).unwrap().and_hms_opt(18, 0, 0).unwrap()
    }

    fn row(team: &str, points: u32, games: u32) -> TeamStanding {
        TeamStanding { team: s!(team), points, games }
    }

    #[test]
    fn postponed_fixture_does_not_move_the_cutoff() {
        assert_eq!(round_end(&[mar(1), mar(2), mar(3), mar(10)]), Some(mar(3)));
    }

    #[test]
    fn tight_round_ends_on_its_last_day() {
        assert_eq!(round_end(&[mar(5), mar(6), mar(7)]), Some(mar(7)));
        assert_eq!(round_end(&[mar(9)]), Some(mar(9)));
    }

    #[test]
    fn empty_round_has_no_boundary() {
        assert_eq!(round_end(&[]), None);
        assert!(Standings::compute(&[], None).unwrap().is_empty());
    }

    #[test]
    fn ranked_by_points_per_game() {
        let t = Standings::from_rows(None, vec![row("C", 3, 3), row("A", 9, 3), row("B", 6, 3)]);
        assert_eq!(t.first_k(3), vec!["A", "B", "C"]);
        let ppg: Vec<f64> = t.rows().iter().map(TeamStanding::points_per_game).collect();
        assert_eq!(ppg, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn ratio_beats_raw_points_and_ties_go_by_name() {
        // B has fewer points but a game in hand and a better ratio.
        let t = Standings::from_rows(
            None,
            vec![row("A", 10, 5), row("B", 9, 4), row("D", 4, 2), row("C", 4, 2), row("E", 0, 0)],
        );
        assert_eq!(t.first_k(10), vec!["B", "A", "C", "D"]);
        assert_eq!(t.last_k(2), vec!["D", "C"]);
    }

    #[test]
    fn only_matches_up_to_cutoff_count() {
        let g = |home: &str, away: &str, hs, aws, d| {
            MatchRecord::new(Sport::Football, home, away, hs, aws, mar(d), Stage::Round(1))
        };
        let ms = vec![
            g("A", "B", 2, 0, 1),
            g("C", "D", 1, 1, 2),
            g("A", "C", 0, 1, 20), // after the cutoff
        ];
        let t = Standings::compute(&ms, Some(mar(2))).unwrap();
        assert_eq!(t.get("A"), Some(&row("A", 3, 1)));
        assert_eq!(t.get("C"), Some(&row("C", 1, 1)));
        assert_eq!(t.get("B"), Some(&row("B", 0, 1)));
        assert_eq!(t.first_k(1), vec!["A"]);
        assert_eq!(t.last_k(1), vec!["B"]);
    }

    #[test]
    fn tennis_standings_fail_loudly() {
        let ms = vec![MatchRecord::new(Sport::Tennis, "P1", "P2", 2, 1, mar(1), Stage::Round(1))];
        assert!(Standings::compute(&ms, Some(mar(1))).is_err());
    }
}
