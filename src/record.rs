// src/record.rs
use std::fmt;

use chrono::{Datelike, NaiveDateTime};

use crate::config::consts::{PERIOD_SEP, ROUND_PREFIX};
use crate::error::{Error, Result};
use crate::sport::Sport;

/// Competition stage a match belongs to.
///
/// `ROUND {n}` labels become [`Stage::Round`]; everything else (play-offs,
/// relegation groups, …) is kept verbatim as [`Stage::Other`] and never takes
/// part in round-indexed computations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Round(u32),
    Other(String),
}

impl Stage {
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if let Some(rest) = label.strip_prefix(ROUND_PREFIX) {
            if let Ok(n) = rest.trim().parse::<u32>() {
                if n > 0 {
                    return Stage::Round(n);
                }
            }
        }
        Stage::Other(label.to_string())
    }

    pub fn round_number(&self) -> Option<u32> {
        match self {
            Stage::Round(n) => Some(*n),
            Stage::Other(_) => None,
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Other(s!())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Round(n) => write!(f, "{ROUND_PREFIX}{n}"),
            Stage::Other(label) => f.write_str(label),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Home,
    Away,
    Draw,
}

/// One played fixture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    sport: Sport,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    /// Year is a placeholder until [`MatchRecord::enhance_match_date`] runs (crawl path).
    pub date: NaiveDateTime,
    pub stage: Stage,
    /// (home, away) per period, in playing order.
    pub period_scores: Vec<(u32, u32)>,
}

impl MatchRecord {
    pub fn new(
        sport: Sport,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_score: u32,
        away_score: u32,
        date: NaiveDateTime,
        stage: Stage,
    ) -> Self {
        Self {
            sport,
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_score,
            away_score,
            date,
            stage,
            period_scores: Vec::new(),
        }
    }

    pub fn sport(&self) -> Sport { self.sport }

    pub fn round_number(&self) -> Option<u32> { self.stage.round_number() }

    pub fn add_period_scores(&mut self, home: u32, away: u32) {
        self.period_scores.push((home, away));
    }

    pub fn winner(&self) -> Outcome {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Outcome::Home,
            std::cmp::Ordering::Less => Outcome::Away,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn winner_team(&self) -> Option<&str> {
        match self.winner() {
            Outcome::Home => Some(self.home_team.as_str()),
            Outcome::Away => Some(self.away_team.as_str()),
            Outcome::Draw => None,
        }
    }

    /// Give the year-less parsed date its real year.
    /// Months from the season's start month onwards belong to the start year,
    /// earlier months to the following calendar year.
    pub fn enhance_match_date(&mut self, season_start_year: i32, season_start_month: u32) -> Result<()> {
        let year = if self.date.month() >= season_start_month {
            season_start_year
        } else {
            season_start_year + 1
        };
        self.date = self
            .date
            .with_year(year)
            .ok_or_else(|| Error::InvalidDate(format!("{} in {}", self.date.format("%d.%m. %H:%M"), year)))?;
        Ok(())
    }

    /// (home points, away points) under the sport's league table.
    pub fn compute_points(&self) -> Result<(u32, u32)> {
        let rule = self
            .sport
            .point_rule()
            .ok_or(Error::UnsupportedSport(self.sport))?;

        let (win, lose) = match (rule.full_distance, self.sport.full_distance_total()) {
            (Some(split), Some(total))
                if u64::from(self.home_score) + u64::from(self.away_score) == u64::from(total) =>
            {
                split
            }
            _ => (rule.win, 0),
        };

        Ok(match self.winner() {
            Outcome::Home => (win, lose),
            Outcome::Away => (lose, win),
            Outcome::Draw => (rule.draw, rule.draw),
        })
    }

    /// `-`-joined home and away period columns.
    pub fn period_columns(&self) -> (String, String) {
        let join = |pick: fn(&(u32, u32)) -> u32| {
            self.period_scores
                .iter()
                .map(|p| pick(p).to_string())
                .collect::<Vec<_>>()
                .join(PERIOD_SEP)
        };
        (join(|p| p.0), join(|p| p.1))
    }
}

impl fmt::Display for MatchRecord {
    /// Report form: stage, teams and scores. Date and sport are left out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} - {} {}:{}",
            self.stage, self.home_team, self.away_team, self.home_score, self.away_score
        )?;
        if !self.period_scores.is_empty() {
            let periods = self
                .period_scores
                .iter()
                .map(|(h, a)| format!("{h}:{a}"))
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, " ({periods})")?;
        }
        Ok(())
    }
}
