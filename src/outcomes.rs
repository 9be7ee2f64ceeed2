// src/outcomes.rs
use log::debug;

use crate::championship::Championship;
use crate::config::options::AnalysisOptions;
use crate::error::Result;
use crate::record::{MatchRecord, Outcome};
use crate::standings::Standings;

/// How the top cohort fared against the bottom cohort.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub wins: u32,
    pub defeats: u32,
    pub draws: u32,
}

impl OutcomeCounts {
    pub fn total(&self) -> u32 { self.wins + self.defeats + self.draws }

    /// Wins over all classified matches; `None` when there are none.
    pub fn win_rate(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| f64::from(self.wins) / f64::from(total))
    }
}

impl std::fmt::Display for OutcomeCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wins={}, defeats={}, draws={}", self.wins, self.defeats, self.draws)
    }
}

impl std::ops::AddAssign for OutcomeCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.wins += rhs.wins;
        self.defeats += rhs.defeats;
        self.draws += rhs.draws;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    BestWin,
    BestDefeat,
    Draw,
}

/// Classify a best-vs-worst fixture from the best cohort's side.
/// `None` when the two teams are not one from each cohort.
pub fn classify(m: &MatchRecord, best: &[&str], worst: &[&str]) -> Option<Classification> {
    let home = m.home_team.as_str();
    let away = m.away_team.as_str();
    let home_is_best = if best.contains(&home) && worst.contains(&away) {
        true
    } else if best.contains(&away) && worst.contains(&home) {
        false
    } else {
        return None;
    };

    Some(match (m.winner(), home_is_best) {
        (Outcome::Draw, _) => Classification::Draw,
        (Outcome::Home, true) | (Outcome::Away, false) => Classification::BestWin,
        (Outcome::Home, false) | (Outcome::Away, true) => Classification::BestDefeat,
    })
}

/// Counts plus the matches behind them, in round order per bucket.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CohortOutcomes {
    pub counts: OutcomeCounts,
    pub victories: Vec<MatchRecord>,
    pub defeats: Vec<MatchRecord>,
    pub draws: Vec<MatchRecord>,
}

impl CohortOutcomes {
    pub fn record(&mut self, class: Classification, m: &MatchRecord) {
        match class {
            Classification::BestWin => {
                self.counts.wins += 1;
                self.victories.push(m.clone());
            }
            Classification::BestDefeat => {
                self.counts.defeats += 1;
                self.defeats.push(m.clone());
            }
            Classification::Draw => {
                self.counts.draws += 1;
                self.draws.push(m.clone());
            }
        }
    }

    /// Buckets with their report headings.
    pub fn buckets(&self) -> [(&'static str, &[MatchRecord]); 3] {
        [
            ("Best teams victories", self.victories.as_slice()),
            ("Best teams defeats", self.defeats.as_slice()),
            ("Draws", self.draws.as_slice()),
        ]
    }
}

/// Walk rounds `stabilization_round + 1 ..= last_round`, rebuild the table
/// after each, and sort that round's best-vs-worst fixtures into buckets.
pub fn best_vs_worst(championship: &Championship, opts: &AnalysisOptions) -> Result<CohortOutcomes> {
    let last_round = opts.last_round.unwrap_or_else(|| championship.last_round_number());
    let mut out = CohortOutcomes::default();

    for round in opts.stabilization_round.saturating_add(1)..=last_round {
        let table = Standings::as_of_round(championship, round)?;
        let best = table.first_k(opts.best_count);
        let worst = table.last_k(opts.worst_count);
        debug!("round {round}: best {best:?}, worst {worst:?}");

        for m in championship.matches_from_round(round) {
            if let Some(class) = classify(m, &best, &worst) {
                out.record(class, m);
            }
        }
    }
    Ok(out)
}

/// Counters carried across every file of a batch.
/// Owned by the caller, moved into each per-file call and handed back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchTotals {
    pub counts: OutcomeCounts,
    /// Every championship file looked at, problematic ones included.
    pub data_files: usize,
    pub problematic_files: usize,
}

impl BatchTotals {
    pub fn with_outcome(mut self, counts: OutcomeCounts) -> Self {
        self.counts += counts;
        self.data_files += 1;
        self
    }

    pub fn with_problem(mut self) -> Self {
        self.data_files += 1;
        self.problematic_files += 1;
        self
    }

    pub fn win_rate(&self) -> Option<f64> { self.counts.win_rate() }
}
