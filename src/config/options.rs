// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;
use crate::sport::Sport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Size of the top cohort.
    pub best_count: usize,
    /// Size of the bottom cohort.
    pub worst_count: usize,
    /// Rounds up to and including this one are skipped.
    pub stabilization_round: u32,
    /// Last round examined; `None` means the championship's last round.
    pub last_round: Option<u32>,
    /// How many teams may drop out mid-season before uneven rounds are reported.
    pub max_withdrawn_teams: usize,
    /// Enumerate the classified matches in the report.
    pub include_match_details: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            best_count: DEFAULT_BEST_COUNT,
            worst_count: DEFAULT_WORST_COUNT,
            stabilization_round: DEFAULT_STABILIZATION_ROUND,
            last_round: None,
            max_withdrawn_teams: DEFAULT_MAX_WITHDRAWN_TEAMS,
            include_match_details: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlOptions {
    pub sport: Sport,
    pub out_dir: PathBuf,
    /// Re-crawl leagues whose CSV already exists.
    pub overwrite: bool,
}

impl CrawlOptions {
    pub fn new(sport: Sport) -> Self {
        Self {
            sport,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            overwrite: false,
        }
    }

    /// `{out_dir}/{sport}/{season}/{league}.csv`, with `/` in the league replaced.
    pub fn league_out_path(&self, league: &str, season: &str) -> PathBuf {
        let stem = league.replace('/', "-");
        self.out_dir
            .join(self.sport.slug())
            .join(season)
            .join(join!(&stem, ".", DATA_EXT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn league_out_path_flattens_league_slashes() {
        let mut opts = CrawlOptions::new(Sport::Basketball);
        opts.out_dir = PathBuf::from("data");
        let p = opts.league_out_path("spain/acb", "2020-2021");
        assert_eq!(p, PathBuf::from("data/basketball/2020-2021/spain-acb.csv"));
    }

    #[test]
    fn analysis_defaults_come_from_consts() {
        let o = AnalysisOptions::default();
        assert_eq!(o.best_count, 3);
        assert_eq!(o.worst_count, 3);
        assert_eq!(o.stabilization_round, 7);
        assert_eq!(o.max_withdrawn_teams, 2);
        assert!(o.last_round.is_none());
    }
}
