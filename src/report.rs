// src/report.rs
//
// Text report for the analyse path.
//
//   Stats season 2020-2021
//
//   Championship spain-acb.csv - best teams results: wins=12, defeats=3, draws=0.
//   Matches insights:
//   	Best teams victories:
//   		ROUND 8: Real Madrid - Fuenlabrada 95:70 (25:18, ...)
//   ...
//   Best teams overall statistics:
//    - Total wins: 40
//   ...

use std::io::{self, Write};
use std::path::Path;

use crate::outcomes::{BatchTotals, CohortOutcomes};

pub fn season_header<W: Write>(w: &mut W, season: &str) -> io::Result<()> {
    writeln!(w, "Stats season {season}")
}

pub fn season_footer<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "\n\n")
}

/// One championship block. Empty buckets are left out of the insights.
pub fn championship_block<W: Write>(
    w: &mut W,
    file_name: &str,
    outcomes: &CohortOutcomes,
    include_match_details: bool,
) -> io::Result<()> {
    writeln!(w, "\nChampionship {file_name} - best teams results: {}.", outcomes.counts)?;
    if !include_match_details {
        return Ok(());
    }
    writeln!(w, "Matches insights:")?;
    for (heading, matches) in outcomes.buckets() {
        if matches.is_empty() {
            continue;
        }
        writeln!(w, "\t{heading}:")?;
        for m in matches {
            writeln!(w, "\t\t{m}")?;
        }
    }
    Ok(())
}

/// `63.64%`, or `n/a` when nothing was classified.
pub fn format_win_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| s!("n/a"), |r| format!("{:.2}%", r * 100.0))
}

pub fn totals_block<W: Write>(w: &mut W, totals: &BatchTotals, issues_path: &Path) -> io::Result<()> {
    writeln!(w, "Best teams overall statistics:")?;
    writeln!(w, " - Total wins: {}", totals.counts.wins)?;
    writeln!(w, " - Total defeats: {}", totals.counts.defeats)?;
    writeln!(w, " - Total draws: {}", totals.counts.draws)?;
    writeln!(w, " - Win rate: {}", format_win_rate(totals.win_rate()))?;
    writeln!(w)?;
    writeln!(
        w,
        "NOTE: Identified {} problematic files out of {} data files.",
        totals.problematic_files, totals.data_files
    )?;
    writeln!(w, "The discovered issues have been written to the {} file.", issues_path.display())
}

pub fn issue_line(finding: &str) -> String {
    format!("!!! [Data Validation Error] {finding} !!!")
}
