// src/runner.rs
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::{
    championship::Championship,
    config::consts::ISSUES_FILE,
    config::options::{AnalysisOptions, CrawlOptions},
    dates::{enhance_season_dates, season_start_year},
    error::Result,
    file::{create_with_parents, file_name_lossy, sorted_files, sorted_subdirs},
    outcomes::{self, BatchTotals, CohortOutcomes},
    progress::Progress,
    record::MatchRecord,
    report,
    source::{league_id, league_url, PageSource},
    specs::results_table::{parse_tokens, tokenize},
    sport::Sport,
    store,
};

/* ---------------- Crawl ---------------- */

/// A league season that produced no data. The batch carries on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlFailure {
    pub league_id: String,
    pub url: String,
    pub reason: String,
}

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct CrawlSummary {
    pub written: Vec<PathBuf>,
    /// Existing files left alone (no `overwrite`).
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<CrawlFailure>,
}

/// Crawl every league for every season (seasons outer) and write one CSV
/// per league season. Page problems become [`CrawlFailure`]s; an unusable
/// season name or a write error stops the batch.
pub fn crawl(
    leagues: &[String],
    seasons: &[String],
    source: &mut dyn PageSource,
    opts: &CrawlOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<CrawlSummary> {
    let start_years = seasons
        .iter()
        .map(|s| season_start_year(s))
        .collect::<Result<Vec<i32>>>()?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(leagues.len() * seasons.len());
    }

    let mut summary = CrawlSummary::default();
    for (season, start_year) in seasons.iter().zip(start_years) {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Season {season}"));
        }
        for league in leagues {
            let out = opts.league_out_path(league, season);
            let id = league_id(opts.sport, league, season);

            if out.exists() && !opts.overwrite {
                info!("{id}: {} exists, skipping", out.display());
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&format!("{id} (exists)"));
                }
                summary.skipped.push(out);
                continue;
            }

            let url = league_url(opts.sport, league, season);
            match crawl_season(source, opts.sport, &url, &id, start_year) {
                Ok(matches) => {
                    store::write_matches(&out, &matches)?;
                    info!("{id}: {} matches -> {}", matches.len(), out.display());
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&id);
                    }
                    summary.written.push(out);
                }
                Err(reason) => {
                    error!("{id}: {reason} ({url})");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(&id, &reason);
                    }
                    summary.failures.push(CrawlFailure { league_id: id, url, reason });
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(summary)
}

/// Fetch, parse and date one league season. `Err` carries the failure reason.
fn crawl_season(
    source: &mut dyn PageSource,
    sport: Sport,
    url: &str,
    id: &str,
    start_year: i32,
) -> std::result::Result<Vec<MatchRecord>, String> {
    let text = match source.fetch_results_text(url, id) {
        Ok(Some(text)) => text,
        Ok(None) => return Err(s!("results table not found")),
        Err(e) => return Err(e.to_string()),
    };

    let mut matches = parse_tokens(&tokenize(&text), sport);
    if matches.is_empty() {
        return Err(s!("no matches in results table"));
    }
    enhance_season_dates(&mut matches, start_year).map_err(|e| e.to_string())?;
    Ok(matches)
}

/* ---------------- Parse (offline) ---------------- */

/// Parse a token dump (one token per line). With a season name the
/// dates get real years; without, they keep the placeholder year.
pub fn parse_token_file(path: &Path, sport: Sport, season: Option<&str>) -> Result<Vec<MatchRecord>> {
    let text = fs::read_to_string(path)?;
    let mut matches = parse_tokens(&tokenize(&text), sport);
    if let Some(season) = season {
        enhance_season_dates(&mut matches, season_start_year(season)?)?;
    }
    Ok(matches)
}

/* ---------------- Analyse ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub enum FileReport {
    Analysed { name: String, outcomes: CohortOutcomes },
    /// Failed validation; kept out of the statistics.
    Rejected { name: String, finding: String },
}

/// Load, validate and aggregate one championship file.
/// `totals` is handed back with this file folded in.
pub fn analyse_championship(
    path: &Path,
    opts: &AnalysisOptions,
    totals: BatchTotals,
) -> Result<(BatchTotals, FileReport)> {
    let championship = Championship::load(path)?;
    let name = championship.name();

    if let Some(finding) = championship.validate(opts.max_withdrawn_teams) {
        warn!("Skipping {}: {finding}", championship.source().display());
        return Ok((totals.with_problem(), FileReport::Rejected { name, finding }));
    }

    let outcomes = outcomes::best_vs_worst(&championship, opts)?;
    info!("{name}: {}", outcomes.counts);
    Ok((totals.with_outcome(outcomes.counts), FileReport::Analysed { name, outcomes }))
}

#[derive(Debug)]
pub struct AnalyseSummary {
    pub totals: BatchTotals,
    pub report_path: PathBuf,
    pub issues_path: PathBuf,
    pub issues: Vec<String>,
}

/// Analyse `{sport_dir}/{season}/*.csv` into a report at `outfile`.
/// Validation findings go to `crawled_data_issues.txt` next to it.
pub fn analyse_dir(
    sport_dir: &Path,
    outfile: &Path,
    opts: &AnalysisOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<AnalyseSummary> {
    let issues_path = outfile
        .parent()
        .map_or_else(|| PathBuf::from(ISSUES_FILE), |d| d.join(ISSUES_FILE));

    let seasons = sorted_subdirs(sport_dir)?;
    let per_season = seasons
        .iter()
        .map(|d| sorted_files(d))
        .collect::<std::io::Result<Vec<_>>>()?;
    if let Some(p) = progress.as_deref_mut() {
        p.begin(per_season.iter().map(Vec::len).sum());
    }

    // Output files are only created once every file has loaded.
    let mut out: Vec<u8> = Vec::new();
    let mut issues_out: Vec<u8> = Vec::new();
    let mut totals = BatchTotals::default();
    let mut issues = Vec::new();

    for (season_dir, files) in seasons.iter().zip(per_season) {
        let season = file_name_lossy(season_dir);
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Season {season}: {} file(s)", files.len()));
        }
        report::season_header(&mut out, &season)?;

        for path in files {
            let (next, file_report) = analyse_championship(&path, opts, totals)?;
            totals = next;
            match file_report {
                FileReport::Analysed { name, outcomes } => {
                    report::championship_block(&mut out, &name, &outcomes, opts.include_match_details)?;
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&name);
                    }
                }
                FileReport::Rejected { name, finding } => {
                    writeln!(issues_out, "{}", report::issue_line(&finding))?;
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(&name, &finding);
                    }
                    issues.push(finding);
                }
            }
        }
        report::season_footer(&mut out)?;
    }

    report::totals_block(&mut out, &totals, &issues_path)?;
    create_with_parents(outfile)?.write_all(&out)?;
    create_with_parents(&issues_path)?.write_all(&issues_out)?;

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(AnalyseSummary { totals, report_path: outfile.to_path_buf(), issues_path, issues })
}
