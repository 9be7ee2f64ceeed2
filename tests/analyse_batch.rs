// tests/analyse_batch.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use fixture_stats::config::options::AnalysisOptions;
use fixture_stats::outcomes::{BatchTotals, OutcomeCounts};
use fixture_stats::progress::RecordingProgress;
use fixture_stats::runner::{analyse_championship, analyse_dir, FileReport};
use fixture_stats::{store, Error, MatchRecord, Sport, Stage};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("fixture_stats_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn day(round: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 10, 1).unwrap().and_hms_opt(18, 0, 0).unwrap()
        + chrono::Duration::days(i64::from(round) * 7)
}

/// Four teams. A beats everyone, B beats C and D, C and D never win.
/// Odd rounds: A-D, B-C. Even rounds: A-C, B-D.
fn season(rounds: impl IntoIterator<Item = u32>) -> Vec<MatchRecord> {
    let g = |r: u32, home: &str, away: &str| {
        MatchRecord::new(Sport::Football, home, away, 2, 0, day(r), Stage::Round(r))
    };
    rounds
        .into_iter()
        .flat_map(|r| {
            if r % 2 == 1 { [g(r, "A", "D"), g(r, "B", "C")] } else { [g(r, "A", "C"), g(r, "B", "D")] }
        })
        .collect()
}

fn opts() -> AnalysisOptions {
    AnalysisOptions {
        best_count: 1,
        worst_count: 1,
        stabilization_round: 2,
        ..AnalysisOptions::default()
    }
}

fn write_season(dir: &Path, file: &str, ms: &[MatchRecord]) -> PathBuf {
    let p = dir.join(file);
    store::write_matches(&p, ms).unwrap();
    p
}

#[test]
fn season_with_a_missing_round_is_skipped_and_batch_continues() {
    let root = tmp_dir("analyse_batch");
    let sport_dir = root.join("football");
    let season_dir = sport_dir.join("2020-2021");
    write_season(&season_dir, "bad.csv", &season([1, 2, 3, 4, 6]));
    write_season(&season_dir, "good.csv", &season(1..=6));

    let outfile = root.join("reports/football.txt");
    let summary = analyse_dir(&sport_dir, &outfile, &opts(), None).unwrap();

    // A beats D in rounds 3 and 5.
    assert_eq!(summary.totals.counts, OutcomeCounts { wins: 2, defeats: 0, draws: 0 });
    assert_eq!(summary.totals.data_files, 2);
    assert_eq!(summary.totals.problematic_files, 1);
    assert_eq!(summary.issues, vec!["bad.csv: missing rounds 5".to_string()]);

    let issues = fs::read_to_string(&summary.issues_path).unwrap();
    assert_eq!(issues, "!!! [Data Validation Error] bad.csv: missing rounds 5 !!!\n");
    assert_eq!(summary.issues_path, root.join("reports/crawled_data_issues.txt"));

    let report = fs::read_to_string(&outfile).unwrap();
    assert!(report.starts_with("Stats season 2020-2021\n"));
    assert!(report.contains("Championship good.csv - best teams results: wins=2, defeats=0, draws=0."));
    assert!(report.contains("\t\tROUND 3: A - D 2:0\n"));
    assert!(!report.contains("Championship bad.csv"));
    assert!(report.contains(" - Win rate: 100.00%"));
    assert!(report.contains("Identified 1 problematic files out of 2 data files."));
}

#[test]
fn totals_are_passed_through_each_file() {
    let dir = tmp_dir("analyse_single");
    let good = write_season(&dir, "good.csv", &season(1..=6));

    let (totals, report) = analyse_championship(&good, &opts(), BatchTotals::default()).unwrap();
    let (totals, _) = analyse_championship(&good, &opts(), totals).unwrap();
    assert_eq!(totals.counts.wins, 4);
    assert_eq!(totals.data_files, 2);
    match report {
        FileReport::Analysed { name, outcomes } => {
            assert_eq!(name, "good.csv");
            assert_eq!(outcomes.victories.len(), 2);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn missing_file_is_fatal() {
    let dir = tmp_dir("analyse_missing");
    let r = analyse_championship(&dir.join("nope.csv"), &opts(), BatchTotals::default());
    assert!(matches!(r, Err(Error::FileNotFound(_))));
}

#[test]
fn no_classified_matches_reports_na() {
    let root = tmp_dir("analyse_empty");
    let sport_dir = root.join("football");
    write_season(&sport_dir.join("2021-2022"), "short.csv", &season(1..=2));

    let summary = analyse_dir(&sport_dir, &root.join("r.txt"), &opts(), None).unwrap();
    assert_eq!(summary.totals.win_rate(), None);
    let report = fs::read_to_string(root.join("r.txt")).unwrap();
    assert!(report.contains(" - Win rate: n/a"));
}

#[test]
fn fatal_load_error_keeps_previous_report() {
    let root = tmp_dir("analyse_fatal");
    let sport_dir = root.join("football");
    let season_dir = sport_dir.join("2020-2021");
    write_season(&season_dir, "good.csv", &season(1..=6));
    fs::write(season_dir.join("notes.txt"), "not a season").unwrap();

    let outfile = root.join("report.txt");
    let issues = root.join("crawled_data_issues.txt");
    fs::write(&outfile, "last run").unwrap();
    fs::write(&issues, "last issues").unwrap();

    let r = analyse_dir(&sport_dir, &outfile, &opts(), None);
    assert!(matches!(r, Err(Error::UnsupportedExtension(_))));
    assert_eq!(fs::read_to_string(&outfile).unwrap(), "last run");
    assert_eq!(fs::read_to_string(&issues).unwrap(), "last issues");
}

#[test]
fn progress_hears_about_each_season() {
    let root = tmp_dir("analyse_progress");
    let sport_dir = root.join("football");
    write_season(&sport_dir.join("2020-2021"), "a.csv", &season(1..=6));
    write_season(&sport_dir.join("2021-2022"), "b.csv", &season([1, 2, 4]));

    let mut progress = RecordingProgress::default();
    analyse_dir(&sport_dir, &root.join("r.txt"), &opts(), Some(&mut progress)).unwrap();
    assert_eq!(progress.total, Some(2));
    assert_eq!(progress.logs, vec!["Season 2020-2021: 1 file(s)", "Season 2021-2022: 1 file(s)"]);
    assert_eq!(progress.done, vec!["a.csv"]);
    assert_eq!(progress.failed.len(), 1);
    assert!(progress.finished);
}
