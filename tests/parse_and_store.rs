// tests/parse_and_store.rs
use std::fs;
use std::path::PathBuf;

use chrono::Datelike;
use fixture_stats::specs::results_table::{parse_tokens, ParseState, ResultsTableParser, Step};
use fixture_stats::{dates, store, Championship, Sport, Stage};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("fixture_stats_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

#[test]
fn quarters_are_read_in_order() {
    let tokens = [
        "ROUND 1", "12.03. 18:00", "Home", "Away", "88", "75",
        "20", "18", "22", "19", "24", "20", "22", "18",
    ];
    let ms = parse_tokens(&tokens, Sport::Basketball);
    assert_eq!(ms.len(), 1);
    assert_eq!(ms[0].stage.to_string(), "ROUND 1");
    assert_eq!((ms[0].home_score, ms[0].away_score), (88, 75));
    assert_eq!(ms[0].period_scores, vec![(20, 18), (22, 19), (24, 20), (22, 18)]);
}

#[test]
fn leap_day_and_overtime_marker() {
    let tokens = ["ROUND 9", "29.02. 20:00", "AOT", "Home", "Away", "101", "99"];
    let ms = parse_tokens(&tokens, Sport::Basketball);
    assert_eq!(ms.len(), 1);
    assert_eq!(ms[0].home_team, "Home");
    assert_eq!((ms[0].date.day(), ms[0].date.month()), (28, 2));
}

#[test]
fn step_function_exposes_the_state_machine() {
    let tokens = ["PLAY OFFS", "01.05. 19:00", "A", "B", "x", "1", "02.05. 19:00", "B", "A", "3", "1"];
    let mut p = ResultsTableParser::new(Sport::Hockey, &tokens);

    assert_eq!(p.step(), Some(Step::Stage(Stage::Other("PLAY OFFS".into()))));
    assert!(matches!(p.step(), Some(Step::Header(_))));
    assert!(matches!(p.state(), ParseState::ReadingBody(_)));
    assert!(matches!(p.step(), Some(Step::Discarded { at: 2, .. })));
    assert_eq!(p.state(), ParseState::SeekingHeader);
    assert!(matches!(p.step(), Some(Step::Header(_))));
    match p.step() {
        Some(Step::Match(m)) => {
            assert_eq!(m.winner_team(), Some("B"));
            assert_eq!(m.stage, Stage::Other("PLAY OFFS".into()));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(p.step(), None);
}

#[test]
fn crawled_season_survives_persistence() {
    let tokens = [
        "ROUND 2", "03.01. 18:00", "A", "B", "3", "2", "25", "20", "20", "25", "25", "22", "22", "25", "15", "10",
        "ROUND 1", "20.09. 18:00", "B", "A", "3", "0", "25", "10", "25", "11", "25", "12",
    ];
    let mut ms = parse_tokens(&tokens, Sport::Volleyball);
    dates::enhance_season_dates(&mut ms, dates::season_start_year("2020-2021").unwrap()).unwrap();
    assert_eq!(ms[0].date.year(), 2021);
    assert_eq!(ms[1].date.year(), 2020);

    // Five-set win: 2 points to the winner, 1 to the loser.
    assert_eq!(ms[0].compute_points().unwrap(), (2, 1));
    assert_eq!(ms[1].compute_points().unwrap(), (3, 0));

    let dir = tmp_dir("persist");
    let path = dir.join("volleyball/2020-2021/italy-superlega.csv");
    store::write_matches(&path, &ms).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("sport,date,round,home_team,away_team,home_total_score,away_total_score,"));
    assert!(text.contains("Volleyball,2021-01-03 18:00:00,ROUND 2,A,B,3,2,25-20-25-22-15,20-25-22-25-10"));

    let c = Championship::load(&path).unwrap();
    assert_eq!(c.matches(), ms.as_slice());
    assert_eq!(c.last_round_number(), 2);
    assert_eq!(c.validate(2), None);
}
