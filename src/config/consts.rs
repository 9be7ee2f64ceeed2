// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://www.flashscore.com";
pub const USER_AGENT: &str = "fixture_stats/0.4";
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Results table
pub const RESULTS_TABLE_ID: &str = "live-table";
pub const ANNOTATION_MARKERS: [&str; 2] = ["AOT", "Awrd"]; // after overtime / awarded
pub const ROUND_PREFIX: &str = "ROUND ";

/// Year given to parsed `DD.MM. HH:MM` dates until the season is known.
/// Not a leap year, hence the 29.02. → 28.02. rewrite in the parser.
pub const UNRESOLVED_YEAR: i32 = 1900;

// Persistence
pub const PERSISTED_DATE_FMT: &str = "%Y-%m-%d %H:%M:%S";
pub const PERIOD_SEP: &str = "-";
pub const DATA_EXT: &str = "csv";

// Standings
pub const ROUND_SPAN_DAYS: i64 = 4;

// Analysis defaults
pub const DEFAULT_BEST_COUNT: usize = 3;
pub const DEFAULT_WORST_COUNT: usize = 3;
pub const DEFAULT_STABILIZATION_ROUND: u32 = 7;
pub const DEFAULT_MAX_WITHDRAWN_TEAMS: usize = 2;

// Output
pub const DEFAULT_OUT_DIR: &str = "out";
pub const ISSUES_FILE: &str = "crawled_data_issues.txt";
pub const LOG_FILE: &str = ".store/debug.log";
