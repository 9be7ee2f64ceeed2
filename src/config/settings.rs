// src/config/settings.rs
//
// Plain `key=value` settings file for the analysis step.
// Layering: defaults < settings file < command-line flags.
//
//   # comments and blank lines are skipped
//   best_count=3
//   worst_count=3
//   stabilization_round=7
//   last_round=30
//   max_withdrawn_teams=2
//   include_match_details=true

use std::{fs, path::Path};

use log::warn;

use super::options::AnalysisOptions;
use crate::error::{Error, Result};

pub fn load(path: &Path) -> Result<AnalysisOptions> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    let mut opts = AnalysisOptions::default();
    apply(&text, &mut opts);
    Ok(opts)
}

/// Overlay every recognised key in `text` onto `opts`.
/// Unknown keys are ignored; unparsable values keep the previous value.
pub fn apply(text: &str, opts: &mut AnalysisOptions) {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        let Some(eq) = line.find('=') else { continue };
        let key = line[..eq].trim();
        let val = line[eq + 1..].trim();

        let ok = match key {
            "best_count" => set(val, &mut opts.best_count),
            "worst_count" => set(val, &mut opts.worst_count),
            "stabilization_round" => set(val, &mut opts.stabilization_round),
            "max_withdrawn_teams" => set(val, &mut opts.max_withdrawn_teams),
            "last_round" => match val.parse::<u32>() {
                Ok(n) => { opts.last_round = Some(n); true }
                Err(_) if val.is_empty() || val.eq_ignore_ascii_case("auto") => {
                    opts.last_round = None;
                    true
                }
                Err(_) => false,
            },
            "include_match_details" => match parse_flag(val) {
                Some(b) => { opts.include_match_details = b; true }
                None => false,
            },
            _ => true,
        };
        if !ok {
            warn!("Settings: ignoring unparsable {key}={val:?}");
        }
    }
}

pub fn save(path: &Path, opts: &AnalysisOptions) -> Result<()> {
    let mut s = s!();
    s.push_str(&format!("best_count={}\n", opts.best_count));
    s.push_str(&format!("worst_count={}\n", opts.worst_count));
    s.push_str(&format!("stabilization_round={}\n", opts.stabilization_round));
    if let Some(last) = opts.last_round {
        s.push_str(&format!("last_round={}\n", last));
    }
    s.push_str(&format!("max_withdrawn_teams={}\n", opts.max_withdrawn_teams));
    s.push_str(&format!("include_match_details={}\n", if opts.include_match_details {1} else {0}));
    fs::write(path, s)?;
    Ok(())
}

/// `1`/`true` or `0`/`false`, any case.
fn parse_flag(val: &str) -> Option<bool> {
    if val == "1" || val.eq_ignore_ascii_case("true") {
        Some(true)
    } else if val == "0" || val.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn set<T: std::str::FromStr>(val: &str, slot: &mut T) -> bool {
    match val.parse() {
        Ok(v) => { *slot = v; true }
        Err(_) => false,
    }
}
