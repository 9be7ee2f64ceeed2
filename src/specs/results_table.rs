// src/specs/results_table.rs
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, warn};

use crate::config::consts::{ANNOTATION_MARKERS, UNRESOLVED_YEAR};
use crate::record::{MatchRecord, Stage};
use crate::sport::Sport;

/// Day, month and kick-off time of a `DD.MM. HH:MM` token. No year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KickOff {
    pub day: u32,
    pub month: u32,
    pub hour: u32,
    pub minute: u32,
}

impl KickOff {
    /// Recognise a date token. Only the leading `DD.MM. HH:MM` is looked at;
    /// anything after it is ignored.
    ///
    /// `29.02.` is rewritten to `28.02.` here: the year is not known yet and
    /// the placeholder year has no leap day.
    pub fn from_token(tok: &str) -> Option<Self> {
        let b = tok.as_bytes();
        if b.len() < 12 { return None; }
        let digit = |i: usize| b[i].is_ascii_digit();
        let shape_ok = digit(0) && digit(1) && b[2] == b'.'
            && digit(3) && digit(4) && b[5] == b'.'
            && b[6] == b' '
            && digit(7) && digit(8) && b[9] == b':'
            && digit(10) && digit(11);
        if !shape_ok { return None; }

        let num = |i: usize| u32::from(b[i] - b'0') * 10 + u32::from(b[i + 1] - b'0');
        let mut k = KickOff { day: num(0), month: num(3), hour: num(7), minute: num(10) };
        if k.day == 29 && k.month == 2 {
            k.day = 28;
        }
        Some(k)
    }

    /// Timestamp with the placeholder year; `None` for impossible dates (31.04., 25:00, …).
    pub fn to_datetime(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(UNRESOLVED_YEAR, self.month, self.day)?
            .and_hms_opt(self.hour, self.minute, 0)
    }
}

impl fmt::Display for KickOff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}. {:02}:{:02}", self.day, self.month, self.hour, self.minute)
    }
}

/// Where the parser stands between tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseState {
    /// Expecting a date token or a stage label.
    SeekingHeader,
    /// A date was read; the next four tokens are the match body.
    ReadingBody(KickOff),
}

/// What one call to [`ResultsTableParser::step`] consumed.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// A stage label; applies to every following match until the next one.
    Stage(Stage),
    /// A date token (plus a trailing `AOT`/`Awrd` marker, if any).
    Header(KickOff),
    Match(MatchRecord),
    /// A match body that could not be read; parsing continues at the next header.
    Discarded { at: usize, reason: String },
}

/// Two-state machine over the flattened results-table text.
pub struct ResultsTableParser<'t, T: AsRef<str>> {
    sport: Sport,
    tokens: &'t [T],
    cursor: usize,
    state: ParseState,
    stage: Stage,
}

impl<'t, T: AsRef<str>> ResultsTableParser<'t, T> {
    pub fn new(sport: Sport, tokens: &'t [T]) -> Self {
        Self {
            sport,
            tokens,
            cursor: 0,
            state: ParseState::SeekingHeader,
            stage: Stage::default(),
        }
    }

    pub fn state(&self) -> ParseState { self.state }
    pub fn stage(&self) -> &Stage { &self.stage }
    pub fn cursor(&self) -> usize { self.cursor }

    fn tok(&self, i: usize) -> Option<&'t str> {
        self.tokens.get(i).map(|t| t.as_ref())
    }

    /// Consume one header token or one match body. `None` at end of stream.
    pub fn step(&mut self) -> Option<Step> {
        match self.state {
            ParseState::SeekingHeader => {
                let tok = self.tok(self.cursor)?;
                self.cursor += 1;

                match KickOff::from_token(tok) {
                    Some(kick_off) => {
                        self.state = ParseState::ReadingBody(kick_off);
                        // Overtime/awarded marker carries no data of its own.
                        if self.tok(self.cursor).is_some_and(|t| ANNOTATION_MARKERS.contains(&t)) {
                            self.cursor += 1;
                        }
                        Some(Step::Header(kick_off))
                    }
                    None => {
                        self.stage = Stage::parse(tok);
                        Some(Step::Stage(self.stage.clone()))
                    }
                }
            }
            ParseState::ReadingBody(kick_off) => {
                let at = self.cursor;
                let (Some(home), Some(away), Some(hs), Some(aws)) =
                    (self.tok(at), self.tok(at + 1), self.tok(at + 2), self.tok(at + 3))
                else {
                    // Header with no body left behind it: end of stream.
                    self.cursor = self.tokens.len();
                    self.state = ParseState::SeekingHeader;
                    return None;
                };
                self.cursor += 4;
                self.state = ParseState::SeekingHeader;

                let (home_score, away_score) = match (hs.parse::<u32>(), aws.parse::<u32>()) {
                    (Ok(h), Ok(a)) => (h, a),
                    _ => return Some(self.discard(at, format!("{home} - {away}: scores {hs:?} / {aws:?}"))),
                };
                let Some(date) = kick_off.to_datetime() else {
                    return Some(self.discard(at, format!("{home} - {away}: impossible date {kick_off}")));
                };

                let mut m = MatchRecord::new(
                    self.sport, home, away, home_score, away_score, date, self.stage.clone(),
                );

                // Period scores: numeric pairs until the first non-numeric token.
                while let (Some(ph), Some(pa)) = (self.tok(self.cursor), self.tok(self.cursor + 1)) {
                    let (Some(ph), Some(pa)) = (numeric(ph), numeric(pa)) else { break };
                    m.add_period_scores(ph, pa);
                    self.cursor += 2;
                }

                Some(Step::Match(m))
            }
        }
    }

    fn discard(&self, at: usize, reason: String) -> Step {
        warn!("Results table: discarding match at token {at}: {reason}");
        Step::Discarded { at, reason }
    }
}

impl<'t, T: AsRef<str>> Iterator for ResultsTableParser<'t, T> {
    type Item = MatchRecord;

    fn next(&mut self) -> Option<MatchRecord> {
        loop {
            if let Step::Match(m) = self.step()? {
                return Some(m);
            }
        }
    }
}

/// Parse a whole token stream; matches come back in stream order.
pub fn parse_tokens<T: AsRef<str>>(tokens: &[T], sport: Sport) -> Vec<MatchRecord> {
    let t = std::time::Instant::now();
    let out: Vec<MatchRecord> = ResultsTableParser::new(sport, tokens).collect();
    debug!("Results table: {} matches from {} tokens in {:?}", out.len(), tokens.len(), t.elapsed());
    out
}

/// Split the table's visible text into trimmed, non-empty line tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

fn numeric(tok: &str) -> Option<u32> {
    if tok.is_empty() || !tok.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tok.parse().ok()
}
