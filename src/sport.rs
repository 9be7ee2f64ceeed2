// src/sport.rs
use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

/// Sports the results pages are crawled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sport {
    Tennis,
    Hockey,
    Football,
    Handball,
    Basketball,
    Volleyball,
}

/// Points handed out for one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointRule {
    pub win: u32,
    pub draw: u32,
    /// (winner, loser) when the match went the full distance, e.g. a 3–2 volleyball result.
    pub full_distance: Option<(u32, u32)>,
}

impl Sport {
    pub const ALL: [Sport; 6] = [
        Sport::Tennis,
        Sport::Hockey,
        Sport::Football,
        Sport::Handball,
        Sport::Basketball,
        Sport::Volleyball,
    ];

    /// Display label, also the persisted `sport` column.
    pub fn label(self) -> &'static str {
        match self {
            Sport::Tennis => "Tennis",
            Sport::Hockey => "Hockey",
            Sport::Football => "Football",
            Sport::Handball => "Handball",
            Sport::Basketball => "Basketball",
            Sport::Volleyball => "Volleyball",
        }
    }

    /// Lower-case form used in URLs and directory names.
    pub fn slug(self) -> &'static str {
        match self {
            Sport::Tennis => "tennis",
            Sport::Hockey => "hockey",
            Sport::Football => "football",
            Sport::Handball => "handball",
            Sport::Basketball => "basketball",
            Sport::Volleyball => "volleyball",
        }
    }

    /// League point table. Tennis has none.
    pub fn point_rule(self) -> Option<PointRule> {
        let rule = |win, draw| PointRule { win, draw, full_distance: None };
        match self {
            Sport::Football => Some(rule(3, 1)),
            Sport::Handball => Some(rule(2, 1)),
            Sport::Hockey => Some(rule(2, 1)),
            Sport::Basketball => Some(rule(2, 0)),
            Sport::Volleyball => Some(PointRule { win: 3, draw: 0, full_distance: Some((2, 1)) }),
            Sport::Tennis => None,
        }
    }

    /// Total score meaning "went the distance" (five sets in volleyball).
    pub fn full_distance_total(self) -> Option<u32> {
        match self {
            Sport::Volleyball => Some(5),
            _ => None,
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sport {
    type Err = Error;

    /// Accepts the display label or the slug, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        Sport::ALL
            .into_iter()
            .find(|sp| sp.label().eq_ignore_ascii_case(t))
            .ok_or_else(|| Error::InvalidSport(t.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_rejects_unknown() {
        assert_eq!("Volleyball".parse::<Sport>().unwrap(), Sport::Volleyball);
        assert_eq!("hockey".parse::<Sport>().unwrap(), Sport::Hockey);
        assert!(matches!("Curling".parse::<Sport>(), Err(Error::InvalidSport(_))));
    }

    #[test]
    fn tennis_has_no_point_table() {
        assert!(Sport::Tennis.point_rule().is_none());
        assert_eq!(Sport::Football.point_rule().unwrap().win, 3);
        assert_eq!(Sport::Volleyball.point_rule().unwrap().full_distance, Some((2, 1)));
    }
}
