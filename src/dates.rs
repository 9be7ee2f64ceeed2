// src/dates.rs
//
// Year resolution for crawled seasons. Results pages show `DD.MM. HH:MM`
// only; the year comes from the season name and the season's first month.

use chrono::Datelike;

use crate::error::{Error, Result};
use crate::record::MatchRecord;

/// Leading year of a season name: `2020-2021` → 2020, `2021` → 2021.
pub fn season_start_year(season: &str) -> Result<i32> {
    season
        .trim()
        .split('-')
        .next()
        .and_then(|y| y.trim().parse::<i32>().ok())
        .ok_or_else(|| Error::InvalidSeason(season.to_string()))
}

/// Give every record of a crawled season its real year.
///
/// The page lists the newest match first, so the last record is the
/// season opener and its month is the season's start month.
/// Returns the start month used, or `None` when there was nothing to do.
pub fn enhance_season_dates(matches: &mut [MatchRecord], season_start_year: i32) -> Result<Option<u32>> {
    let Some(first_played) = matches.last() else {
        return Ok(None);
    };
    let start_month = first_played.date.month();

    for m in matches.iter_mut() {
        m.enhance_match_date(season_start_year, start_month)?;
    }
    Ok(Some(start_month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::results_table::parse_tokens;
    use crate::sport::Sport;

    #[test]
    fn season_names() {
        assert_eq!(season_start_year("2020-2021").unwrap(), 2020);
        assert_eq!(season_start_year("2023").unwrap(), 2023);
        assert!(matches!(season_start_year("spring"), Err(Error::InvalidSeason(_))));
    }

    #[test]
    fn descending_crawl_gets_years_from_last_record() {
        // Newest first: spring 2021 back to the October 2020 opener.
        let tokens = [
            "ROUND 3", "02.03. 18:00", "A", "B", "1", "0",
            "ROUND 2", "15.12. 18:00", "B", "A", "2", "2",
            "ROUND 1", "10.10. 18:00", "A", "B", "0", "3",
        ];
        let mut matches = parse_tokens(&tokens, Sport::Football);
        let month = enhance_season_dates(&mut matches, 2020).unwrap();
        assert_eq!(month, Some(10));
        let years: Vec<i32> = matches.iter().map(|m| m.date.year()).collect();
        assert_eq!(years, vec![2021, 2020, 2020]);
    }

    #[test]
    fn empty_season_is_a_no_op() {
        assert_eq!(enhance_season_dates(&mut [], 2020).unwrap(), None);
    }
}
