//! Normalising yearly counts against corpus-wide totals.
//!
//! A disease with 10 papers in 2010 and 12 in 2019 is not "growing" if the
//! whole literature grew faster; charts therefore plot each year's count as
//! a percentage of everything published (or registered) that year.

use std::ops::RangeInclusive;

use matchmaker_common::{MatchmakerError, Result, YearCounts};
use serde::Serialize;

/// Fixed per-year totals for one evidence stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearTotals {
    pub label: &'static str,
    pub first_year: i32,
    totals: &'static [u64],
}

/// PubMed records per year, 2009–2020 (2020 is a partial year).
pub const PUBLICATION_TOTALS: YearTotals = YearTotals {
    label: "publication",
    first_year: 2009,
    totals: &[
        659_800,   // 2009
        694_295,   // 2010
        741_366,   // 2011
        805_028,   // 2012
        848_250,   // 2013
        891_503,   // 2014
        925_105,   // 2015
        952_159,   // 2016
        967_534,   // 2017
        1_023_659, // 2018
        1_154_895, // 2019
        16_711,    // 2020
    ],
};

/// Registered clinical trials per year, 1999–2020.
pub const TRIAL_TOTALS: YearTotals = YearTotals {
    label: "clinical trial",
    first_year: 1999,
    totals: &[
        10_972, // 1999
        6_472,  // 2000
        5_013,  // 2001
        6_553,  // 2002
        7_123,  // 2003
        7_167,  // 2004
        52_721, // 2005
        41_029, // 2006
        50_337, // 2007
        61_088, // 2008
        62_768, // 2009
        60_554, // 2010
        62_613, // 2011
        64_626, // 2012
        65_434, // 2013
        69_950, // 2014
        74_481, // 2015
        79_349, // 2016
        74_290, // 2017
        75_459, // 2018
        77_051, // 2019
        35_745, // 2020
    ],
};

impl YearTotals {
    pub fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.first_year + self.totals.len() as i32 - 1
    }

    pub fn total_for(&self, year: i32) -> Option<u64> {
        let offset = usize::try_from(year.checked_sub(self.first_year)?).ok()?;
        self.totals.get(offset).copied()
    }
}

/// One charted point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearShare {
    pub year: i32,
    pub count: u64,
    pub total_count: u64,
    pub percentage: f64,
}

/// One point per year of `totals`, zero-filled where `counts` has no entry.
///
/// A count for a year the totals table does not cover is a data error, not
/// something to silently drop.
pub fn shape_year_series(counts: &YearCounts, totals: &YearTotals) -> Result<Vec<YearShare>> {
    if let Some(stray) = counts.years().find(|y| totals.total_for(*y).is_none()) {
        let range = totals.years();
        return Err(MatchmakerError::DataInconsistency(format!(
            "{} count for {stray} is outside the {}..={} totals table",
            totals.label,
            range.start(),
            range.end()
        )));
    }

    totals
        .years()
        .zip(totals.totals.iter().copied())
        .map(|(year, total_count)| {
            if total_count == 0 {
                return Err(MatchmakerError::DataInconsistency(format!(
                    "{} total for {year} is zero",
                    totals.label
                )));
            }
            let count = counts.get(year);
            Ok(YearShare {
                year,
                count,
                total_count,
                percentage: count as f64 / total_count as f64 * 100.0,
            })
        })
        .collect()
}
