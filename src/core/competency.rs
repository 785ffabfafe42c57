use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Why a competency code was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CompetencyError {
    /// Not exactly six ASCII digits (or not `MM/YYYY` for the display form).
    #[error("competency must be formatted as YYYYMM, got '{0}'")]
    Format(String),

    /// Month component outside 1..=12.
    #[error("month {0} is outside 1..=12")]
    Month(u32),

    /// Year outside 0..=9999.
    #[error("year {0} is outside 0..=9999")]
    Year(i64),
}

/// A payroll period: one calendar year-month.
///
/// Parsed from the `YYYYMM` request code and rendered as `MM/YYYY`, the
/// form the dataset stores. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Competency {
    year: i32,
    month: u32,
}

impl Competency {
    /// Build a competency, checking month and year ranges.
    pub fn new(year: i32, month: u32) -> Result<Self, CompetencyError> {
        if !(1..=12).contains(&month) {
            return Err(CompetencyError::Month(month));
        }
        if !(0..=9999).contains(&year) {
            return Err(CompetencyError::Year(year.into()));
        }
        Ok(Self { year, month })
    }

    /// Parse the `YYYYMM` request code (exactly six ASCII digits).
    pub fn parse(code: &str) -> Result<Self, CompetencyError> {
        if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CompetencyError::Format(code.into()));
        }
        let year: i32 = code[..4]
            .parse()
            .map_err(|_| CompetencyError::Format(code.into()))?;
        let month: u32 = code[4..]
            .parse()
            .map_err(|_| CompetencyError::Format(code.into()))?;
        Self::new(year, month)
    }

    /// Parse the `MM/YYYY` form used inside mock records.
    pub fn parse_display(value: &str) -> Result<Self, CompetencyError> {
        let (mm, yyyy) = value
            .split_once('/')
            .ok_or_else(|| CompetencyError::Format(value.into()))?;
        if mm.len() != 2 || yyyy.len() != 4 {
            return Err(CompetencyError::Format(value.into()));
        }
        Self::parse(&format!("{yyyy}{mm}"))
    }

    /// The competency a calendar date falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// The `YYYYMM` request code.
    pub fn code(self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// Shift by a number of months, rolling the year over as needed.
    ///
    /// `202411` plus 3 months is `202502`. Negative offsets move backwards.
    /// Returns `None` if the result leaves the 0..=9999 year range.
    pub fn plus_months(self, months: i64) -> Option<Self> {
        let index = (i64::from(self.year) * 12 + i64::from(self.month - 1)).checked_add(months)?;
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) as u32 + 1;
        let year = i32::try_from(year).ok()?;
        Self::new(year, month).ok()
    }

    /// True when this competency is later than the month `today` falls in,
    /// i.e. the payroll period has not been closed yet.
    pub fn is_future(self, today: NaiveDate) -> bool {
        self > Self::from_date(today)
    }
}

impl fmt::Display for Competency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for Competency {
    type Err = CompetencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
