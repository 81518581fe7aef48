//! Calendar month values in `YYYY-MM` form.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A calendar month, printed and parsed as zero-padded `YYYY-MM`.
///
/// Because the textual form is fixed width, ordering the strings
/// lexicographically matches ordering the months chronologically.
///
/// # Examples
///
/// ```
/// use solar_fleet::fleet::YearMonth;
///
/// let m: YearMonth = "2024-01".parse().unwrap();
/// assert_eq!(m.previous().map(|p| p.to_string()), Some("2023-12".to_string()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: u16,
    month: u8,
}

/// Rejected `YYYY-MM` input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month \"{input}\": expected YYYY-MM")]
pub struct MonthParseError {
    pub input: String,
}

impl YearMonth {
    /// Returns `None` unless `1 <= month <= 12` and the year has four digits.
    pub fn new(year: u16, month: u8) -> Option<Self> {
        if (1..=12).contains(&month) && (1000..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::of_date(chrono::Local::now().date_naive())
    }

    /// The month containing `date`, with the year clamped to four digits.
    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(1000, 9999) as u16,
            month: date.month() as u8,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    /// The month before this one, or `None` before `1000-01`.
    pub fn previous(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// Up to `count` consecutive months ending at `self`, oldest first.
    ///
    /// The window is cut short at `1000-01`.
    pub fn trailing(&self, count: usize) -> Vec<Self> {
        let mut months: Vec<Self> =
            std::iter::successors(Some(*self), Self::previous).take(count).collect();
        months.reverse();
        months
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MonthParseError {
            input: s.to_string(),
        };
        let (y, m) = s.split_once('-').ok_or_else(err)?;
        if y.len() != 4 || m.len() != 2 || !y.chars().chain(m.chars()).all(|c| c.is_ascii_digit())
        {
            return Err(err());
        }
        let year: u16 = y.parse().map_err(|_| err())?;
        let month: u8 = m.parse().map_err(|_| err())?;
        Self::new(year, month).ok_or_else(err)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}
