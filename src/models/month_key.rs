//! Month key model.
//!
//! Month data sets are identified by a `YYYY-MM` key, used both as the
//! persistence file name and as the HTTP path parameter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// French month names, January first.
pub const MONTH_NAMES_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// A validated `YYYY-MM` month key.
///
/// # Example
///
/// ```
/// use assmat_engine::models::MonthKey;
///
/// let key: MonthKey = "2025-08".parse().unwrap();
/// assert_eq!(key.year(), 2025);
/// assert_eq!(key.month(), 8);
/// assert_eq!(key.label(), "août 2025");
/// assert_eq!(key.to_string(), "2025-08");
/// assert!("2025-8".parse::<MonthKey>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a key from a year and a 1-based month.
    ///
    /// Returns `None` when the month is out of range or the year is not a
    /// four-digit year.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Returns the twelve months of `year`, January first.
    pub fn months_of(year: i32) -> Vec<Self> {
        (1..=12).filter_map(|m| Self::new(year, m)).collect()
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The French month name, e.g. `"mars"`.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES_FR[(self.month - 1) as usize]
    }

    /// The localized month label, e.g. `"mars 2025"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    /// The first day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// The last day of the month.
    pub fn last_day(&self) -> Option<NaiveDate> {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
    }

    /// Returns true when `date` lies within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.first_day(), self.last_day()) {
            (Some(first), Some(last)) => first <= date && date <= last,
            _ => false,
        }
    }
}

impl FromStr for MonthKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonthKey { key: s.to_string() };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
