//! Public holiday model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A public holiday.
///
/// # Example
///
/// ```
/// use assmat_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2026, 7, 14).unwrap(),
///     name: "14 juillet".to_string(),
///     region: "metropole".to_string(),
/// };
/// assert_eq!(holiday.date_key(), "2026-07-14");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday (e.g., "Lundi de Pâques").
    pub name: String,
    /// The region where this holiday applies (e.g., "metropole").
    pub region: String,
}

impl PublicHoliday {
    /// The ISO date string used as a key in day entry maps.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
