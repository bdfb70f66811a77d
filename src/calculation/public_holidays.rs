//! French public holidays.
//!
//! Computes the metropolitan French public holidays ("jours fériés") of a
//! year: eight fixed dates and three moveable feasts derived from Easter
//! Sunday.

use chrono::{Days, NaiveDate};

use crate::models::PublicHoliday;

/// Region tag attached to every computed holiday.
pub const HOLIDAY_REGION: &str = "metropole";

/// First year of the Gregorian calendar the Easter computation applies to.
pub const FIRST_SUPPORTED_YEAR: i32 = 1583;
/// Last supported year.
pub const LAST_SUPPORTED_YEAR: i32 = 9999;

const FIXED_HOLIDAYS: [(u32, u32, &str); 8] = [
    (1, 1, "1er janvier"),
    (5, 1, "1er mai"),
    (5, 8, "8 mai"),
    (7, 14, "14 juillet"),
    (8, 15, "Assomption"),
    (11, 1, "Toussaint"),
    (11, 11, "11 novembre"),
    (12, 25, "Jour de Noël"),
];

/// Days after Easter Sunday of the moveable holidays.
const EASTER_OFFSETS: [(u64, &str); 3] = [
    (1, "Lundi de Pâques"),
    (39, "Ascension"),
    (50, "Lundi de Pentecôte"),
];

/// Returns Easter Sunday of `year` (anonymous Gregorian algorithm).
///
/// # Example
///
/// ```
/// use assmat_engine::calculation::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2025), NaiveDate::from_ymd_opt(2025, 4, 20));
/// assert_eq!(easter_sunday(2026), NaiveDate::from_ymd_opt(2026, 4, 5));
/// ```
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

/// Returns the French public holidays of `year`, sorted by date.
///
/// Returns an empty list for years outside
/// [`FIRST_SUPPORTED_YEAR`]..=[`LAST_SUPPORTED_YEAR`].
///
/// # Example
///
/// ```
/// use assmat_engine::calculation::french_public_holidays;
///
/// let holidays = french_public_holidays(2025);
/// assert_eq!(holidays.len(), 11);
/// assert_eq!(holidays[0].name, "1er janvier");
/// assert_eq!(holidays[1].date_key(), "2025-04-21"); // Lundi de Pâques
/// ```
pub fn french_public_holidays(year: i32) -> Vec<PublicHoliday> {
    if !(FIRST_SUPPORTED_YEAR..=LAST_SUPPORTED_YEAR).contains(&year) {
        return Vec::new();
    }

    let fixed = FIXED_HOLIDAYS
        .iter()
        .filter_map(|&(month, day, name)| {
            Some((NaiveDate::from_ymd_opt(year, month, day)?, name))
        });

    let moveable = easter_sunday(year).into_iter().flat_map(|easter| {
        EASTER_OFFSETS.iter().filter_map(move |&(offset, name)| {
            let date = easter.checked_add_days(Days::new(offset))?;
            Some((date, name))
        })
    });

    let mut holidays: Vec<PublicHoliday> = fixed
        .chain(moveable)
        .map(|(date, name)| PublicHoliday {
            date,
            name: name.to_string(),
            region: HOLIDAY_REGION.to_string(),
        })
        .collect();
    holidays.sort_by_key(|h| h.date);
    holidays
}
