//! Day hours and day salary calculation.
//!
//! A day's hours are the span from drop-off (`depot`) to pick-up
//! (`reprise`). A pick-up earlier than the drop-off is read as the next
//! day, so `22:00 → 06:00` is eight hours and `09:00 → 09:00` is a full
//! 24 hours. Hours beyond the daily threshold (`seuilMajoration`) are
//! majoré and paid at `tarifHoraire × tarifMajoration`.

use rust_decimal::Decimal;

use crate::config::Settings;
use crate::models::{DayEntry, DayHours};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Computes a day's hours, split at the majoration threshold.
///
/// Returns all zeros when either time is missing or unreadable. The split
/// does not look at the day's status: a leave day carrying times still
/// yields hours here, and it is up to the aggregation to exclude it.
///
/// # Examples
///
/// ## Day under the threshold
///
/// ```
/// use assmat_engine::calculation::compute_day_hours;
/// use assmat_engine::config::Settings;
/// use assmat_engine::models::DayEntry;
/// use rust_decimal::Decimal;
///
/// let hours = compute_day_hours(&DayEntry::worked("08:00", "16:30"), &Settings::default());
/// assert_eq!(hours.total, Decimal::new(85, 1));
/// assert_eq!(hours.majore, Decimal::ZERO);
/// ```
///
/// ## Overnight day above the threshold
///
/// ```
/// use assmat_engine::calculation::compute_day_hours;
/// use assmat_engine::config::Settings;
/// use assmat_engine::models::DayEntry;
/// use rust_decimal::Decimal;
///
/// // 20:00 -> 07:00 is 11 hours, 9 normal and 2 majorées with the default threshold.
/// let hours = compute_day_hours(&DayEntry::worked("20:00", "07:00"), &Settings::default());
/// assert_eq!(hours.total, Decimal::from(11));
/// assert_eq!(hours.normal, Decimal::from(9));
/// assert_eq!(hours.majore, Decimal::from(2));
/// ```
pub fn compute_day_hours(day: &DayEntry, settings: &Settings) -> DayHours {
    let Some((depot, reprise)) = day.minutes() else {
        return DayHours::default();
    };

    // A pick-up at or before the drop-off belongs to the next day.
    let mut total_minutes = reprise - depot;
    if total_minutes <= 0 {
        total_minutes += MINUTES_PER_DAY;
    }
    let total_hours = Decimal::from(total_minutes) / Decimal::from(60);

    let threshold = settings.seuil_majoration;
    let (normal, majore) = if total_hours <= threshold {
        (total_hours.max(Decimal::ZERO), Decimal::ZERO)
    } else {
        (
            threshold.max(Decimal::ZERO),
            (total_hours - threshold).max(Decimal::ZERO),
        )
    };

    DayHours {
        normal,
        majore,
        total: total_hours.max(Decimal::ZERO),
    }
}

/// Computes a day's salary from its hour split.
///
/// `normal × tarifHoraire + majore × tarifHoraire × tarifMajoration`, not
/// rounded; rounding happens at the aggregation boundaries.
///
/// # Example
///
/// ```
/// use assmat_engine::calculation::compute_day_salary;
/// use assmat_engine::config::Settings;
/// use assmat_engine::models::DayEntry;
/// use rust_decimal::Decimal;
///
/// // 10 hours: 9 * 4.50 + 1 * 4.50 * 1.25
/// let salary = compute_day_salary(&DayEntry::worked("08:00", "18:00"), &Settings::default());
/// assert_eq!(salary, Decimal::new(46125, 3));
/// ```
pub fn compute_day_salary(day: &DayEntry, settings: &Settings) -> Decimal {
    salary_for_hours(&compute_day_hours(day, settings), settings)
}

pub(crate) fn salary_for_hours(hours: &DayHours, settings: &Settings) -> Decimal {
    hours.normal * settings.tarif_horaire
        + hours.majore * settings.tarif_horaire * settings.tarif_majoration
}
