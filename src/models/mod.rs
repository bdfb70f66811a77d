//! Core data models for the statistics engine.
//!
//! This module contains the recorded day entries, month keys, public
//! holidays and the derived statistics value objects.

mod day_entry;
mod month_key;
mod public_holiday;
mod statistics;

pub use day_entry::{DailyData, DayEntry, DayStatus, TIME_FORMAT};
pub use month_key::{MONTH_NAMES_FR, MonthKey};
pub use public_holiday::PublicHoliday;
pub use statistics::{
    AnnualStats, DailyBreakdown, DayHours, EcartMensualise, MensualiseProjection, MonthInput,
    MonthSummary, MonthlyStats,
};
