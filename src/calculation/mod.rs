//! Calculation logic for the statistics engine.
//!
//! This module contains the pure functions of the engine: rounding, the
//! day calculation (hours split at the majoration threshold, overnight
//! wraparound, day salary), the monthly and annual aggregations, and the
//! French public holiday calendar.
//!
//! None of these functions fail or perform I/O; malformed input yields
//! zero-valued results.

mod annual;
mod day_hours;
mod monthly;
mod public_holidays;
mod rounding;

pub use annual::{MONTHS_PER_YEAR, compute_annual_stats};
pub use day_hours::{compute_day_hours, compute_day_salary};
pub use monthly::{build_daily_breakdown, compute_monthly_stats};
pub use public_holidays::{
    FIRST_SUPPORTED_YEAR, HOLIDAY_REGION, LAST_SUPPORTED_YEAR, easter_sunday,
    french_public_holidays,
};
pub use rounding::{ROUNDING_PRECISION, round, round2};
