//! Statistics models.
//!
//! These are the derived, read-only value objects produced by the
//! calculation layer: per-day breakdowns, monthly statistics and annual
//! statistics. They are recomputed on every request and never persisted.
//! Monetary and hour fields are rounded to two decimals; counts are raw.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::AnnualValues;

use super::{DailyData, DayStatus};

/// A day's hours split at the daily majoration threshold.
///
/// # Example
///
/// ```
/// use assmat_engine::models::DayHours;
/// use rust_decimal::Decimal;
///
/// let hours = DayHours {
///     normal: Decimal::from(9),
///     majore: Decimal::from(1),
///     total: Decimal::from(10),
/// };
/// assert_eq!(hours.normal + hours.majore, hours.total);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    /// Hours paid at the regular rate.
    pub normal: Decimal,
    /// Hours paid at the majoré rate.
    pub majore: Decimal,
    /// All hours of the day.
    pub total: Decimal,
}

/// Per-day line of a month's breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBreakdown {
    /// The day's status, `None` for a regular day.
    pub status: Option<DayStatus>,
    /// Hours, rounded to two decimals.
    pub heures: DayHours,
    /// Salary for the day, rounded to two decimals.
    pub salaire: Decimal,
    /// Whether the meal fee applies.
    pub frais_repas: bool,
    /// Whether the maintenance fee applies.
    pub frais_entretien: bool,
}

/// Comparison of a month's actual figures with the mensualised ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcartMensualise {
    /// Monthly-equivalent number of days from the contract.
    pub jours_mensualises: Decimal,
    /// Days actually worked this month.
    pub jours_travailles: u32,
    /// Worked days minus monthly-equivalent days.
    pub ecart_jours: Decimal,
    /// Monthly-equivalent net salary from the contract.
    pub salaire_mensualise: Decimal,
    /// Salary actually earned this month.
    pub salaire_reel: Decimal,
    /// Actual salary minus monthly-equivalent salary.
    pub ecart_salaire: Decimal,
}

/// Statistics for one month of day entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    /// Hours worked over the month.
    pub total_hours: Decimal,
    /// Hours paid at the regular rate.
    pub total_normal_hours: Decimal,
    /// Hours paid at the majoré rate.
    pub total_majored_hours: Decimal,
    /// Salary from the daily calculation.
    pub total_salary: Decimal,
    /// Days with both times and no leave status.
    pub work_days: u32,
    /// Childminder leave days.
    pub conge_days: u32,
    /// Parent leave days.
    pub conge_parent_days: u32,
    /// Days tagged as public holidays.
    pub ferie_days: u32,
    /// Days flagged with the meal fee.
    pub days_with_meals: u32,
    /// Days flagged with the maintenance fee.
    pub days_with_maintenance: u32,
    /// Meal fees for the month.
    pub frais_repas_total: Decimal,
    /// Maintenance fees for the month.
    pub frais_entretien_total: Decimal,
    /// Mean hours per worked day.
    pub average_hours_per_day: Decimal,
    /// Contracted hours per working day.
    pub contract_daily_hours: Decimal,
    /// Contracted hours for the days worked.
    pub theoretical_hours: Decimal,
    /// Worked hours minus contracted hours.
    pub hours_delta: Decimal,
    /// Monthly majoration on hours above the contracted ones.
    pub majoration_salaire: Decimal,
    /// Salary, monthly majoration and fees.
    pub total_with_frais: Decimal,
    /// Full-year figures derived from the settings.
    pub annee_complete: AnnualValues,
    /// Actual versus mensualised comparison.
    pub ecart_mensualise: EcartMensualise,
    /// Per-day breakdown, keyed by ISO date.
    pub daily_breakdown: BTreeMap<String, DailyBreakdown>,
}

/// One month's input to the annual aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthInput {
    /// The `YYYY-MM` key of the month.
    pub month_key: String,
    /// The month's day entries.
    pub daily_data: DailyData,
}

/// Summary line for one month of the annual statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    /// The `YYYY-MM` key of the month.
    pub month_key: String,
    /// Localized label, e.g. `"mars 2025"`.
    pub month_name: String,
    /// Hours worked.
    pub total_hours: Decimal,
    /// Majoré hours.
    pub total_majored_hours: Decimal,
    /// Salary from the daily calculation.
    pub total_salary: Decimal,
    /// Days worked.
    pub work_days: u32,
    /// Childminder leave days.
    pub conge_days: u32,
    /// Parent leave days.
    pub conge_parent_days: u32,
    /// Meal fees.
    pub frais_repas_total: Decimal,
    /// Maintenance fees.
    pub frais_entretien_total: Decimal,
    /// Worked hours minus contracted hours.
    pub hours_delta: Decimal,
    /// Monthly majoration.
    pub majoration_salaire: Decimal,
    /// Salary, monthly majoration and fees.
    pub total_with_frais: Decimal,
}

/// Projection of the mensualised salary over a year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MensualiseProjection {
    /// Monthly-equivalent net salary.
    pub salaire_mensuel: Decimal,
    /// Twelve times the monthly-equivalent salary.
    pub salaire_annuel: Decimal,
    /// Meal fees over the year.
    pub frais_repas: Decimal,
    /// Maintenance fees over the year.
    pub frais_entretien: Decimal,
    /// Monthly majorations over the year.
    pub majoration_salaire: Decimal,
    /// Annual mensualised salary plus fees and majorations.
    pub total_projete: Decimal,
    /// Salary actually earned over the year.
    pub salaire_reel: Decimal,
    /// Actual salary minus annual mensualised salary.
    pub ecart: Decimal,
}

/// Statistics for a year of months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualStats {
    /// The year these statistics cover.
    pub year: i32,
    /// One summary per input month, in input order.
    pub months: Vec<MonthSummary>,
    /// Hours worked.
    pub total_hours: Decimal,
    /// Hours paid at the regular rate.
    pub total_normal_hours: Decimal,
    /// Majoré hours.
    pub total_majored_hours: Decimal,
    /// Salary from the daily calculation.
    pub total_salary: Decimal,
    /// Days worked.
    pub total_work_days: u32,
    /// Childminder leave days.
    pub total_conge_days: u32,
    /// Parent leave days.
    pub total_conge_parent_days: u32,
    /// Public holiday days.
    pub total_ferie_days: u32,
    /// Meal fees.
    pub total_frais_repas: Decimal,
    /// Maintenance fees.
    pub total_frais_entretien: Decimal,
    /// Sum of the positive monthly hour deltas.
    pub total_positive_hours_delta: Decimal,
    /// Sum of the monthly majorations.
    pub total_majoration_salaire: Decimal,
    /// Salary, majorations and fees.
    pub grand_total: Decimal,
    /// Hours divided by twelve.
    pub average_hours_per_month: Decimal,
    /// Salary divided by twelve.
    pub average_salary_per_month: Decimal,
    /// Full-year figures derived from the settings.
    pub annee_complete: AnnualValues,
    /// Mensualised projection versus actual salary.
    pub mensualise: MensualiseProjection,
}
