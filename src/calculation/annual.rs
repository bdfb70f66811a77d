//! Annual aggregation.
//!
//! Runs the monthly aggregation over each month of a year and sums the
//! rounded monthly figures, so that the annual totals always match the sum
//! of the monthly ones shown to the user.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{Settings, derive_annual_values};
use crate::models::{AnnualStats, MensualiseProjection, MonthInput, MonthKey, MonthSummary};

use super::monthly::compute_monthly_stats;
use super::rounding::round2;

/// Number of months the straight-line averages are divided by.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Computes the statistics of a year from its months' entries.
///
/// `months` is processed in order and one [`MonthSummary`] is emitted per
/// entry. Months without data may be omitted: averages are always taken
/// over twelve months. Only positive monthly hour deltas are accumulated
/// into `totalPositiveHoursDelta`.
///
/// The `mensualise` block projects twelve monthly-equivalent salaries plus
/// the fees and monthly majorations actually accumulated, and compares the
/// projected salary with the salary actually earned.
///
/// # Example
///
/// ```
/// use assmat_engine::calculation::compute_annual_stats;
/// use assmat_engine::config::Settings;
/// use assmat_engine::models::{DailyData, DayEntry, MonthInput};
/// use rust_decimal::Decimal;
///
/// let mut days = DailyData::new();
/// days.insert("2025-01-06".to_string(), DayEntry::worked("08:00", "16:00"));
/// let months = vec![MonthInput {
///     month_key: "2025-01".to_string(),
///     daily_data: days,
/// }];
///
/// let stats = compute_annual_stats(&months, &Settings::default(), 2025);
/// assert_eq!(stats.months[0].month_name, "janvier 2025");
/// assert_eq!(stats.total_salary, Decimal::from(36));
/// assert_eq!(stats.average_salary_per_month, Decimal::from(3));
/// ```
pub fn compute_annual_stats(months: &[MonthInput], settings: &Settings, year: i32) -> AnnualStats {
    let mut summaries = Vec::with_capacity(months.len());
    let mut total_hours = Decimal::ZERO;
    let mut total_normal_hours = Decimal::ZERO;
    let mut total_majored_hours = Decimal::ZERO;
    let mut total_salary = Decimal::ZERO;
    let mut total_work_days: u32 = 0;
    let mut total_conge_days: u32 = 0;
    let mut total_conge_parent_days: u32 = 0;
    let mut total_ferie_days: u32 = 0;
    let mut total_frais_repas = Decimal::ZERO;
    let mut total_frais_entretien = Decimal::ZERO;
    let mut total_positive_hours_delta = Decimal::ZERO;
    let mut total_majoration_salaire = Decimal::ZERO;

    for month in months {
        let stats = compute_monthly_stats(&month.daily_data, settings);
        let month_name = month
            .month_key
            .parse::<MonthKey>()
            .map(|key| key.label())
            .unwrap_or_else(|_| month.month_key.clone());

        total_hours += stats.total_hours;
        total_normal_hours += stats.total_normal_hours;
        total_majored_hours += stats.total_majored_hours;
        total_salary += stats.total_salary;
        total_work_days += stats.work_days;
        total_conge_days += stats.conge_days;
        total_conge_parent_days += stats.conge_parent_days;
        total_ferie_days += stats.ferie_days;
        total_frais_repas += stats.frais_repas_total;
        total_frais_entretien += stats.frais_entretien_total;
        if stats.hours_delta > Decimal::ZERO {
            total_positive_hours_delta += stats.hours_delta;
            total_majoration_salaire += stats.majoration_salaire;
        }

        summaries.push(MonthSummary {
            month_key: month.month_key.clone(),
            month_name,
            total_hours: stats.total_hours,
            total_majored_hours: stats.total_majored_hours,
            total_salary: stats.total_salary,
            work_days: stats.work_days,
            conge_days: stats.conge_days,
            conge_parent_days: stats.conge_parent_days,
            frais_repas_total: stats.frais_repas_total,
            frais_entretien_total: stats.frais_entretien_total,
            hours_delta: stats.hours_delta,
            majoration_salaire: stats.majoration_salaire,
            total_with_frais: stats.total_with_frais,
        });
    }

    let grand_total =
        total_salary + total_majoration_salaire + total_frais_repas + total_frais_entretien;
    let months_per_year = Decimal::from(MONTHS_PER_YEAR);

    let annee_complete = derive_annual_values(settings).values();
    let salaire_annuel = round2(annee_complete.salaire_net_mensualise * months_per_year);
    let mensualise = MensualiseProjection {
        salaire_mensuel: annee_complete.salaire_net_mensualise,
        salaire_annuel,
        frais_repas: round2(total_frais_repas),
        frais_entretien: round2(total_frais_entretien),
        majoration_salaire: round2(total_majoration_salaire),
        total_projete: round2(
            salaire_annuel + total_frais_repas + total_frais_entretien + total_majoration_salaire,
        ),
        salaire_reel: round2(total_salary),
        ecart: round2(total_salary - salaire_annuel),
    };

    debug!(
        year,
        months = months.len(),
        total_work_days,
        total_salary = %round2(total_salary),
        grand_total = %round2(grand_total),
        "Computed annual statistics"
    );

    AnnualStats {
        year,
        months: summaries,
        total_hours: round2(total_hours),
        total_normal_hours: round2(total_normal_hours),
        total_majored_hours: round2(total_majored_hours),
        total_salary: round2(total_salary),
        total_work_days,
        total_conge_days,
        total_conge_parent_days,
        total_ferie_days,
        total_frais_repas: round2(total_frais_repas),
        total_frais_entretien: round2(total_frais_entretien),
        total_positive_hours_delta: round2(total_positive_hours_delta),
        total_majoration_salaire: round2(total_majoration_salaire),
        grand_total: round2(grand_total),
        average_hours_per_month: round2(total_hours / months_per_year),
        average_salary_per_month: round2(total_salary / months_per_year),
        annee_complete,
        mensualise,
    }
}
