//! Settings normalization and "année complète" derivation.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculation::{round, round2};

use super::types::{AnnualDerivation, AnnualValues, Settings, SettingsInput};

/// JSON name of the legacy misspelled net hourly wage field.
///
/// Older data files carry `salaireNetHorraire`; it is read as an alias of
/// `salaireNetHoraire` and written back alongside it on save.
pub const LEGACY_NET_HOURLY_WAGE_FIELD: &str = "salaireNetHorraire";

/// Largest magnitude accepted for any setting.
pub const MAX_SETTING_VALUE: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Smallest non-zero magnitude accepted for any setting (`0.0001`).
pub const MIN_SETTING_MAGNITUDE: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// Monthly net salaries above this are treated as an unconfigured contract.
const MAX_MONTHLY_SALARY: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Overlays a partial settings object onto the defaults.
///
/// Each field absent from `partial` falls back to [`Settings::default`].
/// The legacy `salaireNetHorraire` spelling is used when the canonical
/// `salaireNetHoraire` is absent; when both are present the canonical one
/// wins. Malformed numbers were already turned into zero by
/// [`SettingsInput`]'s deserializer; values whose magnitude is above
/// [`MAX_SETTING_VALUE`] or below [`MIN_SETTING_MAGNITUDE`] are zeroed here
/// too, so the engine's arithmetic stays within `Decimal` range.
///
/// Normalization is idempotent.
///
/// # Example
///
/// ```
/// use assmat_engine::config::{normalize, Settings, SettingsInput};
/// use rust_decimal::Decimal;
///
/// let settings = normalize(SettingsInput {
///     salaire_net_horraire: Some(Decimal::new(390, 2)),
///     ..SettingsInput::default()
/// });
/// assert_eq!(settings.salaire_net_horaire, Decimal::new(390, 2));
/// assert_eq!(settings.tarif_horaire, Settings::default().tarif_horaire);
/// ```
pub fn normalize(partial: SettingsInput) -> Settings {
    let defaults = Settings::default();

    let salaire_net_horaire = bounded(
        "salaireNetHoraire",
        partial
            .salaire_net_horaire
            .or(partial.salaire_net_horraire)
            .unwrap_or(defaults.salaire_net_horaire),
    );

    if partial.salaire_net_horaire.is_none() && partial.salaire_net_horraire.is_some() {
        debug!(
            field = LEGACY_NET_HOURLY_WAGE_FIELD,
            "Migrated legacy net hourly wage field"
        );
    }

    let field = |name: &'static str, value: Option<Decimal>, default: Decimal| {
        bounded(name, value.unwrap_or(default))
    };

    Settings {
        tarif_horaire: field("tarifHoraire", partial.tarif_horaire, defaults.tarif_horaire),
        tarif_majoration: field(
            "tarifMajoration",
            partial.tarif_majoration,
            defaults.tarif_majoration,
        ),
        seuil_majoration: field(
            "seuilMajoration",
            partial.seuil_majoration,
            defaults.seuil_majoration,
        ),
        frais_repas: field("fraisRepas", partial.frais_repas, defaults.frais_repas),
        frais_entretien: field(
            "fraisEntretien",
            partial.frais_entretien,
            defaults.frais_entretien,
        ),
        mois_par_an: field("moisParAn", partial.mois_par_an, defaults.mois_par_an),
        semaines_par_an: field(
            "semainesParAn",
            partial.semaines_par_an,
            defaults.semaines_par_an,
        ),
        jours_travailles_par_semaine: field(
            "joursTravaillesParSemaine",
            partial.jours_travailles_par_semaine,
            defaults.jours_travailles_par_semaine,
        ),
        semaines_travaillees_par_an: field(
            "semainesTravailleesParAn",
            partial.semaines_travaillees_par_an,
            defaults.semaines_travaillees_par_an,
        ),
        nb_heures_par_semaine: field(
            "nbHeuresParSemaine",
            partial.nb_heures_par_semaine,
            defaults.nb_heures_par_semaine,
        ),
        salaire_net_horaire,
        plafond_salaire_net: field(
            "plafondSalaireNet",
            partial.plafond_salaire_net,
            defaults.plafond_salaire_net,
        ),
    }
}

fn bounded(name: &'static str, value: Decimal) -> Decimal {
    let magnitude = value.abs();
    if magnitude > MAX_SETTING_VALUE || (!value.is_zero() && magnitude < MIN_SETTING_MAGNITUDE) {
        warn!(field = name, value = %value, "Setting out of range, using 0");
        Decimal::ZERO
    } else {
        value
    }
}

impl From<&Settings> for SettingsInput {
    fn from(settings: &Settings) -> Self {
        Self {
            tarif_horaire: Some(settings.tarif_horaire),
            tarif_majoration: Some(settings.tarif_majoration),
            seuil_majoration: Some(settings.seuil_majoration),
            frais_repas: Some(settings.frais_repas),
            frais_entretien: Some(settings.frais_entretien),
            mois_par_an: Some(settings.mois_par_an),
            semaines_par_an: Some(settings.semaines_par_an),
            jours_travailles_par_semaine: Some(settings.jours_travailles_par_semaine),
            semaines_travaillees_par_an: Some(settings.semaines_travaillees_par_an),
            nb_heures_par_semaine: Some(settings.nb_heures_par_semaine),
            salaire_net_horaire: Some(settings.salaire_net_horaire),
            salaire_net_horraire: Some(settings.salaire_net_horaire),
            plafond_salaire_net: Some(settings.plafond_salaire_net),
        }
    }
}

/// Derives the full-year ("année complète") figures from the contract.
///
/// Requires `moisParAn`, `semainesParAn`, `joursTravaillesParSemaine`,
/// `semainesTravailleesParAn`, `nbHeuresParSemaine` and `salaireNetHoraire`
/// to be non-zero; otherwise returns [`AnnualDerivation::Unconfigured`].
///
/// - weekly hours: contracted hours per week × worked weeks ÷ weeks per year
/// - monthly days: days per week × worked weeks ÷ months, whole days
/// - monthly hours: weekly hours × weeks per year ÷ months, whole hours
/// - monthly net salary: monthly hours × net hourly wage
/// - net salary per day: monthly net salary ÷ monthly days (0 if no days)
///
/// # Example
///
/// ```
/// use assmat_engine::config::{derive_annual_values, Settings};
/// use rust_decimal::Decimal;
///
/// let values = derive_annual_values(&Settings::default()).values();
/// assert_eq!(values.jours_mensualises, Decimal::from(22));
/// assert_eq!(values.heures_mensualisees, Decimal::from(195));
/// assert_eq!(values.salaire_net_mensualise, Decimal::new(68250, 2));
/// ```
pub fn derive_annual_values(settings: &Settings) -> AnnualDerivation {
    let required = [
        settings.mois_par_an,
        settings.semaines_par_an,
        settings.jours_travailles_par_semaine,
        settings.semaines_travaillees_par_an,
        settings.nb_heures_par_semaine,
        settings.salaire_net_horaire,
    ];
    if required.iter().any(|v| v.is_zero()) {
        debug!("Contract not configured, annual values are zero");
        return AnnualDerivation::Unconfigured;
    }

    match checked_annual_values(settings) {
        Some(values) => AnnualDerivation::Computed(values),
        None => {
            warn!("Annual values out of range, treating contract as unconfigured");
            AnnualDerivation::Unconfigured
        }
    }
}

/// `None` on `Decimal` overflow or when the monthly salary exceeds
/// [`MAX_MONTHLY_SALARY`].
fn checked_annual_values(settings: &Settings) -> Option<AnnualValues> {
    let weekly_hours = settings
        .nb_heures_par_semaine
        .checked_mul(settings.semaines_travaillees_par_an)?
        .checked_div(settings.semaines_par_an)?;
    let monthly_days = round(
        settings
            .jours_travailles_par_semaine
            .checked_mul(settings.semaines_travaillees_par_an)?
            .checked_div(settings.mois_par_an)?,
        0,
    );
    let monthly_hours = round(
        weekly_hours
            .checked_mul(settings.semaines_par_an)?
            .checked_div(settings.mois_par_an)?,
        0,
    );
    let monthly_salary = round2(monthly_hours.checked_mul(settings.salaire_net_horaire)?);
    if monthly_salary.abs() > MAX_MONTHLY_SALARY {
        return None;
    }
    let salary_per_day = if monthly_days.is_zero() {
        Decimal::ZERO
    } else {
        round2(monthly_salary.checked_div(monthly_days)?)
    };
    let over_ceiling = settings.plafond_salaire_net > Decimal::ZERO
        && salary_per_day > settings.plafond_salaire_net;

    Some(AnnualValues {
        jours_mensualises: monthly_days,
        heures_hebdomadaires: round2(weekly_hours),
        heures_mensualisees: monthly_hours,
        salaire_net_mensualise: monthly_salary,
        salaire_net_par_jour: salary_per_day,
        depasse_plafond: over_ceiling,
    })
}
