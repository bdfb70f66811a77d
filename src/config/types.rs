//! Settings types for the statistics engine.
//!
//! [`SettingsInput`] is the lenient, partial shape accepted from clients and
//! data files. [`Settings`] is the canonical, fully-populated shape every
//! calculation takes as an explicit argument.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::warn;

/// The childminder's contract and pay parameters, after normalization.
///
/// Deserializing a `Settings` always goes through [`SettingsInput`] and
/// [`normalize`](super::normalize), so missing fields take their defaults
/// and the legacy `salaireNetHorraire` spelling is honoured.
///
/// # Example
///
/// ```
/// use assmat_engine::config::Settings;
/// use rust_decimal::Decimal;
///
/// let settings: Settings = serde_json::from_str(r#"{"tarifHoraire": 5}"#).unwrap();
/// assert_eq!(settings.tarif_horaire, Decimal::from(5));
/// assert_eq!(settings.seuil_majoration, Settings::default().seuil_majoration);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SettingsInput")]
pub struct Settings {
    /// Gross hourly rate applied to worked hours.
    pub tarif_horaire: Decimal,
    /// Multiplier applied to the hourly rate for majoré hours.
    pub tarif_majoration: Decimal,
    /// Daily threshold, in hours, beyond which hours are majoré.
    pub seuil_majoration: Decimal,
    /// Flat meal fee per day flagged with a meal.
    pub frais_repas: Decimal,
    /// Flat maintenance fee per day flagged with maintenance.
    pub frais_entretien: Decimal,
    /// Number of months the annual salary is spread over.
    pub mois_par_an: Decimal,
    /// Number of weeks in a year for the mensualisation.
    pub semaines_par_an: Decimal,
    /// Contracted working days per week.
    pub jours_travailles_par_semaine: Decimal,
    /// Weeks actually worked per year under the contract.
    pub semaines_travaillees_par_an: Decimal,
    /// Contracted hours per week.
    pub nb_heures_par_semaine: Decimal,
    /// Net hourly wage used for the mensualised salary.
    pub salaire_net_horaire: Decimal,
    /// Net daily pay ceiling.
    pub plafond_salaire_net: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tarif_horaire: Decimal::new(450, 2),
            tarif_majoration: Decimal::new(125, 2),
            seuil_majoration: Decimal::from(9),
            frais_repas: Decimal::new(400, 2),
            frais_entretien: Decimal::new(350, 2),
            mois_par_an: Decimal::from(12),
            semaines_par_an: Decimal::from(52),
            jours_travailles_par_semaine: Decimal::from(5),
            semaines_travaillees_par_an: Decimal::from(52),
            nb_heures_par_semaine: Decimal::from(45),
            salaire_net_horaire: Decimal::new(350, 2),
            plafond_salaire_net: Decimal::new(5640, 2),
        }
    }
}

/// A partial settings object, as posted by a client or read from disk.
///
/// Every field is optional. Numeric fields are read leniently: numbers are
/// taken as-is, numeric strings are parsed (a French decimal comma is
/// accepted), booleans count as `1`/`0`, and anything else that is not
/// `null` becomes `0`. Unknown fields are ignored.
///
/// # Example
///
/// ```
/// use assmat_engine::config::SettingsInput;
/// use rust_decimal::Decimal;
///
/// let input: SettingsInput =
///     serde_json::from_str(r#"{"tarifHoraire": "4,75", "fraisRepas": "abc"}"#).unwrap();
/// assert_eq!(input.tarif_horaire, Some(Decimal::new(475, 2)));
/// assert_eq!(input.frais_repas, Some(Decimal::ZERO));
/// assert_eq!(input.frais_entretien, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsInput {
    /// See [`Settings::tarif_horaire`].
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub tarif_horaire: Option<Decimal>,
    /// See [`Settings::tarif_majoration`].
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub tarif_majoration: Option<Decimal>,
    /// See [`Settings::seuil_majoration`].
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub seuil_majoration: Option<Decimal>,
    /// See [`Settings::frais_repas`].
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub frais_repas: Option<Decimal>,
    /// See [`Settings::frais_entretien`].
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub frais_entretien: Option<Decimal>,
    /// See [`Settings::mois_par_an`].
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub mois_par_an: Option<Decimal>,
    /// See [`Settings::semaines_par_an`].
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub semaines_par_an: Option<Decimal>,
    /// See [`Settings::jours_travailles_par_semaine`].
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub jours_travailles_par_semaine: Option<Decimal>,
    /// See [`Settings::semaines_travaillees_par_an`].
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub semaines_travaillees_par_an: Option<Decimal>,
    /// See [`Settings::nb_heures_par_semaine`].
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub nb_heures_par_semaine: Option<Decimal>,
    /// See [`Settings::salaire_net_horaire`].
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub salaire_net_horaire: Option<Decimal>,
    /// Legacy misspelling of `salaireNetHoraire` found in older data files.
    #[serde(
        default,
        rename = "salaireNetHorraire",
        deserialize_with = "lenient_decimal"
    )]
    pub salaire_net_horraire: Option<Decimal>,
    /// See [`Settings::plafond_salaire_net`].
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub plafond_salaire_net: Option<Decimal>,
}

impl From<SettingsInput> for Settings {
    fn from(input: SettingsInput) -> Self {
        super::normalize(input)
    }
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| coerce_decimal(&v)))
}

/// Converts a loosely-typed JSON value to a decimal.
///
/// `null` maps to `None` (use the default); everything else maps to a value.
fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(parse_decimal(&n.to_string()).unwrap_or(Decimal::ZERO)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(Decimal::ZERO);
            }
            Some(parse_decimal(&trimmed.replace(',', ".")).unwrap_or_else(|| {
                warn!(value = %s, "Unparseable numeric setting, using 0");
                Decimal::ZERO
            }))
        }
        Value::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
        Value::Array(_) | Value::Object(_) => {
            warn!("Non-numeric setting value, using 0");
            Some(Decimal::ZERO)
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Figures derived from the contract for a full year ("année complète").
///
/// All-zero (the [`Default`]) means the contract is not configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualValues {
    /// Monthly-equivalent number of working days, rounded to a whole day.
    pub jours_mensualises: Decimal,
    /// Contracted weekly hours smoothed over the year.
    pub heures_hebdomadaires: Decimal,
    /// Monthly-equivalent number of hours, rounded to a whole hour.
    pub heures_mensualisees: Decimal,
    /// Monthly-equivalent net salary.
    pub salaire_net_mensualise: Decimal,
    /// Net salary per monthly-equivalent day.
    pub salaire_net_par_jour: Decimal,
    /// Whether the net salary per day exceeds the configured ceiling.
    pub depasse_plafond: bool,
}

/// Outcome of deriving the annual figures from a [`Settings`].
///
/// # Example
///
/// ```
/// use assmat_engine::config::{AnnualDerivation, AnnualValues};
///
/// let derivation = AnnualDerivation::Unconfigured;
/// assert_eq!(derivation.values(), AnnualValues::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnualDerivation {
    /// All required contract fields were set.
    Computed(AnnualValues),
    /// At least one required contract field was zero.
    Unconfigured,
}

impl AnnualDerivation {
    /// Returns the derived values, or all zeros when unconfigured.
    pub fn values(&self) -> AnnualValues {
        match self {
            AnnualDerivation::Computed(values) => values.clone(),
            AnnualDerivation::Unconfigured => AnnualValues::default(),
        }
    }

    /// Returns true when the values were actually computed.
    pub fn is_computed(&self) -> bool {
        matches!(self, AnnualDerivation::Computed(_))
    }
}
