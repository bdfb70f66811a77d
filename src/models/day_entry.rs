//! Day entry model.
//!
//! A [`DayEntry`] is what the user records for one calendar day: drop-off
//! and pick-up times, an optional leave / holiday status and the two fee
//! flags. Entries for a month are kept in a [`DailyData`] map keyed by ISO
//! date string.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Entries of one month, keyed by ISO date (`YYYY-MM-DD`).
pub type DailyData = BTreeMap<String, DayEntry>;

/// Time format used for drop-off and pick-up times.
pub const TIME_FORMAT: &str = "%H:%M";

/// The status tag of a day.
///
/// A day without a status is a regular (worked) day. Tags this engine does
/// not know are kept verbatim as [`DayStatus::Other`] and treated like a
/// day without a status.
///
/// # Example
///
/// ```
/// use assmat_engine::models::DayStatus;
///
/// let status: DayStatus = serde_json::from_str(r#""conge-assmat""#).unwrap();
/// assert_eq!(status, DayStatus::CongeAssmat);
/// assert!(status.is_leave());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DayStatus {
    /// Leave taken by the childminder (`conge-assmat`).
    CongeAssmat,
    /// Leave taken by the parents (`conge-parent`).
    CongeParent,
    /// Public holiday (`ferie`).
    Ferie,
    /// Any other tag.
    Other(String),
}

impl DayStatus {
    /// Returns the wire tag for this status.
    pub fn as_str(&self) -> &str {
        match self {
            DayStatus::CongeAssmat => "conge-assmat",
            DayStatus::CongeParent => "conge-parent",
            DayStatus::Ferie => "ferie",
            DayStatus::Other(tag) => tag,
        }
    }

    /// Returns true for the two leave statuses, which are never counted as
    /// worked days.
    pub fn is_leave(&self) -> bool {
        matches!(self, DayStatus::CongeAssmat | DayStatus::CongeParent)
    }
}

impl From<String> for DayStatus {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "conge-assmat" => DayStatus::CongeAssmat,
            "conge-parent" => DayStatus::CongeParent,
            "ferie" => DayStatus::Ferie,
            _ => DayStatus::Other(tag),
        }
    }
}

impl From<DayStatus> for String {
    fn from(status: DayStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One calendar day's record.
///
/// Empty strings for `depot`, `reprise` and `status` are read as absent.
/// Fee flags accept booleans and tolerate `null`, numbers and strings.
///
/// # Example
///
/// ```
/// use assmat_engine::models::DayEntry;
///
/// let day: DayEntry = serde_json::from_str(
///     r#"{"depot": "08:30", "reprise": "17:00", "status": "", "fraisRepas": true}"#,
/// ).unwrap();
/// assert!(day.status.is_none());
/// assert!(day.has_times());
/// assert!(day.frais_repas);
/// assert!(!day.frais_entretien);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    /// Drop-off time (`HH:MM`).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    pub depot: Option<String>,
    /// Pick-up time (`HH:MM`), read as next day when earlier than `depot`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    pub reprise: Option<String>,
    /// Leave / holiday status; `None` for a regular day.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "status_tag"
    )]
    pub status: Option<DayStatus>,
    /// Whether the meal fee applies to this day.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub frais_repas: bool,
    /// Whether the maintenance fee applies to this day.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub frais_entretien: bool,
}

impl DayEntry {
    /// Creates a regular day with the given drop-off and pick-up times.
    pub fn worked(depot: &str, reprise: &str) -> Self {
        Self {
            depot: Some(depot.to_string()),
            reprise: Some(reprise.to_string()),
            ..Self::default()
        }
    }

    /// Creates a day carrying only a status.
    pub fn with_status(status: DayStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Returns the drop-off and pick-up times as minutes since midnight.
    ///
    /// Returns `None` if either time is missing or not a valid `HH:MM`.
    ///
    /// # Example
    ///
    /// ```
    /// use assmat_engine::models::DayEntry;
    ///
    /// assert_eq!(DayEntry::worked("07:45", "18:15").minutes(), Some((465, 1095)));
    /// assert_eq!(DayEntry::worked("7h45", "18:15").minutes(), None);
    /// ```
    pub fn minutes(&self) -> Option<(i64, i64)> {
        let depot = parse_minutes(self.depot.as_deref()?)?;
        let reprise = parse_minutes(self.reprise.as_deref()?)?;
        Some((depot, reprise))
    }

    /// Returns true when both times are present and readable.
    pub fn has_times(&self) -> bool {
        self.minutes().is_some()
    }
}

fn parse_minutes(time: &str) -> Option<i64> {
    let time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT).ok()?;
    Some(i64::from(time.hour() * 60 + time.minute()))
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn status_tag<'de, D>(deserializer: D) -> Result<Option<DayStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_empty_string(deserializer)?.map(DayStatus::from))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !matches!(s.trim(), "" | "0" | "false"),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    })
}
