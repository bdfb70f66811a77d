//! JSON file store for settings and month data.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{AnnualValues, Settings, SettingsInput, derive_annual_values, normalize};
use crate::error::{EngineError, EngineResult};
use crate::models::{DailyData, MonthInput, MonthKey};

const SETTINGS_FILE: &str = "settings.json";
const MONTHS_DIR: &str = "months";

/// Settings as written to `settings.json`.
///
/// The net hourly wage is written under both its canonical name and the
/// legacy `salaireNetHorraire` spelling so older readers keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    /// The normalized settings.
    #[serde(flatten)]
    pub settings: Settings,
    /// Mirror of `salaireNetHoraire` under its legacy name.
    #[serde(rename = "salaireNetHorraire")]
    pub salaire_net_horraire: Decimal,
    /// When the file was written.
    pub last_updated: DateTime<Utc>,
}

/// Result of saving the settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSettings {
    /// The normalized settings that were saved.
    pub settings: Settings,
    /// Full-year figures derived from them.
    pub annee_complete: AnnualValues,
    /// The payload as written to disk.
    pub stored: StoredSettings,
}

/// Month data as written to `months/YYYY-MM.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMonth {
    /// The month's day entries.
    pub daily_data: DailyData,
    /// When the file was written.
    pub last_updated: DateTime<Utc>,
}

/// Month files written by older versions hold the bare date map.
#[derive(Deserialize)]
#[serde(untagged)]
enum MonthFile {
    #[serde(rename_all = "camelCase")]
    Wrapped { daily_data: DailyData },
    Bare(DailyData),
}

impl MonthFile {
    fn into_daily_data(self) -> DailyData {
        match self {
            MonthFile::Wrapped { daily_data } => daily_data,
            MonthFile::Bare(daily_data) => daily_data,
        }
    }
}

/// Flat-file store rooted at a data directory.
///
/// # Directory Structure
///
/// ```text
/// data/
/// ├── settings.json     # Settings, legacy alias and lastUpdated
/// └── months/
///     └── 2025-03.json  # { "dailyData": {...}, "lastUpdated": "..." }
/// ```
///
/// Missing files are not errors: settings fall back to the defaults and a
/// month without a file has no entries. Writes go through a temporary file
/// and a rename; concurrent writers follow "last write wins".
///
/// # Example
///
/// ```no_run
/// use assmat_engine::storage::JsonStore;
///
/// let store = JsonStore::new("./data");
/// let settings = store.read_settings()?;
/// let march = store.read_month(&"2025-03".parse()?)?;
/// # Ok::<(), assmat_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    /// Creates a store rooted at `base_dir`. Nothing is touched on disk
    /// until the first write.
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The data directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn settings_path(&self) -> PathBuf {
        self.base_dir.join(SETTINGS_FILE)
    }

    fn month_path(&self, key: &MonthKey) -> PathBuf {
        self.base_dir.join(MONTHS_DIR).join(format!("{}.json", key))
    }

    /// Reads the settings, normalized over the defaults.
    pub fn read_settings(&self) -> EngineResult<Settings> {
        let input = read_json::<SettingsInput>(&self.settings_path())?.unwrap_or_default();
        Ok(normalize(input))
    }

    /// Normalizes and saves the settings.
    ///
    /// Returns the normalized settings, the derived full-year figures and
    /// the payload written to disk.
    pub fn write_settings(&self, input: SettingsInput) -> EngineResult<SavedSettings> {
        let settings = normalize(input);
        let annee_complete = derive_annual_values(&settings).values();
        let stored = StoredSettings {
            salaire_net_horraire: settings.salaire_net_horaire,
            settings: settings.clone(),
            last_updated: Utc::now(),
        };

        let path = self.settings_path();
        write_json(&path, &stored)?;
        info!(path = %path.display(), "Saved settings");

        Ok(SavedSettings {
            annee_complete,
            settings,
            stored,
        })
    }

    /// Reads a month's day entries; empty when the month has no file.
    pub fn read_month(&self, key: &MonthKey) -> EngineResult<DailyData> {
        Ok(read_json::<MonthFile>(&self.month_path(key))?
            .map(MonthFile::into_daily_data)
            .unwrap_or_default())
    }

    /// Replaces a month's day entries.
    ///
    /// Entries whose date does not fall in `key`'s month are kept but
    /// logged.
    pub fn write_month(&self, key: &MonthKey, daily_data: DailyData) -> EngineResult<StoredMonth> {
        for date in daily_data.keys() {
            let in_month = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(|d| key.contains(d))
                .unwrap_or(false);
            if !in_month {
                warn!(month = %key, date = %date, "Day entry outside of its month");
            }
        }

        let stored = StoredMonth {
            daily_data,
            last_updated: Utc::now(),
        };

        let path = self.month_path(key);
        write_json(&path, &stored)?;
        info!(
            month = %key,
            entries = stored.daily_data.len(),
            "Saved month data"
        );

        Ok(stored)
    }

    /// Reads the twelve months of `year`, January first.
    pub fn read_year(&self, year: i32) -> EngineResult<Vec<MonthInput>> {
        let keys = MonthKey::months_of(year);
        if keys.is_empty() {
            return Err(EngineError::InvalidYear {
                year: year.to_string(),
            });
        }

        keys.iter()
            .map(|key| {
                Ok(MonthInput {
                    month_key: key.to_string(),
                    daily_data: self.read_month(key)?,
                })
            })
            .collect()
    }
}

/// Reads and parses a JSON file; `None` when it does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> EngineResult<Option<T>> {
    let path_str = path.display().to_string();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path_str, "No data file, using defaults");
            return Ok(None);
        }
        Err(e) => {
            return Err(EngineError::StorageIo {
                path: path_str,
                message: e.to_string(),
            });
        }
    };

    let value = serde_json::from_str(&content).map_err(|e| EngineError::StorageParse {
        path: path_str.clone(),
        message: e.to_string(),
    })?;
    debug!(path = %path_str, "Loaded data file");

    Ok(Some(value))
}

/// Writes `value` as pretty JSON through a temporary file and a rename.
fn write_json<T: Serialize>(path: &Path, value: &T) -> EngineResult<()> {
    let io_error = |p: &Path, e: std::io::Error| EngineError::StorageIo {
        path: p.display().to_string(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let content = serde_json::to_string_pretty(value).map_err(|e| EngineError::StorageParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content).map_err(|e| io_error(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| io_error(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayEntry, DayStatus};
    use std::str::FromStr;
    use tempfile::TempDir;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn key(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path());
        (dir, store)
    }

    // ==========================================================================
    // Settings
    // ==========================================================================

    #[test]
    fn test_missing_settings_file_yields_defaults() {
        let (_dir, store) = store();
        assert_eq!(store.read_settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_write_then_read_settings() {
        let (_dir, store) = store();
        let saved = store
            .write_settings(SettingsInput {
                tarif_horaire: Some(dec("5.25")),
                ..SettingsInput::default()
            })
            .unwrap();

        assert_eq!(saved.settings.tarif_horaire, dec("5.25"));
        assert_eq!(saved.annee_complete.jours_mensualises, dec("22"));
        assert_eq!(store.read_settings().unwrap(), saved.settings);
    }

    #[test]
    fn test_stored_settings_carry_alias_and_timestamp() {
        let (dir, store) = store();
        store
            .write_settings(SettingsInput {
                salaire_net_horraire: Some(dec("3.80")),
                ..SettingsInput::default()
            })
            .unwrap();

        let raw = fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["salaireNetHoraire"], serde_json::json!(3.8));
        assert_eq!(json["salaireNetHorraire"], serde_json::json!(3.8));
        let last_updated = json["lastUpdated"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(last_updated).is_ok());
    }

    #[test]
    fn test_legacy_settings_file_is_migrated_on_read() {
        let (dir, store) = store();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"salaireNetHorraire": 3.6, "tarifHoraire": "4,20"}"#,
        )
        .unwrap();

        let settings = store.read_settings().unwrap();
        assert_eq!(settings.salaire_net_horaire, dec("3.6"));
        assert_eq!(settings.tarif_horaire, dec("4.20"));
    }

    #[test]
    fn test_corrupt_settings_file_is_a_parse_error() {
        let (dir, store) = store();
        fs::write(dir.path().join(SETTINGS_FILE), "{not json").unwrap();

        match store.read_settings() {
            Err(EngineError::StorageParse { path, .. }) => assert!(path.ends_with(SETTINGS_FILE)),
            other => panic!("Expected StorageParse, got {:?}", other),
        }
    }

    // ==========================================================================
    // Months
    // ==========================================================================

    #[test]
    fn test_missing_month_is_empty() {
        let (_dir, store) = store();
        assert!(store.read_month(&key("2025-03")).unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read_month() {
        let (_dir, store) = store();
        let mut days = DailyData::new();
        days.insert("2025-03-03".to_string(), DayEntry::worked("08:00", "17:00"));
        days.insert(
            "2025-03-04".to_string(),
            DayEntry::with_status(DayStatus::CongeParent),
        );

        let stored = store.write_month(&key("2025-03"), days.clone()).unwrap();
        assert_eq!(stored.daily_data, days);
        assert_eq!(store.read_month(&key("2025-03")).unwrap(), days);
        assert!(store.read_month(&key("2025-04")).unwrap().is_empty());
    }

    #[test]
    fn test_write_month_replaces_previous_entries() {
        let (_dir, store) = store();
        let mut first = DailyData::new();
        first.insert("2025-03-03".to_string(), DayEntry::worked("08:00", "17:00"));
        store.write_month(&key("2025-03"), first).unwrap();

        let mut second = DailyData::new();
        second.insert("2025-03-05".to_string(), DayEntry::worked("09:00", "12:00"));
        store.write_month(&key("2025-03"), second.clone()).unwrap();

        assert_eq!(store.read_month(&key("2025-03")).unwrap(), second);
    }

    #[test]
    fn test_bare_month_file_is_read() {
        let (dir, store) = store();
        fs::create_dir_all(dir.path().join(MONTHS_DIR)).unwrap();
        fs::write(
            dir.path().join(MONTHS_DIR).join("2025-03.json"),
            r#"{"2025-03-03": {"depot": "08:00", "reprise": "16:00", "fraisRepas": true}}"#,
        )
        .unwrap();

        let days = store.read_month(&key("2025-03")).unwrap();
        assert_eq!(days.len(), 1);
        assert!(days["2025-03-03"].frais_repas);
    }

    #[test]
    fn test_read_year_returns_twelve_months_in_order() {
        let (_dir, store) = store();
        let mut days = DailyData::new();
        days.insert("2025-06-02".to_string(), DayEntry::worked("08:00", "16:00"));
        store.write_month(&key("2025-06"), days).unwrap();

        let months = store.read_year(2025).unwrap();

        assert_eq!(months.len(), 12);
        assert_eq!(months[0].month_key, "2025-01");
        assert_eq!(months[5].daily_data.len(), 1);
        assert!(months[6].daily_data.is_empty());
    }

    #[test]
    fn test_read_year_rejects_out_of_range_year() {
        let (_dir, store) = store();
        assert!(matches!(
            store.read_year(12_000),
            Err(EngineError::InvalidYear { .. })
        ));
    }

    #[test]
    fn test_no_temporary_file_left_behind() {
        let (dir, store) = store();
        store.write_month(&key("2025-03"), DailyData::new()).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path().join(MONTHS_DIR))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["2025-03.json".to_string()]);
    }
}
