//! Request types for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::models::DailyData;

/// Request body for `POST /api/data/:monthKey`.
///
/// # Example
///
/// ```
/// use assmat_engine::api::MonthDataRequest;
///
/// let request: MonthDataRequest = serde_json::from_str(
///     r#"{"dailyData": {"2025-03-03": {"depot": "08:00", "reprise": "17:00"}}}"#,
/// ).unwrap();
/// assert_eq!(request.daily_data.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthDataRequest {
    /// The month's day entries, replacing any stored ones.
    #[serde(default)]
    pub daily_data: DailyData,
}
