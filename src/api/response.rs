//! Response types for the HTTP API.
//!
//! This module defines the success payloads that wrap engine results, the
//! error response structure and the mapping from [`EngineError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::config::{AnnualValues, Settings};
use crate::error::EngineError;
use crate::models::{DailyData, MonthlyStats};

/// Response body for `GET /api/settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    /// The normalized settings.
    pub settings: Settings,
    /// Full-year figures derived from them.
    pub annee_complete: AnnualValues,
}

/// Response body for `GET` and `POST /api/data/:monthKey`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthResponse {
    /// The `YYYY-MM` key.
    pub month_key: String,
    /// Localized label, e.g. `"mars 2025"`.
    pub label: String,
    /// The stored day entries.
    pub daily_data: DailyData,
    /// Statistics computed from them with the current settings.
    pub stats: MonthlyStats,
}

/// JSON body of every error response: `{ code, message, details? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable machine-readable code, e.g. `INVALID_MONTH_KEY`.
    pub code: String,
    /// Message for humans.
    pub message: String,
    /// Extra context, omitted when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// An error body without details.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Attaches details to the body.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Body for a request whose JSON could not be parsed.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// An [`ApiError`] paired with the status it is sent with.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A `400 Bad Request` with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// A `500 Internal Server Error` with the given body.
    pub fn internal(error: ApiError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidMonthKey { .. } => Self::bad_request(
                ApiError::new("INVALID_MONTH_KEY", message)
                    .with_details("Month keys have the form YYYY-MM"),
            ),
            EngineError::InvalidYear { .. } => Self::bad_request(
                ApiError::new("INVALID_YEAR", message)
                    .with_details("Years must lie between 1583 and 9999"),
            ),
            EngineError::ConfigUnreadable { .. } | EngineError::ConfigParseError { .. } => {
                Self::internal(
                    ApiError::new("CONFIG_ERROR", "Server configuration error")
                        .with_details(message),
                )
            }
            EngineError::StorageIo { .. } | EngineError::StorageParse { .. } => Self::internal(
                ApiError::new("STORAGE_ERROR", "Data file unavailable").with_details(message),
            ),
        }
    }
}
