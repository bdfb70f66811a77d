//! HTTP request handlers for the statistics API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! handler tags its log lines with a fresh correlation id.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    FIRST_SUPPORTED_YEAR, LAST_SUPPORTED_YEAR, compute_annual_stats, compute_monthly_stats,
    french_public_holidays,
};
use crate::config::{SettingsInput, derive_annual_values};
use crate::error::EngineError;
use crate::models::{AnnualStats, DailyData, MonthKey};
use crate::storage::SavedSettings;

use super::request::MonthDataRequest;
use super::response::{ApiError, ApiErrorResponse, MonthResponse, SettingsResponse};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/settings", get(get_settings).post(post_settings))
        .route("/api/data/:month_key", get(get_month).post(post_month))
        .route("/api/stats/:year", get(get_annual_stats))
        .route("/api/holidays/:year", get(get_holidays))
        .with_state(state)
}

/// Handler for `GET /api/settings`.
async fn get_settings(State(state): State<AppState>) -> ApiResult<SettingsResponse> {
    let correlation_id = Uuid::new_v4();

    let settings = state
        .store()
        .read_settings()
        .map_err(|err| log_failure(correlation_id, err))?;
    let annee_complete = derive_annual_values(&settings).values();

    info!(correlation_id = %correlation_id, "Served settings");
    Ok(Json(SettingsResponse {
        settings,
        annee_complete,
    }))
}

/// Handler for `POST /api/settings`.
///
/// Accepts a partial settings object; absent fields take their defaults.
async fn post_settings(
    State(state): State<AppState>,
    payload: Result<Json<SettingsInput>, JsonRejection>,
) -> ApiResult<SavedSettings> {
    let correlation_id = Uuid::new_v4();
    let Json(input) = payload.map_err(|rejection| reject_json(correlation_id, rejection))?;

    let saved = state
        .store()
        .write_settings(input)
        .map_err(|err| log_failure(correlation_id, err))?;

    info!(correlation_id = %correlation_id, "Settings updated");
    Ok(Json(saved))
}

/// Handler for `GET /api/data/:monthKey`.
async fn get_month(
    State(state): State<AppState>,
    Path(month_key): Path<String>,
) -> ApiResult<MonthResponse> {
    let correlation_id = Uuid::new_v4();
    let key = parse_month_key(correlation_id, &month_key)?;

    let daily_data = state
        .store()
        .read_month(&key)
        .map_err(|err| log_failure(correlation_id, err))?;

    month_response(&state, correlation_id, key, daily_data)
}

/// Handler for `POST /api/data/:monthKey`.
///
/// Replaces the month's entries with the body's `dailyData` and returns the
/// recomputed statistics.
async fn post_month(
    State(state): State<AppState>,
    Path(month_key): Path<String>,
    payload: Result<Json<MonthDataRequest>, JsonRejection>,
) -> ApiResult<MonthResponse> {
    let correlation_id = Uuid::new_v4();
    let key = parse_month_key(correlation_id, &month_key)?;
    let Json(request) = payload.map_err(|rejection| reject_json(correlation_id, rejection))?;

    let stored = state
        .store()
        .write_month(&key, request.daily_data)
        .map_err(|err| log_failure(correlation_id, err))?;

    month_response(&state, correlation_id, key, stored.daily_data)
}

fn month_response(
    state: &AppState,
    correlation_id: Uuid,
    key: MonthKey,
    daily_data: DailyData,
) -> ApiResult<MonthResponse> {
    let start_time = Instant::now();
    let settings = state
        .store()
        .read_settings()
        .map_err(|err| log_failure(correlation_id, err))?;

    let stats = compute_monthly_stats(&daily_data, &settings);
    info!(
        correlation_id = %correlation_id,
        month = %key,
        work_days = stats.work_days,
        total_salary = %stats.total_salary,
        duration_us = start_time.elapsed().as_micros(),
        "Monthly statistics computed"
    );

    Ok(Json(MonthResponse {
        month_key: key.to_string(),
        label: key.label(),
        daily_data,
        stats,
    }))
}

/// Handler for `GET /api/stats/:year`.
async fn get_annual_stats(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> ApiResult<AnnualStats> {
    let correlation_id = Uuid::new_v4();
    let year = parse_year(correlation_id, &year)?;

    let start_time = Instant::now();
    let store = state.store();
    let settings = store
        .read_settings()
        .map_err(|err| log_failure(correlation_id, err))?;
    let months = store
        .read_year(year)
        .map_err(|err| log_failure(correlation_id, err))?;

    let stats = compute_annual_stats(&months, &settings, year);
    info!(
        correlation_id = %correlation_id,
        year,
        grand_total = %stats.grand_total,
        duration_us = start_time.elapsed().as_micros(),
        "Annual statistics computed"
    );

    Ok(Json(stats))
}

/// Handler for `GET /api/holidays/:year`.
///
/// Returns a map of ISO date to holiday name.
async fn get_holidays(Path(year): Path<String>) -> ApiResult<BTreeMap<String, String>> {
    let correlation_id = Uuid::new_v4();
    let year = parse_year(correlation_id, &year)?;

    let holidays: BTreeMap<String, String> = french_public_holidays(year)
        .into_iter()
        .map(|h| (h.date_key(), h.name))
        .collect();

    info!(
        correlation_id = %correlation_id,
        year,
        count = holidays.len(),
        "Served public holidays"
    );
    Ok(Json(holidays))
}

fn parse_month_key(correlation_id: Uuid, raw: &str) -> Result<MonthKey, ApiErrorResponse> {
    raw.parse::<MonthKey>().map_err(|err| {
        warn!(correlation_id = %correlation_id, month_key = %raw, "Rejected month key");
        err.into()
    })
}

fn parse_year(correlation_id: Uuid, raw: &str) -> Result<i32, ApiErrorResponse> {
    raw.parse::<i32>()
        .ok()
        .filter(|y| (FIRST_SUPPORTED_YEAR..=LAST_SUPPORTED_YEAR).contains(y))
        .ok_or_else(|| {
            warn!(correlation_id = %correlation_id, year = %raw, "Rejected year");
            EngineError::InvalidYear {
                year: raw.to_string(),
            }
            .into()
        })
}

fn log_failure(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

fn reject_json(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::new("VALIDATION_ERROR", body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}
