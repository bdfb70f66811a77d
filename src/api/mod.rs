//! HTTP API module for the statistics engine.
//!
//! This module provides the REST endpoints consumed by the calendar UI:
//! settings, month data with its statistics, annual statistics and the
//! public holiday calendar.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::MonthDataRequest;
pub use response::{ApiError, ApiErrorResponse, MonthResponse, SettingsResponse};
pub use state::AppState;
