//! End-to-end tests for the statistics HTTP API.
//!
//! Each test runs the router against a fresh data directory and covers:
//! - Settings persistence, partial updates and the legacy wage field
//! - Month data round trips and monthly statistics
//! - Annual statistics across stored months
//! - Public holiday calendar
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

use assmat_engine::api::{AppState, create_router};
use assmat_engine::storage::JsonStore;

// =============================================================================
// Test Helpers
// =============================================================================

struct TestServer {
    dir: TempDir,
}

impl TestServer {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create data directory"),
        }
    }

    fn router(&self) -> Router {
        create_router(AppState::new(JsonStore::new(self.dir.path())))
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }
}

fn assert_approx(value: &Value, expected: f64) {
    let actual = value
        .as_f64()
        .unwrap_or_else(|| panic!("Expected a number, got {}", value));
    assert!(
        (actual - expected).abs() < 1e-9,
        "Expected {}, got {}",
        expected,
        actual
    );
}

/// March 2025: an 8h day with a meal, an 11h day and a childminder leave
/// day with the maintenance fee.
fn march_days() -> Value {
    json!({
        "dailyData": {
            "2025-03-03": { "depot": "08:00", "reprise": "16:00", "fraisRepas": true },
            "2025-03-04": { "depot": "08:00", "reprise": "19:00" },
            "2025-03-05": { "status": "conge-assmat", "fraisEntretien": true }
        }
    })
}

/// April 2025: two 8h days.
fn april_days() -> Value {
    json!({
        "dailyData": {
            "2025-04-01": { "depot": "08:00", "reprise": "16:00" },
            "2025-04-02": { "depot": "08:00", "reprise": "16:00" }
        }
    })
}

// =============================================================================
// Settings
// =============================================================================

#[tokio::test]
async fn test_settings_default_without_file() {
    let server = TestServer::new();

    let (status, body) = server.get("/api/settings").await;

    assert_eq!(status, StatusCode::OK);
    assert_approx(&body["settings"]["tarifHoraire"], 4.5);
    assert_approx(&body["settings"]["seuilMajoration"], 9.0);
    assert_approx(&body["settings"]["plafondSalaireNet"], 56.4);
    assert_approx(&body["anneeComplete"]["heuresHebdomadaires"], 45.0);
    assert_approx(&body["anneeComplete"]["heuresMensualisees"], 195.0);
    assert_approx(&body["anneeComplete"]["salaireNetMensualise"], 682.5);
    assert_approx(&body["anneeComplete"]["salaireNetParJour"], 31.02);
    assert_eq!(body["anneeComplete"]["depassePlafond"], false);
}

#[tokio::test]
async fn test_partial_settings_update_persists() {
    let server = TestServer::new();

    let (status, saved) = server
        .post("/api/settings", json!({ "tarifHoraire": "5,00" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_approx(&saved["settings"]["tarifHoraire"], 5.0);
    assert_approx(&saved["settings"]["tarifMajoration"], 1.25);

    let (_, body) = server.get("/api/settings").await;
    assert_approx(&body["settings"]["tarifHoraire"], 5.0);
    assert_approx(&body["settings"]["fraisRepas"], 4.0);
}

#[tokio::test]
async fn test_legacy_wage_field_is_migrated_and_mirrored() {
    let server = TestServer::new();

    let (status, saved) = server
        .post("/api/settings", json!({ "salaireNetHorraire": 4 }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_approx(&saved["settings"]["salaireNetHoraire"], 4.0);
    assert_approx(&saved["anneeComplete"]["salaireNetMensualise"], 780.0);
    assert_approx(&saved["anneeComplete"]["salaireNetParJour"], 35.45);

    let on_disk: Value = serde_json::from_str(
        &fs::read_to_string(server.dir.path().join("settings.json")).unwrap(),
    )
    .unwrap();
    assert_approx(&on_disk["salaireNetHoraire"], 4.0);
    assert_approx(&on_disk["salaireNetHorraire"], 4.0);
    assert!(on_disk["lastUpdated"].is_string());
}

#[tokio::test]
async fn test_settings_above_ceiling_are_flagged() {
    let server = TestServer::new();

    let (_, saved) = server
        .post("/api/settings", json!({ "salaireNetHoraire": 7 }))
        .await;

    // 195h * 7 = 1365.00 over 22 days
    assert_approx(&saved["anneeComplete"]["salaireNetParJour"], 62.05);
    assert_eq!(saved["anneeComplete"]["depassePlafond"], true);
}

#[tokio::test]
async fn test_out_of_range_settings_do_not_break_the_server() {
    let server = TestServer::new();

    let (status, saved) = server
        .post(
            "/api/settings",
            json!({ "moisParAn": 1e-27, "tarifHoraire": 1e27 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_approx(&saved["settings"]["moisParAn"], 0.0);
    assert_approx(&saved["anneeComplete"]["salaireNetMensualise"], 0.0);

    let (status, body) = server.get("/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_approx(&body["settings"]["tarifHoraire"], 0.0);
    assert_approx(&body["anneeComplete"]["joursMensualises"], 0.0);

    let (status, month) = server.post("/api/data/2025-04", april_days()).await;
    assert_eq!(status, StatusCode::OK);
    assert_approx(&month["stats"]["totalSalary"], 0.0);

    let (status, _) = server.get("/api/stats/2025").await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Month data
// =============================================================================

#[tokio::test]
async fn test_empty_month() {
    let server = TestServer::new();

    let (status, body) = server.get("/api/data/2025-03").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["monthKey"], "2025-03");
    assert_eq!(body["label"], "mars 2025");
    assert_eq!(body["dailyData"], json!({}));
    assert_eq!(body["stats"]["workDays"], 0);
    assert_approx(&body["stats"]["totalSalary"], 0.0);
}

#[tokio::test]
async fn test_month_statistics() {
    let server = TestServer::new();

    let (status, body) = server.post("/api/data/2025-03", march_days()).await;
    assert_eq!(status, StatusCode::OK);

    let stats = &body["stats"];
    assert_eq!(stats["workDays"], 2);
    assert_eq!(stats["congeDays"], 1);
    assert_eq!(stats["congeParentDays"], 0);
    assert_approx(&stats["totalHours"], 19.0);
    assert_approx(&stats["totalNormalHours"], 17.0);
    assert_approx(&stats["totalMajoredHours"], 2.0);
    // 36.00 + 9h * 4.50 + 2h * 4.50 * 1.25
    assert_approx(&stats["totalSalary"], 87.75);
    assert_eq!(stats["daysWithMeals"], 1);
    assert_eq!(stats["daysWithMaintenance"], 1);
    assert_approx(&stats["fraisRepasTotal"], 4.0);
    assert_approx(&stats["fraisEntretienTotal"], 3.5);
    assert_approx(&stats["theoreticalHours"], 18.0);
    assert_approx(&stats["hoursDelta"], 1.0);
    // 1h * 4.50 * 1.25 = 5.625
    assert_approx(&stats["majorationSalaire"], 5.63);
    assert_approx(&stats["totalWithFrais"], 100.88);
    assert_approx(&stats["ecartMensualise"]["ecartSalaire"], -594.75);

    let breakdown = &stats["dailyBreakdown"];
    assert_approx(&breakdown["2025-03-04"]["heures"]["majore"], 2.0);
    assert_approx(&breakdown["2025-03-04"]["salaire"], 51.75);
    assert_eq!(breakdown["2025-03-05"]["status"], "conge-assmat");
    assert_approx(&breakdown["2025-03-05"]["salaire"], 0.0);
}

#[tokio::test]
async fn test_month_data_persists() {
    let server = TestServer::new();
    server.post("/api/data/2025-03", march_days()).await;

    let (status, body) = server.get("/api/data/2025-03").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dailyData"]["2025-03-03"]["depot"], "08:00");
    assert_eq!(body["dailyData"]["2025-03-05"]["status"], "conge-assmat");
    assert_approx(&body["stats"]["totalSalary"], 87.75);
}

#[tokio::test]
async fn test_month_statistics_follow_current_settings() {
    let server = TestServer::new();
    server.post("/api/data/2025-04", april_days()).await;

    let (_, before) = server.get("/api/data/2025-04").await;
    assert_approx(&before["stats"]["totalSalary"], 72.0);

    server
        .post("/api/settings", json!({ "tarifHoraire": 5 }))
        .await;

    let (_, after) = server.get("/api/data/2025-04").await;
    assert_approx(&after["stats"]["totalSalary"], 80.0);
}

#[tokio::test]
async fn test_overnight_day_wraps_to_next_day() {
    let server = TestServer::new();

    let (_, body) = server
        .post(
            "/api/data/2025-03",
            json!({ "dailyData": { "2025-03-07": { "depot": "22:00", "reprise": "06:00" } } }),
        )
        .await;

    assert_approx(&body["stats"]["totalHours"], 8.0);
    assert_approx(&body["stats"]["totalSalary"], 36.0);
}

#[tokio::test]
async fn test_bare_month_file_is_read() {
    let server = TestServer::new();
    let months = server.dir.path().join("months");
    fs::create_dir_all(&months).unwrap();
    fs::write(
        months.join("2025-02.json"),
        r#"{ "2025-02-03": { "depot": "09:00", "reprise": "17:00" } }"#,
    )
    .unwrap();

    let (status, body) = server.get("/api/data/2025-02").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["workDays"], 1);
    assert_approx(&body["stats"]["totalSalary"], 36.0);
}

#[tokio::test]
async fn test_post_month_without_daily_data_clears_month() {
    let server = TestServer::new();
    server.post("/api/data/2025-03", march_days()).await;

    let (status, body) = server.post("/api/data/2025-03", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dailyData"], json!({}));
    assert_eq!(body["stats"]["workDays"], 0);
}

// =============================================================================
// Annual statistics
// =============================================================================

#[tokio::test]
async fn test_annual_statistics_over_stored_months() {
    let server = TestServer::new();
    server.post("/api/data/2025-03", march_days()).await;
    server.post("/api/data/2025-04", april_days()).await;

    let (status, stats) = server.get("/api/stats/2025").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["year"], 2025);
    assert_eq!(stats["months"].as_array().unwrap().len(), 12);
    assert_eq!(stats["months"][2]["monthName"], "mars 2025");
    assert_eq!(stats["totalWorkDays"], 4);
    assert_eq!(stats["totalCongeDays"], 1);
    assert_approx(&stats["totalHours"], 35.0);
    assert_approx(&stats["totalSalary"], 159.75);
    // April is under contract: only March's delta counts.
    assert_approx(&stats["totalPositiveHoursDelta"], 1.0);
    assert_approx(&stats["totalMajorationSalaire"], 5.63);
    assert_approx(&stats["grandTotal"], 172.88);
    assert_approx(&stats["averageSalaryPerMonth"], 13.31);
    assert_approx(&stats["mensualise"]["salaireAnnuel"], 8190.0);
    assert_approx(&stats["mensualise"]["ecart"], -8030.25);
}

#[tokio::test]
async fn test_annual_statistics_for_empty_year() {
    let server = TestServer::new();

    let (status, stats) = server.get("/api/stats/2030").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalWorkDays"], 0);
    assert_approx(&stats["grandTotal"], 0.0);
    assert_approx(&stats["averageHoursPerMonth"], 0.0);
}

// =============================================================================
// Public holidays
// =============================================================================

#[tokio::test]
async fn test_holidays_2024() {
    let server = TestServer::new();

    let (status, body) = server.get("/api/holidays/2024").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_object().unwrap().len(), 11);
    assert_eq!(body["2024-04-01"], "Lundi de Pâques");
    assert_eq!(body["2024-05-09"], "Ascension");
    assert_eq!(body["2024-05-20"], "Lundi de Pentecôte");
    assert_eq!(body["2024-12-25"], "Jour de Noël");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_month_key() {
    let server = TestServer::new();

    for key in ["2025-3", "march", "2025-00"] {
        let (status, body) = server.get(&format!("/api/data/{}", key)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "key {}", key);
        assert_eq!(body["code"], "INVALID_MONTH_KEY");
    }
}

#[tokio::test]
async fn test_year_out_of_range() {
    let server = TestServer::new();

    let (status, body) = server.get("/api/stats/1200").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_YEAR");
}

#[tokio::test]
async fn test_corrupt_settings_file_returns_500() {
    let server = TestServer::new();
    fs::write(server.dir.path().join("settings.json"), "not json").unwrap();

    let (status, body) = server.get("/api/settings").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "STORAGE_ERROR");
}

#[tokio::test]
async fn test_month_post_malformed_json() {
    let server = TestServer::new();

    let (status, body) = server
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/data/2025-03")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"dailyData\": "))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}
