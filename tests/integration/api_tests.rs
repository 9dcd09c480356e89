//! API integration tests against a running server and database.
//!
//! The doctor with id 1 must exist in the `doctors` table.

use chrono::{Datelike, Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_reaches_database() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_replace_clinic_week() {
    let client = Client::new();

    let response = client
        .put(format!("{}/schedules/weekly", BASE_URL))
        .json(&json!({
            "days": [
                { "weekday": 1, "start_time": "08:00:00", "end_time": "16:00:00", "slot_duration_minutes": 30, "is_day_off": false },
                { "weekday": 7, "start_time": "00:00:00", "end_time": "00:00:00", "slot_duration_minutes": 30, "is_day_off": true }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let days = body.as_array().expect("Expected an array");
    assert!(days.iter().any(|d| d["weekday"] == 1 && d["doctor_id"].is_null()));
}

#[tokio::test]
#[ignore]
async fn test_invalid_slot_duration() {
    let client = Client::new();

    let response = client
        .put(format!("{}/schedules/overrides?doctor_id=1", BASE_URL))
        .json(&json!({
            "date": "2030-01-07",
            "start_time": "08:00:00",
            "end_time": "16:00:00",
            "slot_duration_minutes": 5,
            "is_day_off": false
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_double_booking_rejected() {
    let client = Client::new();

    client
        .put(format!("{}/schedules/weekly?doctor_id=1", BASE_URL))
        .json(&json!({
            "days": (1..=7).map(|weekday| json!({
                "weekday": weekday,
                "start_time": "08:00:00",
                "end_time": "20:00:00",
                "slot_duration_minutes": 15,
                "is_day_off": false
            })).collect::<Vec<_>>()
        }))
        .send()
        .await
        .expect("Failed to send request");

    let today = Utc::now().date_naive();
    let date = today - Duration::days(i64::from(today.weekday().num_days_from_monday())) + Duration::days(14);
    let appointment = json!({
        "doctor_id": 1,
        "date": date,
        "time": "19:45:00",
        "patient_second_name": "Test",
        "patient_first_name": "Patient"
    });

    let first = client
        .post(format!("{}/appointments", BASE_URL))
        .json(&appointment)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);
    let created: Value = first.json().await.expect("Failed to parse response");

    let second = client
        .post(format!("{}/appointments", BASE_URL))
        .json(&appointment)
        .send()
        .await
        .expect("Failed to send request");
    assert!(second.status() == 409 || second.status() == 422);

    let cancelled = client
        .post(format!("{}/appointments/{}/cancel", BASE_URL, created["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert!(cancelled.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_clinic_grid() {
    let client = Client::new();

    let response = client
        .get(format!("{}/availability/clinic/grid", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["times"].is_array());
    assert!(body["days"].is_array());
}
