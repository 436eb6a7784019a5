//! Growatt cache freshness tests over the HTTP surface.

use chrono::{Duration, Utc};
use http::StatusCode;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::helpers::{TestApp, decimal_field};

async fn seed_cache_row(
    app: &TestApp,
    client_id: Uuid,
    cached_age_minutes: i64,
    expires_in_minutes: i64,
    is_stale: bool,
) {
    let now = Utc::now();
    sqlx::query(
        r#"INSERT INTO growatt_data_cache
               (client_id, plant_id, plant_name, status, energy_today_kwh,
                cached_at, expires_at, is_stale)
           VALUES ($1, $2, $3, '1', $4, $5, $6, $7)"#,
    )
    .bind(client_id)
    .bind("7001234")
    .bind("Planta Centro")
    .bind(Decimal::new(12_500, 3))
    .bind(now - Duration::minutes(cached_age_minutes))
    .bind(now + Duration::minutes(expires_in_minutes))
    .bind(is_stale)
    .execute(&app.db_pool)
    .await
    .expect("Failed to seed cache row");
}

#[tokio::test]
async fn expired_row_reports_stale_with_age() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;
    let client_id = app.create_portal_client("cliente@test.com", "portal1234").await;
    let token = app.staff_login("admin", "secreto123").await;

    // Cached 130 minutes ago, expired 10 minutes ago, flag not set.
    seed_cache_row(&app, client_id, 130, -10, false).await;

    let response = app
        .request(
            "GET",
            &format!("/api/monitoring/{client_id}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["is_stale"], true);
    let age = data["cache_age_minutes"].as_i64().unwrap();
    assert!((129..=131).contains(&age), "age was {age}");
}

#[tokio::test]
async fn fresh_row_reports_fresh() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;
    let client_id = app.create_portal_client("cliente@test.com", "portal1234").await;
    let token = app.staff_login("admin", "secreto123").await;

    // Cached 5 minutes ago, expires in ~24h.
    seed_cache_row(&app, client_id, 5, 1435, false).await;

    let response = app
        .request(
            "GET",
            &format!("/api/monitoring/{client_id}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["is_stale"], false);
    assert!((decimal_field(&data["energy_today_kwh"]) - 12.5).abs() < 0.001);
    // Null metrics coerce to zero.
    assert!(decimal_field(&data["current_power_w"]).abs() < f64::EPSILON);
}

#[tokio::test]
async fn invalidate_flags_row_stale() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;
    let client_id = app.create_portal_client("cliente@test.com", "portal1234").await;
    let token = app.staff_login("admin", "secreto123").await;

    seed_cache_row(&app, client_id, 5, 1435, false).await;

    let invalidated = app
        .request(
            "POST",
            &format!("/api/monitoring/{client_id}/invalidate"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(invalidated.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/monitoring/{client_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.body["data"]["is_stale"], true);
}

#[tokio::test]
async fn missing_cache_row_returns_null() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;
    let client_id = app.create_portal_client("cliente@test.com", "portal1234").await;
    let token = app.staff_login("admin", "secreto123").await;

    let response = app
        .request(
            "GET",
            &format!("/api/monitoring/{client_id}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"].is_null());
}

#[tokio::test]
async fn portal_client_reads_own_cache() {
    let app = TestApp::new().await;
    let client_id = app.create_portal_client("cliente@test.com", "portal1234").await;
    let token = app.portal_login("cliente@test.com", "portal1234").await;

    seed_cache_row(&app, client_id, 5, 1435, false).await;

    let response = app
        .request("GET", "/api/portal/monitoring", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["plant_id"], "7001234");
    assert_eq!(response.body["data"]["is_stale"], false);
}
