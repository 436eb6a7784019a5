//! Maintenance workflow tests: request intake, direct scheduling, status
//! transitions, and deletion rules.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn portal_request_starts_pending_and_notifies_admins() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;
    let client_id = app.create_portal_client("cliente@test.com", "portal1234").await;
    let portal_token = app.portal_login("cliente@test.com", "portal1234").await;

    let response = app
        .request(
            "POST",
            "/api/portal/maintenance",
            Some(json!({
                "maintenance_type": "corrective",
                "title": "Inversor sin reportar",
                "description": "El inversor dejó de reportar desde ayer",
            })),
            Some(&portal_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "pending_approval");
    assert_eq!(
        response.body["data"]["client_id"].as_str().unwrap(),
        client_id.to_string()
    );
    assert!(response.body["data"]["requested_date"].is_string());

    // Fan-out: the admin sees one notification.
    let staff_token = app.staff_login("admin", "secreto123").await;
    let unread = app
        .request(
            "GET",
            "/api/notifications/unread-count",
            None,
            Some(&staff_token),
        )
        .await;
    assert_eq!(unread.status, StatusCode::OK);
    assert_eq!(unread.body["data"]["count"], 1);
}

#[tokio::test]
async fn staff_scheduling_starts_scheduled_with_history_and_assignment() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;
    let tech_id = app.create_staff_user("tech", "secreto123", "technician").await;
    let client_id = app.create_portal_client("cliente@test.com", "portal1234").await;
    let token = app.staff_login("admin", "secreto123").await;

    let response = app
        .request(
            "POST",
            "/api/maintenance",
            Some(json!({
                "client_id": client_id,
                "maintenance_type": "preventive",
                "title": "Servicio semestral",
                "scheduled_date": "2026-09-14T09:00:00Z",
                "technician_ids": [tech_id],
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "scheduled");
    let id = response.body["data"]["id"].as_str().unwrap().to_string();

    let detail = app
        .request("GET", &format!("/api/maintenance/{id}"), None, Some(&token))
        .await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["data"]["history"].as_array().unwrap().len(), 1);
    assert_eq!(detail.body["data"]["history"][0]["status"], "scheduled");
    let assignments = detail.body["data"]["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["role"], "lead");
}

#[tokio::test]
async fn transitions_stamp_dates_and_append_history() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;
    let tech_id = app.create_staff_user("tech", "secreto123", "technician").await;
    let client_id = app.create_portal_client("cliente@test.com", "portal1234").await;
    let token = app.staff_login("admin", "secreto123").await;

    let created = app
        .request(
            "POST",
            "/api/maintenance",
            Some(json!({
                "client_id": client_id,
                "maintenance_type": "cleaning",
                "title": "Limpieza de paneles",
                "scheduled_date": "2026-09-15T10:00:00Z",
                "technician_ids": [tech_id],
            })),
            Some(&token),
        )
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let in_progress = app
        .request(
            "PUT",
            &format!("/api/maintenance/{id}/status"),
            Some(json!({ "status": "in_progress", "notes": "Técnico en sitio" })),
            Some(&token),
        )
        .await;
    assert_eq!(in_progress.status, StatusCode::OK);
    assert!(in_progress.body["data"]["started_date"].is_string());
    assert!(in_progress.body["data"]["completed_date"].is_null());

    let completed = app
        .request(
            "PUT",
            &format!("/api/maintenance/{id}/status"),
            Some(json!({ "status": "completed" })),
            Some(&token),
        )
        .await;
    assert_eq!(completed.status, StatusCode::OK);
    assert!(completed.body["data"]["completed_date"].is_string());

    let detail = app
        .request("GET", &format!("/api/maintenance/{id}"), None, Some(&token))
        .await;
    // scheduled + in_progress + completed
    assert_eq!(detail.body["data"]["history"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn client_can_delete_only_cancelled_records() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;
    app.create_portal_client("cliente@test.com", "portal1234").await;
    let portal_token = app.portal_login("cliente@test.com", "portal1234").await;

    let created = app
        .request(
            "POST",
            "/api/portal/maintenance",
            Some(json!({
                "maintenance_type": "inspection",
                "title": "Revisión general",
            })),
            Some(&portal_token),
        )
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    // Deleting a pending record is rejected.
    let premature = app
        .request(
            "DELETE",
            &format!("/api/portal/maintenance/{id}"),
            None,
            Some(&portal_token),
        )
        .await;
    assert_eq!(premature.status, StatusCode::CONFLICT);

    // Cancel, then delete succeeds.
    let cancelled = app
        .request(
            "POST",
            &format!("/api/portal/maintenance/{id}/cancel"),
            None,
            Some(&portal_token),
        )
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["data"]["status"], "cancelled");

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/portal/maintenance/{id}"),
            None,
            Some(&portal_token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request(
            "GET",
            &format!("/api/portal/maintenance/{id}"),
            None,
            Some(&portal_token),
        )
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn client_cannot_touch_other_clients_records() {
    let app = TestApp::new().await;
    app.create_portal_client("uno@test.com", "portal1234").await;
    app.create_portal_client("dos@test.com", "portal1234").await;
    let token_uno = app.portal_login("uno@test.com", "portal1234").await;
    let token_dos = app.portal_login("dos@test.com", "portal1234").await;

    let created = app
        .request(
            "POST",
            "/api/portal/maintenance",
            Some(json!({ "maintenance_type": "inspection", "title": "Revisión" })),
            Some(&token_uno),
        )
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let other = app
        .request(
            "GET",
            &format!("/api/portal/maintenance/{id}"),
            None,
            Some(&token_dos),
        )
        .await;
    assert_eq!(other.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn availability_reflects_three_hour_block() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;
    let tech_id = app.create_staff_user("tech", "secreto123", "technician").await;
    let client_id = app.create_portal_client("cliente@test.com", "portal1234").await;
    let token = app.staff_login("admin", "secreto123").await;

    app.request(
        "POST",
        "/api/maintenance",
        Some(json!({
            "client_id": client_id,
            "maintenance_type": "preventive",
            "title": "Servicio",
            "scheduled_date": "2026-09-16T09:00:00Z",
            "technician_ids": [tech_id],
        })),
        Some(&token),
    )
    .await;

    let response = app
        .request(
            "GET",
            "/api/maintenance/availability?date=2026-09-16",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let slots = response.body["data"].as_array().unwrap();
    assert_eq!(slots.len(), 12);
    for slot in slots {
        let hour = slot["hour"].as_i64().unwrap();
        let expect_busy = (9..12).contains(&hour);
        assert_eq!(
            slot["all_busy"].as_bool().unwrap(),
            expect_busy,
            "hour {hour}"
        );
    }
}
