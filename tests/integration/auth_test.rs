//! Authentication tests for both token audiences.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn staff_login_and_me() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;

    let token = app.staff_login("admin", "secreto123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "admin");
    assert_eq!(response.body["data"]["role"], "admin");
}

#[tokio::test]
async fn staff_login_rejects_bad_password() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;

    let body = serde_json::json!({ "username": "admin", "password": "wrong" });
    let response = app.request("POST", "/api/auth/login", Some(body), None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/clients", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn portal_token_rejected_on_staff_endpoint() {
    let app = TestApp::new().await;
    app.create_portal_client("cliente@test.com", "portal1234").await;

    let portal_token = app.portal_login("cliente@test.com", "portal1234").await;

    let response = app
        .request("GET", "/api/clients", None, Some(&portal_token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn technician_cannot_access_orders() {
    let app = TestApp::new().await;
    app.create_staff_user("tech", "secreto123", "technician").await;

    let token = app.staff_login("tech", "secreto123").await;
    let response = app.request("GET", "/api/orders", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
