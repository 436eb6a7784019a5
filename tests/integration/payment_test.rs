//! Payment ledger tests: the balance invariant over add/delete sequences.

use http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, decimal_field};

/// Create a client, a catalog product, and an order whose grand total
/// (subtotal + 16% IVA) lands exactly on 10 000. Returns the order id.
async fn order_totalling_10000(app: &TestApp, token: &str) -> String {
    let client = app
        .request(
            "POST",
            "/api/clients",
            Some(json!({ "name": "Comercial del Norte", "email": "norte@test.com" })),
            Some(token),
        )
        .await;
    assert_eq!(client.status, StatusCode::OK, "{:?}", client.body);
    let client_id = client.body["data"]["id"].as_str().unwrap().to_string();

    let product = app
        .request(
            "POST",
            "/api/products",
            Some(json!({
                "sku": "PANEL-550",
                "name": "Panel 550W",
                "unit_price": "1000",
                "unit_cost": "700",
                "stock_quantity": 100,
                "reorder_level": 5,
            })),
            Some(token),
        )
        .await;
    assert_eq!(product.status, StatusCode::OK, "{:?}", product.body);
    let product_id = product.body["data"]["id"].as_str().unwrap().to_string();

    // One unit at 8620.69 plus 16% IVA (1379.31 after rounding) = 10000.00.
    let order = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "client_id": client_id,
                "items": [
                    { "product_id": product_id, "quantity": 1, "unit_price": "8620.69" }
                ],
            })),
            Some(token),
        )
        .await;
    assert_eq!(order.status, StatusCode::OK, "{:?}", order.body);

    let total = decimal_field(&order.body["data"]["order"]["total"]);
    assert!(
        (total - 10000.0).abs() < 0.01,
        "expected total ≈ 10000, got {total}"
    );

    order.body["data"]["order"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn payment_sequence_maintains_ledger_invariant() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;
    let token = app.staff_login("admin", "secreto123").await;

    let order_id = order_totalling_10000(&app, &token).await;

    // First payment: 4000 → partial.
    let first = app
        .request(
            "POST",
            &format!("/api/orders/{order_id}/payments"),
            Some(json!({ "amount": "4000", "method": "transfer" })),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK, "{:?}", first.body);
    let order = &first.body["data"]["order"];
    assert!((decimal_field(&order["amount_paid"]) - 4000.0).abs() < 0.01);
    assert!((decimal_field(&order["balance_due"]) - 6000.0).abs() < 0.01);
    assert_eq!(order["payment_status"], "partial");

    // Second payment: 6000 → paid.
    let second = app
        .request(
            "POST",
            &format!("/api/orders/{order_id}/payments"),
            Some(json!({ "amount": "6000", "method": "cash" })),
            Some(&token),
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    let order = &second.body["data"]["order"];
    assert!((decimal_field(&order["amount_paid"]) - 10000.0).abs() < 0.01);
    assert!(decimal_field(&order["balance_due"]).abs() < 0.01);
    assert_eq!(order["payment_status"], "paid");
    let payment_id = second.body["data"]["payment"]["id"].as_str().unwrap().to_string();

    // Delete the 6000 payment → back to partial.
    let deleted = app
        .request(
            "DELETE",
            &format!("/api/orders/{order_id}/payments/{payment_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    let order = &deleted.body["data"];
    assert!((decimal_field(&order["amount_paid"]) - 4000.0).abs() < 0.01);
    assert!((decimal_field(&order["balance_due"]) - 6000.0).abs() < 0.01);
    assert_eq!(order["payment_status"], "partial");
}

#[tokio::test]
async fn non_positive_payment_rejected() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;
    let token = app.staff_login("admin", "secreto123").await;

    let order_id = order_totalling_10000(&app, &token).await;

    let response = app
        .request(
            "POST",
            &format!("/api/orders/{order_id}/payments"),
            Some(json!({ "amount": "0", "method": "cash" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_foreign_payment_not_found() {
    let app = TestApp::new().await;
    app.create_staff_user("admin", "secreto123", "admin").await;
    let token = app.staff_login("admin", "secreto123").await;

    let order_id = order_totalling_10000(&app, &token).await;
    let bogus = uuid::Uuid::new_v4();

    let response = app
        .request(
            "DELETE",
            &format!("/api/orders/{order_id}/payments/{bogus}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
