//! Route definitions for the MundoSolar HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(portal_routes())
        .merge(client_routes())
        .merge(system_routes())
        .merge(inventory_routes())
        .merge(order_routes())
        .merge(invoice_routes())
        .merge(maintenance_routes())
        .merge(monitoring_routes())
        .merge(notification_routes())
        .merge(report_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Staff auth endpoints: login, refresh, me, password change.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/me/password", put(handlers::auth::change_password))
}

/// Client-portal endpoints.
fn portal_routes() -> Router<AppState> {
    Router::new()
        .route("/portal/login", post(handlers::portal::login))
        .route("/portal/me", get(handlers::portal::me))
        .route("/portal/orders", get(handlers::portal::list_orders))
        .route("/portal/orders/{id}", get(handlers::portal::get_order))
        .route(
            "/portal/maintenance",
            post(handlers::portal::create_maintenance_request),
        )
        .route(
            "/portal/maintenance",
            get(handlers::portal::list_maintenance),
        )
        .route(
            "/portal/maintenance/{id}",
            get(handlers::portal::get_maintenance),
        )
        .route(
            "/portal/maintenance/{id}/cancel",
            post(handlers::portal::cancel_maintenance),
        )
        .route(
            "/portal/maintenance/{id}",
            delete(handlers::portal::delete_maintenance),
        )
        .route("/portal/monitoring", get(handlers::portal::monitoring))
        .route(
            "/portal/notifications",
            get(handlers::portal::list_notifications),
        )
        .route(
            "/portal/notifications/unread-count",
            get(handlers::portal::unread_count),
        )
        .route(
            "/portal/notifications/{id}/read",
            put(handlers::portal::mark_notification_read),
        )
}

/// Client record endpoints.
fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(handlers::client::list_clients))
        .route("/clients", post(handlers::client::create_client))
        .route("/clients/{id}", get(handlers::client::get_client))
        .route("/clients/{id}", put(handlers::client::update_client))
        .route("/clients/{id}", delete(handlers::client::deactivate_client))
        .route(
            "/clients/{id}/portal-password",
            put(handlers::client::set_portal_password),
        )
        .route(
            "/clients/{id}/systems",
            get(handlers::system::list_for_client),
        )
}

/// Solar system endpoints.
fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/systems", post(handlers::system::create_system))
        .route("/systems/{id}", delete(handlers::system::delete_system))
}

/// Product catalog and inventory endpoints.
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(handlers::inventory::list_products))
        .route("/products", post(handlers::inventory::create_product))
        .route("/products/{id}", get(handlers::inventory::get_product))
        .route("/products/{id}", put(handlers::inventory::update_product))
        .route(
            "/products/{id}",
            delete(handlers::inventory::deactivate_product),
        )
        .route(
            "/products/{id}/movements",
            get(handlers::inventory::list_movements),
        )
        .route(
            "/inventory/movements",
            post(handlers::inventory::record_movement),
        )
        .route("/inventory/low-stock", get(handlers::inventory::low_stock))
}

/// Order and payment endpoints.
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(handlers::order::list_orders))
        .route("/orders", post(handlers::order::create_order))
        .route("/orders/{id}", get(handlers::order::get_order))
        .route("/orders/{id}/status", patch(handlers::order::update_status))
        .route("/orders/{id}/payments", post(handlers::order::add_payment))
        .route("/orders/{id}/payments", get(handlers::order::list_payments))
        .route(
            "/orders/{id}/payments/{payment_id}",
            delete(handlers::order::delete_payment),
        )
}

/// Invoice endpoints.
fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(handlers::invoice::list_invoices))
        .route("/invoices", post(handlers::invoice::issue_invoice))
        .route("/invoices/{id}", get(handlers::invoice::get_invoice))
        .route("/invoices/{id}/stamp", post(handlers::invoice::stamp_invoice))
        .route(
            "/invoices/{id}/cancel",
            post(handlers::invoice::cancel_invoice),
        )
}

/// Maintenance workflow endpoints (staff side).
fn maintenance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/maintenance/availability",
            get(handlers::maintenance::availability),
        )
        .route(
            "/maintenance/technicians",
            get(handlers::maintenance::technicians),
        )
        .route("/maintenance", get(handlers::maintenance::list_maintenance))
        .route(
            "/maintenance",
            post(handlers::maintenance::create_maintenance),
        )
        .route(
            "/maintenance/{id}",
            get(handlers::maintenance::get_maintenance),
        )
        .route(
            "/maintenance/{id}/status",
            put(handlers::maintenance::transition_status),
        )
}

/// Growatt monitoring endpoints (staff side).
fn monitoring_routes() -> Router<AppState> {
    Router::new()
        .route("/monitoring/bulk", post(handlers::monitoring::get_bulk_cached))
        .route(
            "/monitoring/{client_id}",
            get(handlers::monitoring::get_cached),
        )
        .route(
            "/monitoring/{client_id}/invalidate",
            post(handlers::monitoring::invalidate),
        )
}

/// Staff notification endpoints.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
}

/// Report endpoints.
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports/dashboard", get(handlers::report::dashboard))
        .route("/reports/sales", get(handlers::report::sales))
}

/// Admin-only endpoints.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route("/admin/users", post(handlers::admin::users::create_user))
        .route(
            "/admin/users/{id}/role",
            put(handlers::admin::users::change_role),
        )
        .route(
            "/admin/users/{id}/reset-password",
            put(handlers::admin::users::reset_password),
        )
        .route(
            "/admin/users/{id}",
            delete(handlers::admin::users::deactivate_user),
        )
        .route("/admin/jobs", get(handlers::admin::jobs::list_jobs))
        .route("/admin/jobs/stats", get(handlers::admin::jobs::queue_stats))
        .route(
            "/admin/jobs/growatt-refresh",
            post(handlers::admin::jobs::trigger_growatt_refresh),
        )
        .route("/admin/jobs/{id}", get(handlers::admin::jobs::get_job))
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
