//! Shared test helpers for integration tests.

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tower::ServiceExt;
use uuid::Uuid;

use mundosolar_core::config::AppConfig;

/// Tests share one database; serialize them so clean_database never
/// races a sibling test's writes.
fn db_lock() -> Arc<Mutex<()>> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    Arc::clone(LOCK.get_or_init(|| Arc::new(Mutex::new(()))))
}

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub db_pool: PgPool,
    /// Application config.
    pub config: AppConfig,
    /// Held for the lifetime of the test to serialize database access.
    _guard: OwnedMutexGuard<()>,
}

impl TestApp {
    /// Create a new test application against the test database.
    pub async fn new() -> Self {
        let guard = db_lock().lock_owned().await;
        let config = AppConfig::load("test").expect("Failed to load test config");

        let db = mundosolar_database::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        mundosolar_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");
        let db_pool = db.into_pool();

        Self::clean_database(&db_pool).await;

        let user_repo = Arc::new(mundosolar_database::repositories::user::UserRepository::new(
            db_pool.clone(),
        ));
        let client_repo = Arc::new(
            mundosolar_database::repositories::client::ClientRepository::new(db_pool.clone()),
        );
        let system_repo = Arc::new(
            mundosolar_database::repositories::system::SolarSystemRepository::new(db_pool.clone()),
        );
        let product_repo = Arc::new(
            mundosolar_database::repositories::product::ProductRepository::new(db_pool.clone()),
        );
        let order_repo = Arc::new(
            mundosolar_database::repositories::order::OrderRepository::new(db_pool.clone()),
        );
        let invoice_repo = Arc::new(
            mundosolar_database::repositories::invoice::InvoiceRepository::new(db_pool.clone()),
        );
        let maintenance_repo = Arc::new(
            mundosolar_database::repositories::maintenance::MaintenanceRepository::new(
                db_pool.clone(),
            ),
        );
        let notification_repo = Arc::new(
            mundosolar_database::repositories::notification::NotificationRepository::new(
                db_pool.clone(),
            ),
        );
        let growatt_cache_repo = Arc::new(
            mundosolar_database::repositories::growatt_cache::GrowattCacheRepository::new(
                db_pool.clone(),
            ),
        );
        let job_repo = Arc::new(mundosolar_database::repositories::job::JobRepository::new(
            db_pool.clone(),
        ));

        let password_hasher = Arc::new(mundosolar_auth::password::PasswordHasher::new());
        let jwt_encoder = Arc::new(mundosolar_auth::jwt::JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(mundosolar_auth::jwt::JwtDecoder::new(&config.auth));
        let portal_codec = Arc::new(mundosolar_auth::portal::PortalTokenCodec::new(&config.auth));

        let auth_service = Arc::new(mundosolar_service::auth::AuthService::new(
            Arc::clone(&user_repo),
            Arc::clone(&client_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&jwt_encoder),
            Arc::clone(&jwt_decoder),
            Arc::clone(&portal_codec),
        ));
        let client_service = Arc::new(mundosolar_service::client::ClientService::new(
            Arc::clone(&client_repo),
            Arc::clone(&password_hasher),
        ));
        let system_service = Arc::new(mundosolar_service::system::SolarSystemService::new(
            Arc::clone(&system_repo),
            Arc::clone(&client_repo),
        ));
        let inventory_service = Arc::new(mundosolar_service::inventory::InventoryService::new(
            Arc::clone(&product_repo),
        ));
        let order_service = Arc::new(mundosolar_service::order::OrderService::new(
            Arc::clone(&order_repo),
            Arc::clone(&product_repo),
            Arc::clone(&client_repo),
            config.billing.clone(),
        ));
        let invoice_service = Arc::new(mundosolar_service::invoice::InvoiceService::new(
            Arc::clone(&invoice_repo),
            Arc::clone(&order_repo),
            config.billing.clone(),
        ));
        let notification_service =
            Arc::new(mundosolar_service::notification::NotificationService::new(
                Arc::clone(&notification_repo),
                Arc::clone(&user_repo),
            ));
        let maintenance_service =
            Arc::new(mundosolar_service::maintenance::MaintenanceService::new(
                Arc::clone(&maintenance_repo),
                Arc::clone(&user_repo),
                Arc::clone(&notification_service),
            ));
        let availability_service =
            Arc::new(mundosolar_service::maintenance::AvailabilityService::new(
                Arc::clone(&maintenance_repo),
                Arc::clone(&user_repo),
            ));
        let monitoring_service = Arc::new(mundosolar_service::monitoring::MonitoringService::new(
            Arc::clone(&growatt_cache_repo),
        ));
        let report_service = Arc::new(mundosolar_service::report::ReportService::new(
            Arc::clone(&client_repo),
            Arc::clone(&order_repo),
            Arc::clone(&maintenance_repo),
            Arc::clone(&product_repo),
        ));
        let user_service = Arc::new(mundosolar_service::user::UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
        ));
        let job_queue = Arc::new(mundosolar_worker::queue::JobQueue::new(
            Arc::clone(&job_repo),
            "worker-test".to_string(),
        ));

        let app_state = mundosolar_api::state::AppState {
            config: Arc::new(config.clone()),
            db_pool: db_pool.clone(),
            jwt_decoder,
            portal_codec,
            auth_service,
            client_service,
            system_service,
            inventory_service,
            order_service,
            invoice_service,
            maintenance_service,
            availability_service,
            monitoring_service,
            notification_service,
            report_service,
            user_service,
            job_queue,
            job_repo,
        };

        let router = mundosolar_api::router::build_router(app_state);

        Self {
            router,
            db_pool,
            config,
            _guard: guard,
        }
    }

    /// Clean all test data from the database.
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "jobs",
            "growatt_data_cache",
            "notifications",
            "maintenance_assignments",
            "maintenance_status_history",
            "maintenance_records",
            "invoices",
            "payments",
            "order_items",
            "orders",
            "inventory_movements",
            "products",
            "solar_systems",
            "clients",
            "users",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Create a staff user directly and return their ID.
    pub async fn create_staff_user(&self, username: &str, password: &str, role: &str) -> Uuid {
        let hasher = mundosolar_auth::password::PasswordHasher::new();
        let hash = hasher.hash_password(password).expect("Failed to hash password");
        let id = Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO users (id, username, email, password_hash, full_name, role)
               VALUES ($1, $2, $3, $4, $5, $6::user_role)"#,
        )
        .bind(id)
        .bind(username)
        .bind(format!("{username}@test.com"))
        .bind(&hash)
        .bind(username)
        .bind(role)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test user");

        id
    }

    /// Create a client with portal access directly and return their ID.
    pub async fn create_portal_client(&self, email: &str, password: &str) -> Uuid {
        let hasher = mundosolar_auth::password::PasswordHasher::new();
        let hash = hasher.hash_password(password).expect("Failed to hash password");
        let id = Uuid::new_v4();

        sqlx::query(
            r#"INSERT INTO clients (id, name, email, portal_password_hash)
               VALUES ($1, $2, $3, $4)"#,
        )
        .bind(id)
        .bind(format!("Cliente {email}"))
        .bind(email)
        .bind(&hash)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test client");

        id
    }

    /// Staff login; returns the JWT access token.
    pub async fn staff_login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({ "username": username, "password": password });
        let response = self.request("POST", "/api/auth/login", Some(body), None).await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Staff login failed: {:?}",
            response.body
        );

        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Portal login; returns the portal token.
    pub async fn portal_login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .request("POST", "/api/portal/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Portal login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in portal login response")
            .to_string()
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}

/// Parse a decimal JSON value (serialized as a string) into f64.
pub fn decimal_field(value: &Value) -> f64 {
    value
        .as_str()
        .map(|s| s.parse::<f64>().expect("not a decimal string"))
        .or_else(|| value.as_f64())
        .expect("missing decimal field")
}
