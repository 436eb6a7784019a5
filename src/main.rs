//! MundoSolar Server — business-management backend for a solar-energy
//! installation company.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use mundosolar_core::config::AppConfig;
use mundosolar_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("MUNDOSOLAR_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting MundoSolar v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = mundosolar_database::DatabasePool::connect(&config.database).await?;
    mundosolar_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.pool().clone();

    // ── Step 2: Initialize repositories ──────────────────────────
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
        mundosolar_database::repositories::maintenance::MaintenanceRepository::new(db_pool.clone()),
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

    // ── Step 3: Initialize auth primitives ───────────────────────
    let password_hasher = Arc::new(mundosolar_auth::password::PasswordHasher::new());
    let jwt_encoder = Arc::new(mundosolar_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(mundosolar_auth::jwt::JwtDecoder::new(&config.auth));
    let portal_codec = Arc::new(mundosolar_auth::portal::PortalTokenCodec::new(&config.auth));

    // ── Step 4: Initialize services ──────────────────────────────
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
    let notification_service = Arc::new(mundosolar_service::notification::NotificationService::new(
        Arc::clone(&notification_repo),
        Arc::clone(&user_repo),
    ));
    let maintenance_service = Arc::new(mundosolar_service::maintenance::MaintenanceService::new(
        Arc::clone(&maintenance_repo),
        Arc::clone(&user_repo),
        Arc::clone(&notification_service),
    ));
    let availability_service = Arc::new(mundosolar_service::maintenance::AvailabilityService::new(
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

    // ── Step 5: Shutdown channel & background worker ─────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let worker_id = format!("worker-{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let job_queue = Arc::new(mundosolar_worker::queue::JobQueue::new(
        Arc::clone(&job_repo),
        worker_id.clone(),
    ));

    let worker_handle = if config.worker.enabled {
        let mut job_executor = mundosolar_worker::executor::JobExecutor::new();

        if config.growatt.enabled {
            let growatt_client = mundosolar_growatt::GrowattClient::new(&config.growatt)?;
            job_executor.register(Arc::new(
                mundosolar_worker::jobs::growatt::GrowattRefreshHandler::new(
                    growatt_client,
                    Arc::clone(&growatt_cache_repo),
                    Arc::clone(&system_repo),
                    config.growatt.cache_ttl_minutes,
                ),
            ));
        }

        job_executor.register(Arc::new(
            mundosolar_worker::jobs::cleanup::GrowattCacheCleanupHandler::new(Arc::clone(
                &growatt_cache_repo,
            )),
        ));
        job_executor.register(Arc::new(
            mundosolar_worker::jobs::cleanup::NotificationCleanupHandler::new(
                Arc::clone(&notification_repo),
                90,
            ),
        ));

        let job_executor = Arc::new(job_executor);
        let worker_runner = mundosolar_worker::runner::WorkerRunner::new(
            Arc::clone(&job_queue),
            Arc::clone(&job_executor),
            config.worker.clone(),
            worker_id,
        );

        let scheduler = mundosolar_worker::scheduler::CronScheduler::new(Arc::clone(&job_queue))
            .await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;

        let worker_cancel = shutdown_rx.clone();
        let handle = tokio::spawn(async move {
            worker_runner.run(worker_cancel).await;
        });

        tracing::info!("Background worker started");
        // The scheduler must outlive the server loop; keep it alongside
        // the runner handle.
        Some((handle, scheduler))
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 6: Build and start HTTP server ──────────────────────
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

    let app = mundosolar_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("MundoSolar server listening on {addr}");

    // ── Step 7: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some((handle, mut scheduler)) = worker_handle {
        let _ = scheduler.shutdown().await;
        let _ = tokio::time::timeout(std::time::Duration::from_secs(30), handle).await;
    }

    db.close().await;
    tracing::info!("MundoSolar server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
