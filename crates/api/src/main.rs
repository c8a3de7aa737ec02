use std::net::SocketAddr;
use std::sync::Arc;

use paddock_core::clock::SystemClock;
use paddock_core::store::{ProjectStore, UserStore};
use paddock_core::tracker::Tracker;
use paddock_db::{MemoryStore, PgStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paddock_api::config::ServerConfig;
use paddock_api::router::build_app_router;
use paddock_api::state::AppState;
use paddock_api::storage::LocalPhotoStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paddock_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        locale = ?config.locale,
        cow_growth_kg = config.recheck.cow_growth_kg,
        goat_growth_kg = config.recheck.goat_growth_kg,
        "Loaded server configuration",
    );

    // --- Stores ---
    let (projects, users) = build_stores().await;

    let photos = LocalPhotoStore::create(&config.upload_dir)
        .await
        .expect("Failed to create upload directory");
    tracing::info!(dir = %photos.root().display(), "Photo storage ready");

    // --- App state ---
    let state = AppState {
        projects,
        users,
        photos: Arc::new(photos),
        clock: Arc::new(SystemClock),
        tracker: Tracker::new(config.recheck),
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// PostgreSQL when `DATABASE_URL` is set, otherwise a process-local store.
async fn build_stores() -> (Arc<dyn ProjectStore>, Arc<dyn UserStore>) {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        tracing::warn!("DATABASE_URL not set; using in-memory store, data is lost on restart");
        let store = Arc::new(MemoryStore::new());
        let projects: Arc<dyn ProjectStore> = store.clone();
        return (projects, store);
    };

    let pool = paddock_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    paddock_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    paddock_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let store = Arc::new(PgStore::new(pool));
    let projects: Arc<dyn ProjectStore> = store.clone();
    (projects, store)
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
