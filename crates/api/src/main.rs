use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fabula_api::config::ServerConfig;
use fabula_api::engine::{GenerationDelays, GenerationEngine};
use fabula_api::router::build_app_router;
use fabula_api::state::AppState;
use fabula_core::navigation::Navigator;
use fabula_core::settings::ProviderSettings;
use fabula_core::store::ProjectStore;
use fabula_core::timeline::Transport;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fabula_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Optional database ---
    // The pipeline holds its state in memory; a missing or unreachable
    // database is logged and the server continues degraded.
    let pool = match std::env::var("DATABASE_URL") {
        Ok(url) => match fabula_db::create_pool(&url).await {
            Ok(pool) => {
                match fabula_db::run_migrations(&pool).await {
                    Ok(()) => tracing::info!("Database connected, migrations applied"),
                    Err(e) => tracing::error!(error = %e, "Failed to run database migrations"),
                }
                Some(pool)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to database, continuing without persistence");
                None
            }
        },
        Err(_) => {
            tracing::error!("DATABASE_URL is not set, continuing without persistence");
            None
        }
    };

    // --- Project store ---
    let store = Arc::new(ProjectStore::new());
    fabula_core::seed::sample_projects(&store);
    tracing::info!(projects = store.len(), "Project store seeded");

    // --- Event bus ---
    let event_bus = Arc::new(fabula_events::EventBus::default());

    // --- Generation engine ---
    let engine = Arc::new(GenerationEngine::new(
        Arc::clone(&store),
        Arc::clone(&event_bus),
        GenerationDelays::default(),
    ));
    tracing::info!("Generation engine started");

    // --- App state ---
    let state = AppState {
        store,
        engine: Arc::clone(&engine),
        navigator: Arc::new(RwLock::new(Navigator::new())),
        transport: Arc::new(RwLock::new(Transport::new())),
        settings: Arc::new(RwLock::new(ProviderSettings::default())),
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        event_bus,
    };

    // --- Router ---
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

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Cancel in-flight generation runs so nothing applies after
    // shutdown.
    engine.shutdown();
    tracing::info!("Generation engine stopped");

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
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
