use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, error};

use isupipe_api::{build_router, AppState};
use isupipe_core::repositories::{SessionRepository, StoreHealth, UserRepository};
use isupipe_infrastructure::database::{connection, InMemoryStore, PgSessionRepository, PgUserRepository};
use isupipe_shared::config::AppConfig;
use isupipe_shared::constants::MEMORY_DATABASE_URL;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize telemetry
    isupipe_shared::telemetry::init_telemetry();

    info!("ISUPipe server starting...");

    // Load configuration (.env, config files, environment)
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let state = build_state(config.clone()).await?;
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()
        .with_context(|| format!("invalid app.host {}", config.app.host))?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ISUPipe server stopped");
    Ok(())
}

/// Wire the storage adapters selected by `database.url` into the app state.
async fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    let (users, sessions, health): (
        Arc<dyn UserRepository>,
        Arc<dyn SessionRepository>,
        Arc<dyn StoreHealth>,
    ) = if config.database.url.starts_with(MEMORY_DATABASE_URL) {
        info!("Using in-memory store; data is lost on shutdown");
        let store = Arc::new(InMemoryStore::new());
        (
            store.clone() as Arc<dyn UserRepository>,
            store.clone() as Arc<dyn SessionRepository>,
            store as Arc<dyn StoreHealth>,
        )
    } else {
        info!("Connecting to database...");
        let pool = connection::create_pool(&config.database).await
            .context("failed to connect to the database")?;
        info!("Database connection established.");

        if config.database.run_migrations {
            connection::run_migrations(&pool).await
                .context("failed to apply database migrations")?;
        }

        let users = Arc::new(PgUserRepository::new(pool.clone()));
        (
            users.clone() as Arc<dyn UserRepository>,
            Arc::new(PgSessionRepository::new(pool)) as Arc<dyn SessionRepository>,
            users as Arc<dyn StoreHealth>,
        )
    };

    info!(
        "Sessions last {}s; password scheme {}",
        config.session.ttl_seconds, config.password.scheme
    );

    AppState::new(config, users, sessions, health).context("invalid password settings")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
