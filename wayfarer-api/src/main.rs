use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfarer_api::{app, app_with_assets, AppState};
use wayfarer_core::InMemoryStore;
use wayfarer_store::app_config::Config;
use wayfarer_store::{DbClient, StoreAccountRepository, StoreBookingRepository, StoreContactRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfarer_api=debug,wayfarer_core=info,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Wayfarer API on port {}", config.server.port);

    let auth = config.auth.credential_config();

    let state = match &config.database.url {
        Some(url) => {
            let db = DbClient::new(url, &config.database)
                .await
                .context("Failed to connect to PostgreSQL")?;
            db.migrate().await.context("Failed to run migrations")?;

            AppState::new(
                Arc::new(StoreAccountRepository::new(db.pool.clone())),
                Arc::new(StoreBookingRepository::new(db.pool.clone())),
                Arc::new(StoreContactRepository::new(db.pool.clone())),
                &auth,
            )
        }
        None => {
            tracing::warn!("No database.url configured, records will not survive a restart");
            AppState::in_memory(InMemoryStore::new(), &auth)
        }
    };

    let app = match &config.server.public_dir {
        Some(dir) => {
            tracing::info!("Serving static assets from {}", dir.display());
            app_with_assets(state, dir)
        }
        None => app(state),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
