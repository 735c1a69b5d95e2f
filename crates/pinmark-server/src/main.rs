mod config;

use std::net::SocketAddr;

use tracing::info;

use pinmark_api::AppStateInner;
use pinmark_db::{Database, LocationStore};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pinmark=debug,pinmark_api=debug,pinmark_db=debug,tower_http=debug".into()
            }),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Init store
    let store = match &config.db_path {
        Some(path) => LocationStore::with_snapshot(Database::open(path)?)?,
        None => {
            info!("No PINMARK_DB_PATH set, locations live in memory only");
            LocationStore::new()
        }
    };

    let app = pinmark_api::router(AppStateInner::new(store), config.graphiql);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Pinmark server listening on {}", addr);
    if config.graphiql {
        info!("GraphiQL available at http://{}/graphql", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
