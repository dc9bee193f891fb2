mod config;
mod content;
mod db;
mod errors;
mod i18n;
mod models;
mod render;
mod routes;
mod seed;
mod state;
#[cfg(test)]
mod test_helpers;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::open_database;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lebenslauf v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Languages: {} (default {}, translations in {})",
        config.languages.join(", "),
        config.default_language(),
        config.translations_dir.display()
    );

    // Instance directory, schema, first-run seed
    let (db, seeded) = open_database(&config).await?;
    if seeded.total() > 0 {
        info!("Seeded {} default rows", seeded.total());
    }

    let state = AppState::new(db, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the admin UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
