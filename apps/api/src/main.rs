mod config;
mod documents;
mod errors;
mod routes;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::documents::FileDocumentParser;
use crate::routes::build_router;
use crate::skills::dictionary::SkillDictionary;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skill Match API v{}", env!("CARGO_PKG_VERSION"));

    // Force dictionary construction at startup rather than on the first request.
    let dictionary = SkillDictionary::builtin();
    info!("Skill dictionary loaded ({} skills)", dictionary.len());
    info!(
        "Uploads capped at {} bytes, scratch dir {}",
        config.max_upload_bytes,
        config.upload_dir.display()
    );

    let state = AppState::new(config.clone(), Arc::new(FileDocumentParser));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
