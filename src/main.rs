mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod store;

use std::{sync::Arc, time::Duration};

use crate::{config::Config, store::MovieStore};

#[derive(Clone)]
pub struct AppState {
    pub store: MovieStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,moviedb=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let state = Arc::new(AppState { store: MovieStore::new(db) });

    let app = routes::app(state, Duration::from_secs(config.request_timeout_secs));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, database = %config.database_url, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
