mod catalog;
mod config;
mod db;
mod entities;
mod error;
mod filter;
mod merge;
mod models;
mod routes;
mod store;

use std::sync::Arc;

use crate::{catalog::MovieCatalog, config::Config, store::SqlMovieStore};

#[derive(Clone)]
pub struct AppState {
    pub catalog: MovieCatalog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmoteca=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_prepare(config.database_url.clone()).await?;
    let catalog = MovieCatalog::new(Arc::new(SqlMovieStore::new(db)));

    let app = routes::router(Arc::new(AppState { catalog }));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
