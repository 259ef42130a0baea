use std::sync::Arc;
use std::time::Duration;

use moviebot_api::{
    api::{create_router, AppState},
    config::Config,
    db::{create_pool, PostgresHistoryStore},
    services::{
        providers::{LocalLlmGenerator, TmdbProvider},
        ChatService,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    let catalog = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        Duration::from_secs(config.catalog_timeout_secs),
    )?);
    let generator = Arc::new(LocalLlmGenerator::new(
        config.llm_api_url.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?);

    let chat = Arc::new(ChatService::new(
        catalog,
        generator,
        config.tmdb_image_url.clone(),
    ));
    let history = Arc::new(PostgresHistoryStore::new(pool));

    let state = AppState::new(chat, history, config.persist_chat);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "MovieBot API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
