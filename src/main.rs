use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use slotbook::config::AppConfig;
use slotbook::db;
use slotbook::routes;
use slotbook::services::insights::ChatCompletionProvider;
use slotbook::services::storage::LocalDiskStore;
use slotbook::services::weather::HttpWeatherProvider;
use slotbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        weather: Box::new(HttpWeatherProvider::new(config.weather_url.clone())),
        insights: Box::new(ChatCompletionProvider::new(
            config.insights_api_key.clone(),
            config.insights_model.clone(),
        )),
        storage: Box::new(LocalDiskStore::new(config.upload_dir.clone())),
        config: config.clone(),
    });

    let app = routes::api_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
