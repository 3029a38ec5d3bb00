use std::sync::Arc;

mod config;
mod models;
mod routes;
mod spoonacular;
mod views;

use config::Config;
use routes::AppState;
use spoonacular::SpoonacularClient;
use views::Views;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let state = AppState {
        client: SpoonacularClient::new(&config)?,
        views: Arc::new(Views::new()?),
    };
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
