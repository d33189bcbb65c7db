use anyhow::Context;
use api::{create_router, AppState};
use assistant_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    log::info!(
        "Providers: {} configured={}, {} configured={}, on total failure: {:?}",
        config.primary.label,
        config.primary.is_configured(),
        config.secondary.label,
        config.secondary.is_configured(),
        config.on_total_failure
    );
    if !config.primary.is_configured() && !config.secondary.is_configured() {
        log::warn!("No provider API key set; chat requests will fail until GROQ_API_KEY or OPENAI_API_KEY is configured");
    }

    let app = create_router(AppState::from_config(&config));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
