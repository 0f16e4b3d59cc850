use tokio::net::TcpListener;

use twinchat::relay::{AppState, RELAY_PATH, RelayConfig, create_router};
use twinchat::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = RelayConfig::from_env()?;
    let provider = config.provider()?;
    if provider.is_none() {
        tracing::warn!("GROQ_API_KEY is not set; chat requests will fail until it is configured");
    }

    let router = create_router(AppState::new(provider));

    tracing::info!(
        addr = %config.addr,
        model = %config.model,
        timeout_secs = config.timeout.as_secs(),
        "Chat relay listening on {}",
        RELAY_PATH
    );

    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
