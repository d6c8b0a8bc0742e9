//! Entry point: load config, wire dependencies, and run the server.

use std::sync::Arc;

use tokengate::auth::JwtCodec;
use tokengate::config::Config;
use tokengate::repositories::InMemoryCredentialStore;
use tokengate::{create_app, AppState, AuthService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY is the built-in placeholder; set it before deploying");
    }

    let store = InMemoryCredentialStore::new()
        .with_password(&config.demo_username, &config.demo_password)
        .map_err(|e| anyhow::anyhow!("seed credentials: {}", e))?;
    let codec = JwtCodec::new(config.token_settings());
    let auth_service = AuthService::new(Arc::new(store), codec, config.token_ttl);

    let app = create_app(AppState::new(auth_service));

    tracing::info!(addr = %config.server_addr, algorithm = ?config.algorithm, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
