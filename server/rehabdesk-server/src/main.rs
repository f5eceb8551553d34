use anyhow::Result;
use rehabdesk_server::{create_app, RehabDeskServer, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let server = RehabDeskServer::new(config.clone());
    server.seed_admin().await?;

    let app = create_app(server);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "RehabDesk Engine listening");
    axum::serve(listener, app).await?;
    Ok(())
}
