use clap::Parser;
use runware_relay::{config::{Args, RelayConfig}, create_app, state::AppState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // .env is optional, real env vars win
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(Args::parse()).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", args.host, args.port);
    let config = RelayConfig::try_from(args)?;

    info!("Forwarding to Runware at {}", config.base_url);
    info!("Serving front-end from {}", config.static_dir.display());

    let state = Arc::new(AppState::new(config)?);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Relay running on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
