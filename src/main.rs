//! Drinks API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ request id → trace → timeout → body limit → metrics
//!                                                                  │
//!                                                                  ▼
//!                                           ┌──────────────── route ────────────────┐
//!                                           │ rate limiter                           │
//!                                           │   → authenticator (API key | token)    │
//!                                           │   → authorizer (permission | role)     │
//!                                           │   → payload validator                  │
//!                                           │   → handler (catalog | mock mutation)  │
//!                                           └────────────────────────────────────────┘
//!     Client Response
//!     ◀───────────── x-request-id, x-ratelimit-*, JSON body
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use drinks_api::config::{load_config, DrinksConfig};
use drinks_api::lifecycle::{signals, Shutdown};
use drinks_api::observability::{logging, metrics};
use drinks_api::HttpServer;

#[derive(Parser)]
#[command(name = "drinks-api")]
#[command(about = "Mock cocktail drinks API", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => DrinksConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("drinks-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        rate_limiting = config.rate_limit.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
