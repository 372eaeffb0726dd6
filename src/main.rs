//! GitNexus - HTTP server entry point

use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use gitnexus::{Config, create_app, drain_deadline, init_tracing, shutdown_signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        // A missing .env file is normal
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let config = Config::load().map_err(|e| {
        anyhow::anyhow!(
            "Failed to load configuration. Check config/*.toml and GITNEXUS__* env vars: {}",
            e
        )
    })?;

    init_tracing(&config.logging)?;

    tracing::info!("Starting GitNexus server...");
    tracing::info!(
        provider = %config.llm.provider,
        demo_mode = config.llm.demo_mode,
        "Configuration loaded: server={}:{}",
        config.server.host,
        config.server.port
    );

    let router = create_app(&config).await?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Server listening on {}", addr);
    if config.server.enable_docs {
        tracing::info!("API documentation available at http://{}/docs", addr);
    }

    // In-flight analyses may run up to the request timeout; drain for no longer than that.
    let drain_limit = Duration::from_secs(config.server.request_timeout_seconds);

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let listener = TcpListener::bind(addr).await?;
    let server =
        axum::serve(listener, router).with_graceful_shutdown(shutdown.clone().cancelled_owned());
    let server = async move { server.await };

    tokio::select! {
        result = server => result?,
        _ = drain_deadline(shutdown, drain_limit) => {
            tracing::warn!(
                drain_seconds = drain_limit.as_secs(),
                "Shutdown drain limit reached; dropping open connections"
            );
        }
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}
