use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use costwatch_utils::{load_config, setup_logging};
use internal_api::http_router;
use log::{error, info};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(
    name = "costwatch-api",
    version,
    about = "Serves collector execution summaries, executions and detected resources"
)]
struct Args {
    /// Path to the yaml configuration file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args.config)?;
    setup_logging(config.log_level.as_deref()).context("Failed to initialize logging")?;

    let storage = match env_elasticsearch::connect(&config.storage.elasticsearch).await {
        Ok(storage) => storage,
        Err(e) => {
            error!("could not connect to elasticsearch: {}", e);
            return Err(e.into());
        }
    };
    storage.create_index().await;

    let app = http_router::create_router(Arc::new(storage));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Starting HTTP server on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down gracefully");
}
