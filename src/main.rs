//! sealbox entry point
//!
//! Wires startup in order: logging, configuration, the single process-wide
//! storage backend, then the HTTP serving loop. A configuration or backend
//! construction failure exits non-zero before the listener is bound.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sealbox::config::StorageConfig;
use sealbox::http_server::{HttpServer, HttpServerConfig};
use sealbox::pipeline::StorePipeline;
use sealbox::storage::backend_from_config;

#[derive(Debug, Parser)]
#[command(name = "sealbox", about = "Sanitizing, write-only JSON payload vault")]
struct Args {
    /// Host to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run(Args::parse()).await {
        tracing::error!(error = %e, "startup failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorageConfig::from_env()?;
    let backend = backend_from_config(&config).await?;
    let pipeline = StorePipeline::new(backend);

    let server = HttpServer::with_config(
        HttpServerConfig {
            host: args.host,
            port: args.port,
        },
        pipeline,
    );
    server.run().await?;
    Ok(())
}
