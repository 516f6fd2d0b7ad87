//! # HTTP Server
//!
//! Assembles the router around the shared store pipeline and runs the
//! serving loop.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::pipeline::StorePipeline;

use super::config::HttpServerConfig;
use super::store_routes::{health_routes, store_routes, AppState};

/// HTTP server for the payload vault
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration
    pub fn new(pipeline: StorePipeline) -> Self {
        Self::with_config(HttpServerConfig::default(), pipeline)
    }

    /// Create a server with custom configuration
    pub fn with_config(config: HttpServerConfig, pipeline: StorePipeline) -> Self {
        let state = Arc::new(AppState { pipeline });
        let router = Router::new()
            .merge(health_routes())
            .merge(store_routes(state))
            .layer(TraceLayer::new_for_http());
        Self { config, router }
    }

    /// The assembled router, for in-process testing
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind and serve until the process is stopped
    pub async fn run(self) -> std::io::Result<()> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        info!(addr = %addr, "http server listening");
        axum::serve(listener, self.router).await
    }
}
