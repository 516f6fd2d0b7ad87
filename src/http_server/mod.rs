//! # HTTP Server Module
//!
//! The routing boundary in front of the store pipeline.
//!
//! # Endpoints
//!
//! - `GET /` - health check
//! - `POST /store` - sanitize and persist one JSON payload

pub mod config;
pub mod server;
pub mod store_routes;

pub use config::HttpServerConfig;
pub use server::HttpServer;
pub use store_routes::AppState;
