//! HTTP API Server Module
//!
//! Exposes the lookup coordinator as `POST /api/lookup` for the browser
//! front-end, plus a health probe.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use routes::create_router;
pub use server::HttpServer;
