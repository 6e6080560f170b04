//! DNI lookup: concurrent public-record scraping behind one endpoint
//!
//! For a national identity number, queries several third-party record
//! sites at once, extracts and cleans the text fragments each one returns,
//! and merges the per-source outcomes into a single envelope:
//! - Per-site adapters with independent timeouts (reqwest + scraper)
//! - Shared text normalization and noise filtering
//! - Order-preserving fan-out over tokio tasks
//! - Axum HTTP endpoint with a uniform success/error envelope

pub mod api;
pub mod config;
pub mod query;
pub mod scraping;
pub mod sources;
pub mod types;
pub mod util;

pub use config::Config;
pub use types::*;
