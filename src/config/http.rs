//! HTTP endpoint configuration

use serde::{Deserialize, Serialize};

/// HTTP API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Listen address for HTTP server (e.g., "0.0.0.0:8080")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Enable CORS for the browser front-end
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            cors_enabled: true,
        }
    }
}
