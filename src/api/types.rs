//! HTTP API Request/Response Types

use serde::{Deserialize, Serialize};

pub const INVALID_DNI_MESSAGE: &str = "Un número de DNI válido es requerido.";
pub const NO_RESULTS_MESSAGE: &str = "No se encontraron resultados para el DNI ingresado.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno al procesar la solicitud.";

/// Lookup request body.
///
/// `dni` is kept as raw JSON so a number or a missing field can be
/// rejected with the standard envelope instead of an extractor error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupRequest {
    #[serde(default)]
    pub dni: Option<serde_json::Value>,
}

impl LookupRequest {
    /// Parse a request body, treating anything unreadable as an empty request
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The DNI if it was sent as a JSON string
    pub fn dni_str(&self) -> Option<&str> {
        self.dni.as_ref().and_then(|v| v.as_str())
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Whether the service is healthy
    pub healthy: bool,
    /// Service version
    pub version: String,
    /// Registered sources, in order
    pub sources: Vec<String>,
}
