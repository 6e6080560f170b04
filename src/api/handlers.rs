//! HTTP API Request Handlers

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, error};

use super::types::*;
use crate::query::{LookupCoordinator, LookupError};
use crate::types::{ApiResponse, LookupResponse};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<LookupCoordinator>,
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        sources: state.coordinator.source_names(),
    })
}

/// Lookup endpoint
pub async fn lookup(State(state): State<AppState>, body: Bytes) -> Response {
    let request = LookupRequest::from_body(&body);

    let Some(dni) = request.dni_str() else {
        debug!("Rejected lookup without a string dni");
        return error_response(StatusCode::BAD_REQUEST, INVALID_DNI_MESSAGE);
    };

    match state.coordinator.lookup(dni).await {
        Ok(response) => (
            StatusCode::OK,
            Json(ApiResponse::<LookupResponse>::ok(response)),
        )
            .into_response(),
        Err(LookupError::InvalidInput(reason)) => {
            debug!("Rejected lookup: {}", reason);
            error_response(StatusCode::BAD_REQUEST, INVALID_DNI_MESSAGE)
        }
        Err(LookupError::NoResultsFound) => {
            error_response(StatusCode::NOT_FOUND, NO_RESULTS_MESSAGE)
        }
        Err(LookupError::Internal(e)) => {
            error!("Lookup failed: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ApiResponse::<LookupResponse>::err(message))).into_response()
}
