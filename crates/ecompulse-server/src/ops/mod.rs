//! HTTP endpoints. All are read-only projections of the store.
//!
//! - `/`            : endpoint directory
//! - `/health`      : liveness + server time
//! - `/metrics`     : Prometheus text format
//! - `/api/metrics` : JSON snapshot for the dashboard

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use ecompulse_core::ApiMetrics;

use crate::app_state::AppState;
use crate::obs::metrics::CONTENT_TYPE;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "EcomPulse Backend API",
        "endpoints": {
            "metrics": "/metrics (Prometheus format)",
            "api": "/api/metrics (JSON format)",
            "health": "/health",
        },
    }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.store().render_exposition() {
        Ok(body) => (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, code = e.client_code().as_str(), "render metrics failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render metrics").into_response()
        }
    }
}

pub async fn api_metrics(State(state): State<AppState>) -> Response {
    let body = state
        .store()
        .snapshot()
        .and_then(|snap| ApiMetrics::from(&snap).to_json());

    match body {
        Ok(v) => (StatusCode::OK, Json(v)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, code = e.client_code().as_str(), "fetch metrics failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch metrics" })),
            )
                .into_response()
        }
    }
}
