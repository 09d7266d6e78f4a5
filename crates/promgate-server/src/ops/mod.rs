//! HTTP endpoints.
//!
//! - `/`        : greeting plus app title/version
//! - `/health`  : liveness
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use promgate_core::TEXT_FORMAT_CONTENT_TYPE;

use crate::app_state::AppState;

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let app = &state.cfg().app;
    Json(json!({
        "message": app.greeting,
        "framework": "axum",
        "title": app.title,
        "version": app.version,
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.registry().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, TEXT_FORMAT_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
