//! Axum router wiring.
//!
//! Layers, inner to outer: request instrumentation (when metrics are enabled),
//! request tracing, panic-to-500 conversion.

use axum::{middleware, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{app_state::AppState, obs, ops};

/// Application routes without any middleware.
pub fn routes(state: &AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(ops::root))
        .route("/health", get(ops::health));

    if state.http_metrics().is_some() {
        router.route("/metrics", get(ops::metrics))
    } else {
        router
    }
}

/// Wrap every route registered on `router` with the server middleware stack.
pub fn instrument(router: Router, state: &AppState) -> Router {
    let router = match state.http_metrics() {
        Some(m) => router.layer(middleware::from_fn_with_state(
            m.clone(),
            obs::track_requests,
        )),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}

pub fn build_router(state: AppState) -> Router {
    let app = routes(&state).with_state(state.clone());
    instrument(app, &state)
}
