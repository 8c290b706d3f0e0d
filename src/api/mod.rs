pub mod business;
pub mod headline;
pub mod models;

// Re-exports
pub use models::*;

use axum::{Json, Router, extract::State, response::Response, routing::get};
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::error;

// Health handler (simple, keep here)
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        headlines: state.generator.headlines().len(),
    })
}

/// Full router with all endpoints and middleware
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(business::routes())
        .merge(headline::routes())
        .with_state(state);

    with_middleware(router)
}

/// Panic catching, permissive CORS and request tracing.
/// CORS sits outside the panic layer so 500s still carry CORS headers.
pub fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    error!(detail, "Request handler panicked");
    internal_error_response()
}
