use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    BoxError, Extension, Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    app_module::AppState, error::GenerateError,
    generation::generation_controller::generation_router, health::health_controller,
    history::history_controller::history_router,
};

pub fn application_router() -> Router {
    Router::new()
        .route("/v1/health", get(health_controller::health))
        .nest("/api/generate", generation_router())
        .nest("/api/history", history_router())
}

pub fn application(state: AppState, request_timeout: Duration) -> Router {
    Router::new().merge(application_router()).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(move |error: BoxError| async move {
                handle_layer_error(error, request_timeout)
            }))
            .timeout(request_timeout)
            .layer(TraceLayer::new_for_http())
            .layer(Extension(state))
            .layer(
                CorsLayer::new()
                    .allow_origin(tower_http::cors::Any)
                    .allow_methods(tower_http::cors::Any)
                    .allow_headers(tower_http::cors::Any),
            )
            .into_inner(),
    )
}

/// The only slow work behind the router is the model call, so an elapsed
/// request is reported like any other upstream failure.
fn handle_layer_error(error: BoxError, request_timeout: Duration) -> Response {
    if error.is::<tower::timeout::error::Elapsed>() {
        GenerateError::Upstream(anyhow::anyhow!(
            "request exceeded the {}s timeout",
            request_timeout.as_secs_f32()
        ))
        .into_response()
    } else {
        tracing::error!("Unhandled internal error: {}", error);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Unhandled internal error." })),
        )
            .into_response()
    }
}
