use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::middleware::{make_span_with_request_id, RequestUuid, REQUEST_ID_HEADER};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
///
/// The extension calls the API cross-origin, so CORS allows any origin for
/// GET/POST with a content-type header.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/message", post(handlers::process_message))
        .route("/history/:user_session_id", get(handlers::get_history))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, RequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
                .layer(cors),
        )
        .with_state(state)
}
