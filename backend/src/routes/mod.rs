//! Route definitions for the horoscope API
//!
//! This module organizes all API routes and applies middleware.

use crate::auth::rate_limit_middleware;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    error_handling::HandleErrorLayer,
    http::{header, Method},
    middleware,
    routing::get,
    BoxError, Router,
};
use std::time::Duration;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

mod auth;
mod health;
mod horoscope;


pub use auth::auth_routes;
pub use horoscope::horoscope_routes;

/// Upper bound on handling time for any request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api", api_routes(state.clone()))
        .fallback(not_found)
        .layer(CompressionLayer::new());

    with_timeout(router, REQUEST_TIMEOUT)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes, all subject to per-client rate limiting
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::auth_routes(state.clone()))
        .nest("/horoscope", horoscope::horoscope_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}

/// Abort requests running longer than `limit` with a JSON 408
fn with_timeout<S>(router: Router<S>, limit: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(limit)),
    )
}

async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Internal(anyhow::anyhow!("Unhandled middleware error: {}", err))
    }
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
