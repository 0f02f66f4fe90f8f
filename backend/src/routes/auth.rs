//! Authentication routes
//!
//! Signup and login are public; `/me` requires a bearer token.
//! Password hashing runs on the blocking thread pool inside the service.

use crate::auth::{auth_middleware, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::services::{AccountService, SignupInput};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use horoscope_shared::types::{LoginRequest, LoginResponse, PublicUser, SignupRequest, SignupResponse};

/// Create auth routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(get_profile))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .merge(protected)
}

/// Register a new user
///
/// POST /api/auth/signup
async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    let Json(req) = payload.map_err(ApiError::from)?;

    let user = AccountService::signup(
        state.db(),
        SignupInput {
            name: req.name,
            email: req.email,
            password: req.password,
            birthdate: req.birthdate,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

/// Login with email and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload.map_err(ApiError::from)?;

    let response = AccountService::login(
        state.db(),
        state.jwt(),
        req.email.as_deref(),
        req.password.as_deref(),
    )
    .await?;
    Ok(Json(response))
}

/// Current user profile
///
/// GET /api/auth/me
async fn get_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Json<PublicUser>> {
    let profile = AccountService::profile(state.db(), auth_user.user_id).await?;
    Ok(Json(profile))
}
