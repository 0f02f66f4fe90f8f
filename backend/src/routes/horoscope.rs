//! Horoscope routes
//!
//! Both endpoints read the caller's id and sign from the verified token.

use crate::auth::{auth_middleware, AuthUser};
use crate::error::ApiResult;
use crate::services::HoroscopeService;
use crate::state::AppState;
use axum::{extract::State, middleware, routing::get, Extension, Json, Router};
use horoscope_shared::types::{DailyHoroscope, HoroscopeHistory};

/// Create horoscope routes
pub fn horoscope_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/today", get(get_today))
        .route("/history", get(get_history))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Today's horoscope, computed and stored on the first call of the day
///
/// GET /api/horoscope/today
async fn get_today(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Json<DailyHoroscope>> {
    let today = HoroscopeService::get_today(
        state.db(),
        state.catalog(),
        auth_user.user_id,
        auth_user.zodiac_sign,
    )
    .await?;
    Ok(Json(today))
}

/// Last seven stored horoscopes, newest first
///
/// GET /api/horoscope/history
async fn get_history(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Json<HoroscopeHistory>> {
    let history = HoroscopeService::get_history(state.db(), auth_user.user_id).await?;
    Ok(Json(HoroscopeHistory { history }))
}
