//! Identity of the caller, mounted under `/api/auth`

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};

use crate::{
    domain::employee,
    error::ApiResult,
    middleware::AuthUser,
    models::ApiResponse,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

/// The stored record behind the bearer token
pub async fn me(State(state): State<AppState>, user: AuthUser) -> ApiResult<impl IntoResponse> {
    let record = employee::profile(state.store.as_ref(), user.id).await?;
    Ok(Json(ApiResponse::data(record)))
}
