//! Self-service handlers mounted under `/api/employees`
//!
//! Every handler acts on the authenticated caller; ids in the path only
//! select among the caller's own records.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    domain::{employee, leave, report, salary, task},
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{ApiResponse, NewLeaveRequest, ProfileUpdateRequest, TaskStatusRequest},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/leaves", get(my_leaves).post(request_leave))
        .route("/tasks", get(my_tasks))
        .route("/tasks/:id", put(update_task_status))
        .route("/progress", get(my_progress))
        .route("/salary-history", get(my_salary_history))
}

pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let profile = employee::profile(state.store.as_ref(), user.id).await?;
    Ok(Json(ApiResponse::data(profile)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(payload), _): WithRejection<Json<ProfileUpdateRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let profile = employee::update_profile(state.store.as_ref(), user.id, payload).await?;
    Ok(Json(ApiResponse::data(profile)))
}

pub async fn my_leaves(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let leaves = leave::leaves_for(state.store.as_ref(), user.id).await?;
    Ok(Json(ApiResponse::list(leaves)))
}

pub async fn request_leave(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Json(payload), _): WithRejection<Json<NewLeaveRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let leave = leave::request_leave(state.store.as_ref(), user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(leave))))
}

pub async fn my_tasks(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let tasks = task::tasks_for(state.store.as_ref(), user.id).await?;
    Ok(Json(ApiResponse::list(tasks)))
}

pub async fn update_task_status(
    State(state): State<AppState>,
    user: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<TaskStatusRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let task = task::update_own_task_status(state.store.as_ref(), user.id, id, payload).await?;
    Ok(Json(ApiResponse::data(task)))
}

pub async fn my_progress(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let progress = report::progress_report(state.store.as_ref(), user.id).await?;
    Ok(Json(ApiResponse::data(progress)))
}

pub async fn my_salary_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let history = salary::salary_history(state.store.as_ref(), user.id).await?;
    Ok(Json(ApiResponse::list(history)))
}
