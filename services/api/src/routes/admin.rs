//! Admin handlers mounted under `/api/admin`

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_extra::extract::WithRejection;
use serde_json::json;
use uuid::Uuid;

use crate::{
    domain::{employee, leave, project, report, salary, task},
    error::{ApiError, ApiResult},
    models::{
        ApiResponse, IssueSalaryRequest, LeaveDecisionRequest, NewProjectRequest, NewTaskRequest,
        UpdateEmployeeRequest, UpdateSalaryRequest,
    },
    state::AppState,
};

type IdPath = WithRejection<Path<Uuid>, ApiError>;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees))
        .route("/employees/:id", get(get_employee).put(update_employee))
        .route("/employees/:id/progress", get(employee_progress))
        .route("/employees/:id/salary-history", get(salary_history))
        .route("/leaves", get(list_leaves))
        .route("/leaves/:id", put(decide_leave))
        .route("/salary", get(list_salaries).post(issue_salary))
        .route("/salary/:id", put(update_salary).delete(delete_salary))
        .route("/projects", get(list_projects).post(create_project))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/dashboard", get(dashboard))
}

pub async fn list_employees(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let employees = employee::list_employees(state.store.as_ref()).await?;
    Ok(Json(ApiResponse::list(employees)))
}

pub async fn get_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> ApiResult<impl IntoResponse> {
    let user = employee::get_employee(state.store.as_ref(), id).await?;
    Ok(Json(ApiResponse::data(user)))
}

pub async fn update_employee(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateEmployeeRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let user = employee::update_employee(state.store.as_ref(), id, payload).await?;
    Ok(Json(ApiResponse::data(user)))
}

pub async fn employee_progress(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> ApiResult<impl IntoResponse> {
    let progress = report::employee_progress(state.store.as_ref(), id).await?;
    Ok(Json(ApiResponse::data(progress)))
}

pub async fn salary_history(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> ApiResult<impl IntoResponse> {
    let history = salary::salary_history(state.store.as_ref(), id).await?;
    Ok(Json(ApiResponse::list(history)))
}

pub async fn list_leaves(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let leaves = leave::list_leaves(state.store.as_ref()).await?;
    Ok(Json(ApiResponse::list(leaves)))
}

/// Approve or reject a leave request
pub async fn decide_leave(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(payload), _): WithRejection<Json<LeaveDecisionRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let leave = leave::decide_leave(state.store.as_ref(), &state.policy, id, payload).await?;
    Ok(Json(ApiResponse::data(leave)))
}

pub async fn list_salaries(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let salaries = salary::list_salaries(state.store.as_ref()).await?;
    Ok(Json(ApiResponse::list(salaries)))
}

pub async fn issue_salary(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<IssueSalaryRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let record = salary::issue_salary(state.store.as_ref(), &state.policy, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(record))))
}

pub async fn update_salary(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateSalaryRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let record = salary::update_salary(state.store.as_ref(), &state.policy, id, payload).await?;
    Ok(Json(ApiResponse::data(record)))
}

pub async fn delete_salary(
    State(state): State<AppState>,
    WithRejection(Path(id), _): IdPath,
) -> ApiResult<impl IntoResponse> {
    salary::delete_salary(state.store.as_ref(), id).await?;
    Ok(Json(ApiResponse::data(json!({}))))
}

pub async fn list_projects(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let projects = project::list_projects(state.store.as_ref()).await?;
    Ok(Json(ApiResponse::list(projects)))
}

pub async fn create_project(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<NewProjectRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let project = project::create_project(state.store.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(project))))
}

pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let tasks = task::list_tasks(state.store.as_ref()).await?;
    Ok(Json(ApiResponse::list(tasks)))
}

pub async fn create_task(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<NewTaskRequest>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let task = task::create_task(state.store.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(task))))
}

pub async fn dashboard(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let stats = report::dashboard_stats(state.store.as_ref()).await?;
    Ok(Json(ApiResponse::data(stats)))
}
