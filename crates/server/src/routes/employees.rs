use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use models::employee::{EmployeePatch, Model, NewEmployee};
use service::sheet::employees;

use crate::errors::ApiError;
use crate::routes::ServerState;

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Model>>, ApiError> {
    let employees = employees::list_employees(&state.store).await?;
    Ok(Json(employees))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<NewEmployee>,
) -> Result<Json<Model>, ApiError> {
    let emp = employees::create_employee(&state.store, input).await?;
    info!(id = emp.id, "employee created");
    Ok(Json(emp))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(patch): Json<EmployeePatch>,
) -> Result<Json<Model>, ApiError> {
    let emp = employees::update_employee(&state.store, id, patch).await?;
    Ok(Json(emp))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    employees::delete_employee(&state.store, id).await?;
    info!(id, "employee removed");
    Ok(Json(serde_json::json!({ "message": "employee removed" })))
}
