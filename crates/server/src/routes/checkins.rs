use axum::{extract::State, Json};
use chrono::Local;
use tracing::info;

use models::checkin::{Model, NewMealCheckIn};
use service::sheet::checkins;

use crate::errors::ApiError;
use crate::routes::ServerState;

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Model>>, ApiError> {
    let checkins = checkins::list_checkins(&state.store).await?;
    Ok(Json(checkins))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<NewMealCheckIn>,
) -> Result<Json<Model>, ApiError> {
    let checkin = checkins::create_checkin(&state.store, input).await?;
    info!(id = checkin.id, employee = %checkin.employee_name, "meal check-in registered");
    Ok(Json(checkin))
}

/// Check-ins for the current local date.
pub async fn today(State(state): State<ServerState>) -> Result<Json<Vec<Model>>, ApiError> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    let checkins = checkins::list_by_date(&state.store, &today).await?;
    Ok(Json(checkins))
}
