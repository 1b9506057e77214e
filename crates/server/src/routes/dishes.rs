use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use models::dish::{DailyDishPatch, Model, NewDailyDish};
use service::sheet::dishes;

use crate::errors::ApiError;
use crate::routes::ServerState;

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Model>>, ApiError> {
    let dishes = dishes::list_dishes(&state.store).await?;
    Ok(Json(dishes))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<NewDailyDish>,
) -> Result<Json<Model>, ApiError> {
    let dish = dishes::create_dish(&state.store, input).await?;
    info!(id = dish.id, "dish created");
    Ok(Json(dish))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(patch): Json<DailyDishPatch>,
) -> Result<Json<Model>, ApiError> {
    let dish = dishes::update_dish(&state.store, id, patch).await?;
    Ok(Json(dish))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    dishes::delete_dish(&state.store, id).await?;
    info!(id, "dish removed");
    Ok(Json(serde_json::json!({ "message": "dish removed" })))
}
