use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use models::inventory::{InventoryItemPatch, Model, NewInventoryItem};
use service::sheet::inventory;

use crate::errors::ApiError;
use crate::routes::ServerState;

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Model>>, ApiError> {
    let items = inventory::list_items(&state.store).await?;
    Ok(Json(items))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<NewInventoryItem>,
) -> Result<Json<Model>, ApiError> {
    let item = inventory::create_item(&state.store, input).await?;
    info!(id = item.id, "inventory item created");
    Ok(Json(item))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(patch): Json<InventoryItemPatch>,
) -> Result<Json<Model>, ApiError> {
    let item = inventory::update_item(&state.store, id, patch).await?;
    Ok(Json(item))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    inventory::delete_item(&state.store, id).await?;
    info!(id, "inventory item removed");
    Ok(Json(serde_json::json!({ "message": "inventory item removed" })))
}
