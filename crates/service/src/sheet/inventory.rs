use models::cell;
use models::inventory::{self, InventoryItemPatch, Model, NewInventoryItem};

use super::SheetStore;
use crate::errors::ServiceError;

/// All inventory items, in sheet row order.
pub async fn list_items(store: &SheetStore) -> Result<Vec<Model>, ServiceError> {
    let mut items = Vec::new();
    for rec in store.records(inventory::TAB).await? {
        if cell::text(&rec, "ID").trim().is_empty() {
            continue;
        }
        items.push(Model::from_record(&rec)?);
    }
    Ok(items)
}

pub async fn create_item(store: &SheetStore, input: NewInventoryItem) -> Result<Model, ServiceError> {
    let id = store.next_id(inventory::TAB).await?;
    let now = SheetStore::timestamp();
    let item = Model {
        id,
        name: input.name,
        quantity: input.quantity,
        unit: input.unit,
        category: input.category,
        created_at: now.clone(),
        updated_at: now,
    };
    store.append(inventory::TAB, &item.to_row()).await?;
    Ok(item)
}

/// Overwrite the cells named in the patch, refresh UpdatedAt, and return
/// the record re-read from its row.
pub async fn update_item(store: &SheetStore, id: i64, patch: InventoryItemPatch) -> Result<Model, ServiceError> {
    let row = store
        .find_row(inventory::TAB, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("inventory item", id))?;

    if let Some(name) = &patch.name {
        store.write_cell(inventory::TAB, row, inventory::COL_NAME, name).await?;
    }
    if let Some(quantity) = patch.quantity {
        store.write_cell(inventory::TAB, row, inventory::COL_QUANTITY, &quantity.to_string()).await?;
    }
    if let Some(unit) = &patch.unit {
        store.write_cell(inventory::TAB, row, inventory::COL_UNIT, unit).await?;
    }
    if let Some(category) = &patch.category {
        store.write_cell(inventory::TAB, row, inventory::COL_CATEGORY, category).await?;
    }
    store
        .write_cell(inventory::TAB, row, inventory::COL_UPDATED_AT, &SheetStore::timestamp())
        .await?;

    let cells = store.read_row(inventory::TAB, row).await?;
    Ok(Model::from_row(&cells)?)
}

pub async fn delete_item(store: &SheetStore, id: i64) -> Result<(), ServiceError> {
    let row = store
        .find_row(inventory::TAB, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("inventory item", id))?;
    store.delete_row(inventory::TAB, row).await
}
