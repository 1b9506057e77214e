use models::cell;
use models::dish::{self, DailyDishPatch, Model, NewDailyDish};

use super::SheetStore;
use crate::errors::ServiceError;

pub async fn list_dishes(store: &SheetStore) -> Result<Vec<Model>, ServiceError> {
    let mut dishes = Vec::new();
    for rec in store.records(dish::TAB).await? {
        if cell::text(&rec, "ID").trim().is_empty() {
            continue;
        }
        dishes.push(Model::from_record(&rec)?);
    }
    Ok(dishes)
}

pub async fn create_dish(store: &SheetStore, input: NewDailyDish) -> Result<Model, ServiceError> {
    let id = store.next_id(dish::TAB).await?;
    let now = SheetStore::timestamp();
    let d = Model {
        id,
        name: input.name,
        description: input.description,
        date: input.date,
        active: input.active,
        created_at: now.clone(),
        updated_at: now,
    };
    store.append(dish::TAB, &d.to_row()).await?;
    Ok(d)
}

pub async fn update_dish(store: &SheetStore, id: i64, patch: DailyDishPatch) -> Result<Model, ServiceError> {
    let row = store
        .find_row(dish::TAB, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("dish", id))?;

    if let Some(name) = &patch.name {
        store.write_cell(dish::TAB, row, dish::COL_NAME, name).await?;
    }
    if let Some(description) = &patch.description {
        store.write_cell(dish::TAB, row, dish::COL_DESCRIPTION, description).await?;
    }
    if let Some(date) = &patch.date {
        store.write_cell(dish::TAB, row, dish::COL_DATE, date).await?;
    }
    if let Some(active) = patch.active {
        store.write_cell(dish::TAB, row, dish::COL_ACTIVE, cell::format_bool(active)).await?;
    }
    store
        .write_cell(dish::TAB, row, dish::COL_UPDATED_AT, &SheetStore::timestamp())
        .await?;

    let cells = store.read_row(dish::TAB, row).await?;
    Ok(Model::from_row(&cells)?)
}

pub async fn delete_dish(store: &SheetStore, id: i64) -> Result<(), ServiceError> {
    let row = store
        .find_row(dish::TAB, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("dish", id))?;
    store.delete_row(dish::TAB, row).await
}
