use models::cell;
use models::checkin::{self, Model, NewMealCheckIn};

use super::SheetStore;
use crate::errors::ServiceError;

pub async fn list_checkins(store: &SheetStore) -> Result<Vec<Model>, ServiceError> {
    let mut checkins = Vec::new();
    for rec in store.records(checkin::TAB).await? {
        if cell::text(&rec, "ID").trim().is_empty() {
            continue;
        }
        checkins.push(Model::from_record(&rec)?);
    }
    Ok(checkins)
}

/// Register a meal check-in. The employee and dish references are
/// resolved against the current tabs before anything is written; their
/// names are copied into the new row as a one-time snapshot, not a live
/// join, so later renames leave past check-ins untouched.
pub async fn create_checkin(store: &SheetStore, input: NewMealCheckIn) -> Result<Model, ServiceError> {
    let employees = super::employees::list_employees(store).await?;
    let dishes = super::dishes::list_dishes(store).await?;

    let employee = employees
        .into_iter()
        .find(|e| e.id == input.employee_id)
        .ok_or_else(|| ServiceError::not_found("employee", input.employee_id))?;
    let dish = dishes
        .into_iter()
        .find(|d| d.id == input.dish_id)
        .ok_or_else(|| ServiceError::not_found("dish", input.dish_id))?;

    let id = store.next_id(checkin::TAB).await?;
    let c = Model {
        id,
        employee_id: employee.id,
        employee_name: employee.name,
        dish_id: dish.id,
        dish_name: dish.name,
        date: input.date,
        time: input.time,
        created_at: SheetStore::timestamp(),
    };
    store.append(checkin::TAB, &c.to_row()).await?;
    Ok(c)
}

/// Check-ins whose date cell equals `date` exactly.
pub async fn list_by_date(store: &SheetStore, date: &str) -> Result<Vec<Model>, ServiceError> {
    Ok(list_checkins(store)
        .await?
        .into_iter()
        .filter(|c| c.date == date)
        .collect())
}

/// Per-id lookup. Not on the HTTP surface, but the mapping supports it.
pub async fn find_checkin(store: &SheetStore, id: i64) -> Result<Option<Model>, ServiceError> {
    Ok(list_checkins(store).await?.into_iter().find(|c| c.id == id))
}
