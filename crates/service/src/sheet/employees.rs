use models::cell;
use models::employee::{self, EmployeePatch, Model, NewEmployee};

use super::SheetStore;
use crate::errors::ServiceError;

pub async fn list_employees(store: &SheetStore) -> Result<Vec<Model>, ServiceError> {
    let mut employees = Vec::new();
    for rec in store.records(employee::TAB).await? {
        if cell::text(&rec, "ID").trim().is_empty() {
            continue;
        }
        employees.push(Model::from_record(&rec)?);
    }
    Ok(employees)
}

pub async fn create_employee(store: &SheetStore, input: NewEmployee) -> Result<Model, ServiceError> {
    let id = store.next_id(employee::TAB).await?;
    let now = SheetStore::timestamp();
    let emp = Model {
        id,
        name: input.name,
        role: input.role,
        active: input.active,
        created_at: now.clone(),
        updated_at: now,
    };
    store.append(employee::TAB, &emp.to_row()).await?;
    Ok(emp)
}

pub async fn update_employee(store: &SheetStore, id: i64, patch: EmployeePatch) -> Result<Model, ServiceError> {
    let row = store
        .find_row(employee::TAB, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("employee", id))?;

    if let Some(name) = &patch.name {
        store.write_cell(employee::TAB, row, employee::COL_NAME, name).await?;
    }
    if let Some(role) = &patch.role {
        store.write_cell(employee::TAB, row, employee::COL_ROLE, role).await?;
    }
    if let Some(active) = patch.active {
        store
            .write_cell(employee::TAB, row, employee::COL_ACTIVE, cell::format_bool(active))
            .await?;
    }
    store
        .write_cell(employee::TAB, row, employee::COL_UPDATED_AT, &SheetStore::timestamp())
        .await?;

    let cells = store.read_row(employee::TAB, row).await?;
    Ok(Model::from_row(&cells)?)
}

pub async fn delete_employee(store: &SheetStore, id: i64) -> Result<(), ServiceError> {
    let row = store
        .find_row(employee::TAB, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("employee", id))?;
    store.delete_row(employee::TAB, row).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_store;

    #[tokio::test]
    async fn boolean_round_trip_through_the_sheet() -> Result<(), anyhow::Error> {
        let store = temp_store();
        let created = create_employee(
            &store,
            NewEmployee { name: "Ana".into(), role: "Cook".into(), active: false },
        )
        .await?;
        assert!(!created.active);

        // stored as the literal "False", read back as boolean false
        let listed = list_employees(&store).await?;
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].active);

        let updated = update_employee(
            &store,
            created.id,
            EmployeePatch { active: Some(true), ..Default::default() },
        )
        .await?;
        assert!(updated.active);
        assert_eq!(updated.name, "Ana");
        Ok(())
    }

    #[tokio::test]
    async fn rename_keeps_other_fields() -> Result<(), anyhow::Error> {
        let store = temp_store();
        let created = create_employee(
            &store,
            NewEmployee { name: "Jo".into(), role: "Baker".into(), active: true },
        )
        .await?;

        let updated = update_employee(
            &store,
            created.id,
            EmployeePatch { name: Some("Joana".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(updated.name, "Joana");
        assert_eq!(updated.role, "Baker");
        assert!(updated.active);
        assert_eq!(updated.created_at, created.created_at);
        Ok(())
    }
}
