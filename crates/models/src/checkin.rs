use serde::{Deserialize, Serialize};

use crate::cell;
use crate::errors::ModelError;
use crate::Record;

pub const TAB: &str = "CheckIns";
pub const HEADERS: [&str; 8] = [
    "ID",
    "EmployeeID",
    "EmployeeName",
    "DishID",
    "DishName",
    "Date",
    "Time",
    "CreatedAt",
];

/// A meal check-in. Immutable once written: there is no UpdatedAt column
/// and no update path. The employee/dish names are denormalized copies
/// captured at creation time and are not re-synced after renames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub dish_id: i64,
    pub dish_name: String,
    pub date: String,
    pub time: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewMealCheckIn {
    pub employee_id: i64,
    pub dish_id: i64,
    pub date: String,
    pub time: String,
}

impl Model {
    pub fn from_record(rec: &Record) -> Result<Self, ModelError> {
        Ok(Self {
            id: cell::int(rec, "ID")?,
            employee_id: cell::int(rec, "EmployeeID")?,
            employee_name: cell::text(rec, "EmployeeName"),
            dish_id: cell::int(rec, "DishID")?,
            dish_name: cell::text(rec, "DishName"),
            date: cell::text(rec, "Date"),
            time: cell::text(rec, "Time"),
            created_at: cell::text(rec, "CreatedAt"),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.employee_id.to_string(),
            self.employee_name.clone(),
            self.dish_id.to_string(),
            self.dish_name.clone(),
            self.date.clone(),
            self.time.clone(),
            self.created_at.clone(),
        ]
    }
}
