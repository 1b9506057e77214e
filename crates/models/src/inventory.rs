use serde::{Deserialize, Serialize};

use crate::cell;
use crate::errors::ModelError;
use crate::Record;

pub const TAB: &str = "Inventory";
pub const HEADERS: [&str; 7] = ["ID", "Name", "Quantity", "Unit", "Category", "CreatedAt", "UpdatedAt"];

// 1-based column positions for partial-update cell writes.
pub const COL_NAME: usize = 2;
pub const COL_QUANTITY: usize = 3;
pub const COL_UNIT: usize = 4;
pub const COL_CATEGORY: usize = 5;
pub const COL_UPDATED_AT: usize = 7;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub category: String,
}

/// Partial update; `None` fields keep their current cell values.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InventoryItemPatch {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub category: Option<String>,
}

impl Model {
    pub fn from_record(rec: &Record) -> Result<Self, ModelError> {
        Ok(Self {
            id: cell::int(rec, "ID")?,
            name: cell::text(rec, "Name"),
            quantity: cell::int(rec, "Quantity")?,
            unit: cell::text(rec, "Unit"),
            category: cell::text(rec, "Category"),
            created_at: cell::text(rec, "CreatedAt"),
            updated_at: cell::text(rec, "UpdatedAt"),
        })
    }

    pub fn from_row(row: &[String]) -> Result<Self, ModelError> {
        Ok(Self {
            id: cell::parse_int("ID", &cell::at(row, 0))?,
            name: cell::at(row, 1),
            quantity: cell::parse_int("Quantity", &cell::at(row, 2))?,
            unit: cell::at(row, 3),
            category: cell::at(row, 4),
            created_at: cell::at(row, 5),
            updated_at: cell::at(row, 6),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.quantity.to_string(),
            self.unit.clone(),
            self.category.clone(),
            self.created_at.clone(),
            self.updated_at.clone(),
        ]
    }
}
