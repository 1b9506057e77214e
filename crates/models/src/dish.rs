use serde::{Deserialize, Serialize};

use crate::cell;
use crate::errors::ModelError;
use crate::Record;

pub const TAB: &str = "Dishes";
pub const HEADERS: [&str; 7] = ["ID", "Name", "Description", "Date", "Active", "CreatedAt", "UpdatedAt"];

pub const COL_NAME: usize = 2;
pub const COL_DESCRIPTION: usize = 3;
pub const COL_DATE: usize = 4;
pub const COL_ACTIVE: usize = 5;
pub const COL_UPDATED_AT: usize = 7;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Calendar date kept as a plain string, exactly as stored.
    pub date: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewDailyDish {
    pub name: String,
    pub description: String,
    pub date: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DailyDishPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub active: Option<bool>,
}

impl Model {
    pub fn from_record(rec: &Record) -> Result<Self, ModelError> {
        Ok(Self {
            id: cell::int(rec, "ID")?,
            name: cell::text(rec, "Name"),
            description: cell::text(rec, "Description"),
            date: cell::text(rec, "Date"),
            active: cell::flag(rec, "Active"),
            created_at: cell::text(rec, "CreatedAt"),
            updated_at: cell::text(rec, "UpdatedAt"),
        })
    }

    pub fn from_row(row: &[String]) -> Result<Self, ModelError> {
        Ok(Self {
            id: cell::parse_int("ID", &cell::at(row, 0))?,
            name: cell::at(row, 1),
            description: cell::at(row, 2),
            date: cell::at(row, 3),
            active: cell::parse_bool(&cell::at(row, 4)),
            created_at: cell::at(row, 5),
            updated_at: cell::at(row, 6),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone(),
            self.date.clone(),
            cell::format_bool(self.active).to_string(),
            self.created_at.clone(),
            self.updated_at.clone(),
        ]
    }
}
