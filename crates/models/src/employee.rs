use serde::{Deserialize, Serialize};

use crate::cell;
use crate::errors::ModelError;
use crate::Record;

pub const TAB: &str = "Employees";
pub const HEADERS: [&str; 6] = ["ID", "Name", "Role", "Active", "CreatedAt", "UpdatedAt"];

pub const COL_NAME: usize = 2;
pub const COL_ROLE: usize = 3;
pub const COL_ACTIVE: usize = 4;
pub const COL_UPDATED_AT: usize = 6;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub role: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub active: Option<bool>,
}

impl Model {
    pub fn from_record(rec: &Record) -> Result<Self, ModelError> {
        Ok(Self {
            id: cell::int(rec, "ID")?,
            name: cell::text(rec, "Name"),
            role: cell::text(rec, "Role"),
            active: cell::flag(rec, "Active"),
            created_at: cell::text(rec, "CreatedAt"),
            updated_at: cell::text(rec, "UpdatedAt"),
        })
    }

    pub fn from_row(row: &[String]) -> Result<Self, ModelError> {
        Ok(Self {
            id: cell::parse_int("ID", &cell::at(row, 0))?,
            name: cell::at(row, 1),
            role: cell::at(row, 2),
            active: cell::parse_bool(&cell::at(row, 3)),
            created_at: cell::at(row, 4),
            updated_at: cell::at(row, 5),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.role.clone(),
            cell::format_bool(self.active).to_string(),
            self.created_at.clone(),
            self.updated_at.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_employee_round_trips() {
        let emp = Model {
            id: 3,
            name: "Ana".into(),
            role: "Cook".into(),
            active: false,
            created_at: "2024-05-01 08:00:00".into(),
            updated_at: "2024-05-01 08:00:00".into(),
        };
        let row = emp.to_row();
        assert_eq!(row[3], "False");
        assert_eq!(Model::from_row(&row).unwrap(), emp);
    }

    #[test]
    fn junk_active_cell_reads_as_false() {
        let row = vec![
            "3".to_string(),
            "Ana".into(),
            "Cook".into(),
            "yes".into(),
            String::new(),
            String::new(),
        ];
        assert!(!Model::from_row(&row).unwrap().active);
    }
}
