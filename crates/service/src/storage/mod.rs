//! The tabular backing-store boundary.
//!
//! The mapping layer only ever needs this narrow surface: get-or-create a
//! tab by name, read rows, append a row, write one cell, delete one row.
//! Anything that can answer these calls can stand in for the spreadsheet,
//! which is what keeps the entity logic independent of the backing
//! technology.

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod json_sheet;
pub mod google;

pub use google::GoogleSheets;
pub use json_sheet::JsonSheetFile;

/// Row and column indices are 1-based; row 1 is the header row.
#[async_trait]
pub trait SheetBackend: Send + Sync {
    /// Open the backing store. Called once, lazily, before any tab access.
    async fn connect(&self) -> Result<(), ServiceError>;

    /// Titles of all existing tabs.
    async fn tab_titles(&self) -> Result<Vec<String>, ServiceError>;

    /// Create an empty tab with room for `cols` columns.
    async fn add_tab(&self, title: &str, cols: usize) -> Result<(), ServiceError>;

    /// All rows of a tab, header row included.
    async fn read_rows(&self, tab: &str) -> Result<Vec<Vec<String>>, ServiceError>;

    /// Cells of one row; empty when the row does not exist.
    async fn read_row(&self, tab: &str, row: usize) -> Result<Vec<String>, ServiceError>;

    /// Append one row after the last row of the tab.
    async fn append_row(&self, tab: &str, row: &[String]) -> Result<(), ServiceError>;

    /// Overwrite a single cell.
    async fn write_cell(&self, tab: &str, row: usize, col: usize, value: &str) -> Result<(), ServiceError>;

    /// Remove a row entirely; later rows shift up by one.
    async fn delete_row(&self, tab: &str, row: usize) -> Result<(), ServiceError>;
}
