use std::{collections::HashMap, path::PathBuf};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};

use super::SheetBackend;
use crate::errors::ServiceError;

type Tabs = HashMap<String, Vec<Vec<String>>>;

/// JSON file-backed spreadsheet stand-in.
///
/// Keeps each tab as a list of rows (header row included) in one JSON
/// file and rewrites the whole file after every mutation. Intended for
/// small row counts where a hosted spreadsheet service is overkill, and
/// for tests.
pub struct JsonSheetFile {
    file_path: PathBuf,
    tabs: RwLock<Tabs>,
}

impl JsonSheetFile {
    /// Cheap constructor; no file access until `connect`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), tabs: RwLock::new(Tabs::new()) }
    }

    async fn save(&self) -> Result<(), ServiceError> {
        let tabs = self.tabs.read().await;
        let data = serde_json::to_vec(&*tabs).map_err(|e| ServiceError::Connection(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Connection(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SheetBackend for JsonSheetFile {
    /// Load the file, creating it with an empty tab map if missing.
    async fn connect(&self) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }
        let tabs: Tabs = match fs::read(&self.file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Connection(format!("corrupt sheet file: {e}")))?,
            Err(_) => {
                let empty = Tabs::new();
                let data =
                    serde_json::to_vec(&empty).map_err(|e| ServiceError::Connection(e.to_string()))?;
                fs::write(&self.file_path, data)
                    .await
                    .map_err(|e| ServiceError::Connection(e.to_string()))?;
                empty
            }
        };
        *self.tabs.write().await = tabs;
        Ok(())
    }

    async fn tab_titles(&self) -> Result<Vec<String>, ServiceError> {
        let tabs = self.tabs.read().await;
        Ok(tabs.keys().cloned().collect())
    }

    async fn add_tab(&self, title: &str, _cols: usize) -> Result<(), ServiceError> {
        let mut tabs = self.tabs.write().await;
        tabs.entry(title.to_string()).or_default();
        drop(tabs);
        self.save().await
    }

    async fn read_rows(&self, tab: &str) -> Result<Vec<Vec<String>>, ServiceError> {
        let tabs = self.tabs.read().await;
        tabs.get(tab)
            .cloned()
            .ok_or_else(|| ServiceError::Connection(format!("no such tab: {tab}")))
    }

    async fn read_row(&self, tab: &str, row: usize) -> Result<Vec<String>, ServiceError> {
        let rows = self.read_rows(tab).await?;
        Ok(row
            .checked_sub(1)
            .and_then(|idx| rows.get(idx))
            .cloned()
            .unwrap_or_default())
    }

    async fn append_row(&self, tab: &str, row: &[String]) -> Result<(), ServiceError> {
        let mut tabs = self.tabs.write().await;
        let rows = tabs
            .get_mut(tab)
            .ok_or_else(|| ServiceError::Connection(format!("no such tab: {tab}")))?;
        rows.push(row.to_vec());
        drop(tabs);
        self.save().await
    }

    async fn write_cell(&self, tab: &str, row: usize, col: usize, value: &str) -> Result<(), ServiceError> {
        let mut tabs = self.tabs.write().await;
        let rows = tabs
            .get_mut(tab)
            .ok_or_else(|| ServiceError::Connection(format!("no such tab: {tab}")))?;
        let cells = row
            .checked_sub(1)
            .and_then(|idx| rows.get_mut(idx))
            .ok_or_else(|| ServiceError::Connection(format!("row {row} out of range in {tab}")))?;
        if col == 0 {
            return Err(ServiceError::Connection("column index is 1-based".into()));
        }
        while cells.len() < col {
            cells.push(String::new());
        }
        cells[col - 1] = value.to_string();
        drop(tabs);
        self.save().await
    }

    async fn delete_row(&self, tab: &str, row: usize) -> Result<(), ServiceError> {
        let mut tabs = self.tabs.write().await;
        let rows = tabs
            .get_mut(tab)
            .ok_or_else(|| ServiceError::Connection(format!("no such tab: {tab}")))?;
        let idx = row
            .checked_sub(1)
            .filter(|idx| *idx < rows.len())
            .ok_or_else(|| ServiceError::Connection(format!("row {row} out of range in {tab}")))?;
        rows.remove(idx);
        drop(tabs);
        self.save().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn tab_crud_persists_across_reload() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_sheet_{}.json", uuid::Uuid::new_v4()));
        let store = JsonSheetFile::new(&tmp);
        store.connect().await?;

        // initially empty
        assert!(store.tab_titles().await?.is_empty());

        store.add_tab("Inventory", 7).await?;
        store.append_row("Inventory", &row(&["ID", "Name"])).await?;
        store.append_row("Inventory", &row(&["1", "Rice"])).await?;
        store.append_row("Inventory", &row(&["2", "Beans"])).await?;
        assert_eq!(store.read_rows("Inventory").await?.len(), 3);

        // cell write grows short rows as needed
        store.write_cell("Inventory", 2, 3, "50").await?;
        assert_eq!(store.read_row("Inventory", 2).await?, row(&["1", "Rice", "50"]));

        // deleting a row shifts the ones below up
        store.delete_row("Inventory", 2).await?;
        assert_eq!(store.read_row("Inventory", 2).await?, row(&["2", "Beans"]));

        // reload from disk to ensure persistence
        let reloaded = JsonSheetFile::new(&tmp);
        reloaded.connect().await?;
        assert_eq!(reloaded.read_rows("Inventory").await?.len(), 2);
        assert_eq!(reloaded.read_row("Inventory", 2).await?, row(&["2", "Beans"]));

        // unknown tabs are a backend error
        assert!(reloaded.read_rows("Missing").await.is_err());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
