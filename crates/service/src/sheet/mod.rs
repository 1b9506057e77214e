//! The record-mapping layer between typed models and sheet tabs.
//!
//! `SheetStore` owns the backing connection and the per-tab plumbing
//! every entity shares: lazy first-use initialization, header bootstrap,
//! sequential id allocation and row lookup by id. The per-entity
//! operations live in the submodules.

pub mod inventory;
pub mod employees;
pub mod dishes;
pub mod checkins;

use std::sync::Arc;

use chrono::Local;
use tokio::sync::OnceCell;
use tracing::info;

use models::Record;

use crate::errors::ServiceError;
use crate::storage::SheetBackend;

/// Every tab the store manages, with its fixed header row.
fn schema() -> [(&'static str, &'static [&'static str]); 4] {
    [
        (models::inventory::TAB, &models::inventory::HEADERS),
        (models::employee::TAB, &models::employee::HEADERS),
        (models::dish::TAB, &models::dish::HEADERS),
        (models::checkin::TAB, &models::checkin::HEADERS),
    ]
}

pub struct SheetStore {
    backend: Arc<dyn SheetBackend>,
    ready: OnceCell<()>,
}

impl SheetStore {
    /// Cheap constructor; nothing touches the backing store until the
    /// first operation runs.
    pub fn new(backend: Arc<dyn SheetBackend>) -> Arc<Self> {
        Arc::new(Self { backend, ready: OnceCell::new() })
    }

    /// Connect and make sure every tab exists with its exact header row.
    /// Idempotent and guarded: runs once per store however many callers
    /// arrive first.
    pub async fn setup(&self) -> Result<(), ServiceError> {
        self.ready
            .get_or_try_init(|| async {
                self.backend.connect().await?;
                self.ensure_tabs().await?;
                info!("sheet store ready");
                Ok(())
            })
            .await
            .map(|_| ())
    }

    async fn ensure_tabs(&self) -> Result<(), ServiceError> {
        let existing = self.backend.tab_titles().await?;
        for (tab, headers) in schema() {
            if !existing.iter().any(|t| t == tab) {
                self.backend.add_tab(tab, headers.len()).await?;
            }
            let rows = self.backend.read_rows(tab).await?;
            if rows.is_empty() {
                let header_row: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
                self.backend.append_row(tab, &header_row).await?;
            }
        }
        Ok(())
    }

    pub(crate) fn timestamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// All data rows of a tab keyed by the header row, in sheet order.
    /// Blank separator rows come through with an empty ID cell; callers
    /// skip those.
    pub(crate) async fn records(&self, tab: &str) -> Result<Vec<Record>, ServiceError> {
        self.setup().await?;
        let mut rows = self.backend.read_rows(tab).await?.into_iter();
        let headers = match rows.next() {
            Some(h) => h,
            None => return Ok(Vec::new()),
        };
        Ok(rows
            .map(|row| headers.iter().cloned().zip(row).collect())
            .collect())
    }

    /// Next id for a tab: max existing + 1, or 1 for an empty tab.
    ///
    /// Full scan on every create, and no locking across callers: two
    /// concurrent creates can observe the same max and produce duplicate
    /// ids. Accepted weakness of a spreadsheet as a database.
    pub(crate) async fn next_id(&self, tab: &str) -> Result<i64, ServiceError> {
        let mut max = 0;
        for rec in self.records(tab).await? {
            let raw = models::cell::text(&rec, "ID");
            if raw.trim().is_empty() {
                continue;
            }
            max = max.max(models::cell::parse_int("ID", &raw)?);
        }
        Ok(max + 1)
    }

    /// 1-based sheet row whose ID cell equals `id` (row 1 is the header).
    /// Linear scan, first match wins; ids are expected to be unique.
    pub(crate) async fn find_row(&self, tab: &str, id: i64) -> Result<Option<usize>, ServiceError> {
        self.setup().await?;
        let rows = self.backend.read_rows(tab).await?;
        let want = id.to_string();
        for (idx, row) in rows.iter().enumerate().skip(1) {
            if row.first().map(|c| c.trim() == want).unwrap_or(false) {
                return Ok(Some(idx + 1));
            }
        }
        Ok(None)
    }

    pub(crate) async fn append(&self, tab: &str, row: &[String]) -> Result<(), ServiceError> {
        self.setup().await?;
        self.backend.append_row(tab, row).await
    }

    pub(crate) async fn write_cell(&self, tab: &str, row: usize, col: usize, value: &str) -> Result<(), ServiceError> {
        self.setup().await?;
        self.backend.write_cell(tab, row, col, value).await
    }

    pub(crate) async fn read_row(&self, tab: &str, row: usize) -> Result<Vec<String>, ServiceError> {
        self.setup().await?;
        self.backend.read_row(tab, row).await
    }

    pub(crate) async fn delete_row(&self, tab: &str, row: usize) -> Result<(), ServiceError> {
        self.setup().await?;
        self.backend.delete_row(tab, row).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_store;

    #[tokio::test]
    async fn setup_bootstraps_all_tabs_with_headers() -> Result<(), anyhow::Error> {
        let store = temp_store();
        store.setup().await?;

        let mut titles = store.backend.tab_titles().await?;
        titles.sort();
        assert_eq!(titles, vec!["CheckIns", "Dishes", "Employees", "Inventory"]);

        let rows = store.backend.read_rows(models::inventory::TAB).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], models::inventory::HEADERS.map(String::from).to_vec());

        // second setup is a no-op, headers are not duplicated
        store.setup().await?;
        assert_eq!(store.backend.read_rows(models::inventory::TAB).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn blank_rows_are_skipped_by_scans() -> Result<(), anyhow::Error> {
        let store = temp_store();
        store.setup().await?;

        let tab = models::inventory::TAB;
        store
            .backend
            .append_row(tab, &["1".to_string(), "Rice".into(), "50".into(), "kg".into(), "Grains".into(), String::new(), String::new()])
            .await?;
        // blank separator row
        store.backend.append_row(tab, &vec![String::new(); 7]).await?;
        store
            .backend
            .append_row(tab, &["4".to_string(), "Beans".into(), "20".into(), "kg".into(), "Grains".into(), String::new(), String::new()])
            .await?;

        assert_eq!(store.next_id(tab).await?, 5);
        assert_eq!(inventory::list_items(&store).await?.len(), 2);

        // the blank row never matches an id lookup
        assert_eq!(store.find_row(tab, 4).await?, Some(4));
        assert_eq!(store.find_row(tab, 99).await?, None);
        Ok(())
    }
}
