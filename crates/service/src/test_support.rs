use std::sync::Arc;

use crate::sheet::SheetStore;
use crate::storage::json_sheet::JsonSheetFile;

/// Fresh store over an isolated temp-file backend.
pub fn temp_store() -> Arc<SheetStore> {
    let path = std::env::temp_dir().join(format!("kitchen_sheets_{}.json", uuid::Uuid::new_v4()));
    SheetStore::new(Arc::new(JsonSheetFile::new(path)))
}
