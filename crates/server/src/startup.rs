use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::{AppConfig, SheetsBackend, SheetsConfig};
use service::sheet::SheetStore;
use service::storage::{GoogleSheets, JsonSheetFile, SheetBackend as SheetBackendTrait};

use crate::routes::{self, ServerState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn build_backend(cfg: &SheetsConfig) -> Arc<dyn SheetBackendTrait> {
    match cfg.backend {
        SheetsBackend::File => Arc::new(JsonSheetFile::new(cfg.data_file.clone())),
        SheetsBackend::Google => {
            Arc::new(GoogleSheets::new(cfg.spreadsheet_id.clone(), cfg.credentials_file.clone()))
        }
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_and_validate()?;

    if cfg.sheets.backend == SheetsBackend::File {
        if let Some(parent) = Path::new(&cfg.sheets.data_file).parent() {
            if !parent.as_os_str().is_empty() {
                common::env::ensure_data_dir(&parent.to_string_lossy()).await?;
            }
        }
    }

    // The backing store stays untouched until the first request: the
    // store connects and bootstraps its tabs lazily.
    let store = SheetStore::new(build_backend(&cfg.sheets));
    let state = ServerState { store };

    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, backend = ?cfg.sheets.backend, "starting kitchen-ops server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
