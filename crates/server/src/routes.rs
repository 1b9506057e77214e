use std::sync::Arc;

use axum::{
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::sheet::SheetStore;

pub mod inventory;
pub mod employees;
pub mod dishes;
pub mod checkins;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<SheetStore>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/inventory", get(inventory::list).post(inventory::create))
        .route("/api/inventory/:id", put(inventory::update).delete(inventory::remove))
        .route("/api/employees", get(employees::list).post(employees::create))
        .route("/api/employees/:id", put(employees::update).delete(employees::remove))
        .route("/api/dishes", get(dishes::list).post(dishes::create))
        .route("/api/dishes/:id", put(dishes::update).delete(dishes::remove))
        .route("/api/checkins", get(checkins::list).post(checkins::create))
        .route("/api/checkins/today", get(checkins::today))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
