//! HTTP surface of the mock, built on axum.
//!
//! | Route | Auth | Description |
//! |-------|------|-------------|
//! | `GET /dados-consignacoes-empregador` | `apikey` | Employer inquiry |
//! | `POST /update-mock?mode=replace\|append` | `apikey` | Replace or extend the dataset |
//! | `GET /health` | none | Liveness |
//!
//! Every other path, and a known path called with another method, answers
//! 404 with the `ROUTE_001` envelope. Guarded paths check `apikey` first.

use std::sync::Arc;

use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use tokio::sync::RwLock;

use crate::core::{Clock, MockStore};

mod auth;
mod config;
mod request_log;
mod response;
mod routes;

pub use config::{DEFAULT_API_KEY, DEFAULT_MOCK_DATA_PATH, DEFAULT_PORT, ServerConfig};
pub use routes::UpdateSummary;

/// Shared handler state.
///
/// The store lock only serializes access; concurrent updates still race
/// and the last writer wins.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<MockStore>>,
    pub clock: Arc<dyn Clock>,
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(store: MockStore, clock: impl Clock + 'static, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            clock: Arc::new(clock),
            api_key: api_key.into(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/dados-consignacoes-empregador",
            get(routes::inquiry_handler).fallback(routes::not_found_handler),
        )
        .route(
            "/update-mock",
            post(routes::update_mock_handler).fallback(routes::not_found_handler),
        )
        .route_layer(from_fn_with_state(state.clone(), auth::require_api_key))
        .route(
            "/health",
            get(routes::health_handler).fallback(routes::not_found_handler),
        )
        .fallback(routes::not_found_handler)
        .layer(from_fn(request_log::request_log_middleware))
        .with_state(state)
}
