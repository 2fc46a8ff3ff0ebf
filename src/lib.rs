pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod views;

use std::sync::Arc;

use store::Store;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: config::AppConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: config::AppConfig) -> Self {
        Self { store, config }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(store::MemoryStore::new()), config::AppConfig::in_memory())
    }
}
