//! Application state shared across handlers.

use std::sync::Arc;

use encore_db::UploadLogStore;
use sqlx::PgPool;

/// Shared state: the upload-log store behind its trait seam (so tests can
/// swap in an in-memory store) and the pool for readiness probes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UploadLogStore>,
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool, store: Arc<dyn UploadLogStore>) -> Self {
        Self { store, pool }
    }
}
