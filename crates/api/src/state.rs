use std::sync::Arc;

use harmonia_core::cache::SnapshotCache;

use crate::config::ServerConfig;
use crate::notifications::Notifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: harmonia_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Read-through snapshot cache backing the preview fallback path.
    pub cache: Arc<SnapshotCache>,
    /// Outbound notification queue.
    pub notifier: Notifier,
}
