use std::sync::Arc;

use realty_core::listing::MediaUploader;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: realty_db::DbPool,
    /// Server configuration, including booking hours.
    pub config: Arc<ServerConfig>,
    /// Stores listing images during property creation.
    pub media: Arc<dyn MediaUploader>,
}
