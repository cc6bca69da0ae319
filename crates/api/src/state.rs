use std::sync::Arc;

use mantis_tator::{ProjectDirectory, TatorClient};

use crate::config::ServerConfig;
use crate::jobs::JobRegistry;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.  Cheaply cloneable; the inner data is behind
/// `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Tator REST client.
    pub tator: Arc<TatorClient>,
    /// Re-fetchable project directory snapshot.
    pub directory: Arc<ProjectDirectory>,
    /// Lazily-connecting pool for label-count aggregates.
    pub pool: mantis_db::DbPool,
    /// Registry of deferred bulk-mutation jobs.
    pub jobs: JobRegistry,
}
