use std::sync::Arc;

use crate::config::Config;
use crate::repository::Repositories;
use crate::storage::ObjectStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    /// Resume and logo uploads. S3 in production.
    pub storage: Arc<dyn ObjectStore>,
    pub config: Config,
}
