use std::sync::Arc;

use crate::config::Config;
use crate::screening::pipeline::ScreeningContext;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stopword policy, scorer backend and summary length. Every request builds its own
    /// vector space from this; nothing per-request is stored here.
    pub screening: Arc<ScreeningContext>,
}

impl AppState {
    pub fn new(config: Config, screening: ScreeningContext) -> Self {
        Self {
            config,
            screening: Arc::new(screening),
        }
    }
}
