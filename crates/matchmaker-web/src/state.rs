//! Shared application state for the web server.

use std::sync::Arc;

use matchmaker_common::DataSource;
use matchmaker_config::Config;
use matchmaker_ranker::RankingMode;

/// Shared state injected into every Axum handler. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DataSource>,
    pub config: Config,
}

impl AppState {
    pub fn new(source: Arc<dyn DataSource>, config: Config) -> Self {
        Self { source, config }
    }

    /// Ranking mode configured for requests that do not pick one.
    pub fn default_mode(&self) -> RankingMode {
        RankingMode::from_config(&self.config.ranking)
    }
}

pub type SharedState = Arc<AppState>;
