use crate::config::Config;
use crate::layout::FitConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    /// Page-fit tuning derived from `config`; one value for every fit the service runs.
    pub fit_config: FitConfig,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let fit_config = config.fit_config();
        AppState { config, fit_config }
    }
}
