use std::sync::Arc;
use parlance_core::{Config, SanitizedConfig, TicketWorkflow};

/// Shared application state
pub struct AppState {
    config: Config,
    workflow: Arc<TicketWorkflow>,
}

impl AppState {
    pub fn new(config: Config, workflow: Arc<TicketWorkflow>) -> Self {
        Self { config, workflow }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn workflow(&self) -> &Arc<TicketWorkflow> {
        &self.workflow
    }
}
