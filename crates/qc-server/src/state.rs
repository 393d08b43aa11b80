//! Shared handler state.

use std::sync::Arc;

use qc_config::{AuthConfig, GeneralConfig};
use qc_db::service::QcService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QcService>,
    pub auth: Arc<AuthConfig>,
    /// Row cap for list endpoints called without `limit`.
    pub list_limit: u32,
}

impl AppState {
    #[must_use]
    pub fn new(service: QcService, auth: AuthConfig) -> Self {
        Self {
            service: Arc::new(service),
            auth: Arc::new(auth),
            list_limit: GeneralConfig::default().api_list_limit,
        }
    }

    #[must_use]
    pub const fn with_list_limit(mut self, limit: u32) -> Self {
        self.list_limit = limit;
        self
    }
}
