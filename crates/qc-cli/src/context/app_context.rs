use std::path::PathBuf;

use anyhow::Context;
use qc_config::QcConfig;
use qc_db::service::QcService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: QcService,
    pub config: QcConfig,
    pub project_root: PathBuf,
}

impl AppContext {
    /// Open the project database named by the configuration.
    pub async fn init(project_root: PathBuf, config: QcConfig) -> anyhow::Result<Self> {
        let db_path = config.database.resolve(&project_root);
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let service = QcService::new_local(&db_path.to_string_lossy())
            .await
            .with_context(|| format!("failed to open database at {}", db_path.display()))?;
        tracing::debug!(db = %db_path.display(), "application context ready");

        Ok(Self {
            service,
            config,
            project_root,
        })
    }
}
