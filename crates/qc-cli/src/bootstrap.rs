use std::path::Path;

use anyhow::Context;
use qc_config::QcConfig;

/// Load `.env` from the project root (falling back to the usual lookup), then
/// the layered configuration for that project.
pub fn load_config(project_root: &Path) -> anyhow::Result<QcConfig> {
    load_project_dotenv(project_root)?;
    QcConfig::load_for_project(project_root).context("failed to load qualcode configuration")
}

fn load_project_dotenv(project_root: &Path) -> anyhow::Result<()> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}
