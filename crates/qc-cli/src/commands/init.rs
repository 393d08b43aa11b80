use std::path::PathBuf;

use anyhow::Context;
use qc_config::{PROJECT_DIR, QcConfig};
use qc_db::service::QcService;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::{TableOptions, Tabular, output, table};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitResponse {
    project_root: PathBuf,
    config: PathBuf,
    database: PathBuf,
    config_written: bool,
}

impl Tabular for InitResponse {
    fn to_table(&self, options: TableOptions) -> String {
        let config = if self.config_written {
            self.config.display().to_string()
        } else {
            format!("{} (kept)", self.config.display())
        };
        table::render_record(
            &[
                ("project", self.project_root.display().to_string()),
                ("config", config),
                ("database", self.database.display().to_string()),
            ],
            options,
        )
    }
}

/// Handle `qc init`: create `.qualcode/`, a default config and the database.
pub async fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = match args.path.as_deref().or(flags.project.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let project_dir = root.join(PROJECT_DIR);
    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("failed to create {}", project_dir.display()))?;

    let config_path = project_dir.join("config.toml");
    let config_written = args.force || !config_path.exists();
    if config_written {
        let contents = toml::to_string_pretty(&QcConfig::default())
            .context("failed to serialize default config")?;
        std::fs::write(&config_path, contents)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
    }

    let config = QcConfig::load_for_project(&root).context("failed to load configuration")?;
    let database = config.database.resolve(&root);
    QcService::new_local(&database.to_string_lossy())
        .await
        .with_context(|| format!("failed to create database at {}", database.display()))?;
    tracing::info!(root = %root.display(), "project initialized");

    output(
        &InitResponse {
            project_root: root,
            config: config_path,
            database,
            config_written,
        },
        flags.format,
    )
}
