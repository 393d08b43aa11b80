//! Locating the qualcode project a command runs against.

use std::path::{Path, PathBuf};

use anyhow::Context;
use qc_config::PROJECT_DIR;

/// Nearest ancestor of `start` (itself included) holding a `.qualcode` directory.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_DIR).is_dir())
        .map(Path::to_path_buf)
}

/// Project root for a command.
///
/// `--project` may name the root or its `.qualcode` directory. Without it the
/// search walks up from `cwd`.
///
/// # Errors
///
/// Fails when the explicit path is not a directory, or when no ancestor of
/// `cwd` is a qualcode project.
pub fn resolve_project_root(project: Option<&str>, cwd: &Path) -> anyhow::Result<PathBuf> {
    let Some(path) = project else {
        return find_project_root(cwd)
            .context("not a qualcode project (no .qualcode directory found). Run 'qc init' first.");
    };

    let explicit = PathBuf::from(path);
    if explicit.file_name().is_some_and(|name| name == PROJECT_DIR) {
        return explicit
            .parent()
            .map(Path::to_path_buf)
            .context("invalid --project path: '.qualcode' directory has no parent");
    }
    anyhow::ensure!(
        explicit.is_dir(),
        "invalid --project '{}': directory does not exist",
        explicit.display()
    );
    Ok(explicit)
}
