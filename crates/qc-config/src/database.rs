//! libSQL database location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Database file name inside the project's `.qualcode` directory.
pub const DEFAULT_DB_FILE: &str = "qualcode.db";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Explicit database path. Empty means `<project>/.qualcode/qualcode.db`.
    /// `":memory:"` opens a throwaway in-memory database.
    #[serde(default)]
    pub path: String,
}

impl DatabaseConfig {
    /// Resolve the database path for a project root.
    #[must_use]
    pub fn resolve(&self, project_root: &Path) -> PathBuf {
        if self.path.is_empty() {
            project_root.join(".qualcode").join(DEFAULT_DB_FILE)
        } else {
            PathBuf::from(&self.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_resolves_inside_project() {
        let config = DatabaseConfig::default();
        assert_eq!(
            config.resolve(Path::new("/work/review")),
            PathBuf::from("/work/review/.qualcode/qualcode.db")
        );
    }

    #[test]
    fn explicit_path_wins() {
        let config = DatabaseConfig {
            path: "/data/codes.db".into(),
        };
        assert_eq!(
            config.resolve(Path::new("/work/review")),
            PathBuf::from("/data/codes.db")
        );
    }
}
