//! Listing defaults shared by the CLI and the API.

use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    50
}

const fn default_api_list_limit() -> u32 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rows shown by `qc` list commands when `--limit` is not given.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Sources returned by `GET /api/source` when the request has no `limit`.
    #[serde(default = "default_api_list_limit")]
    pub api_list_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            api_list_limit: default_api_list_limit(),
        }
    }
}

impl GeneralConfig {
    /// Resolve a requested row count against `fallback`. Zero counts as unset,
    /// and the result is at least one.
    #[must_use]
    pub fn resolve_limit(requested: Option<u32>, fallback: u32) -> u32 {
        requested
            .filter(|limit| *limit > 0)
            .unwrap_or(fallback)
            .max(1)
    }
}
