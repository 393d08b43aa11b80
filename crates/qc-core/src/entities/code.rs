use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::CodeId;

/// A user-defined label in the coding scheme.
///
/// Codes form a forest through `parent_id`; `None` marks a root. Children are
/// never stored, they are derived by [`crate::tree::build_tree`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Code {
    pub id: CodeId,
    pub name: String,
    pub parent_id: Option<CodeId>,
    /// Number of codings attached to this code. Derived, not stored.
    #[serde(default)]
    pub coding_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Code {
    /// Display label used by tree views: `"<name> (<count>)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.coding_count)
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Normalize a user-supplied code name.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the name is blank.
pub fn normalize_code_name(raw: &str) -> Result<String, crate::errors::CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(crate::errors::CoreError::Validation(
            "code name must not be empty".into(),
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_formats_name_and_count() {
        let code = Code {
            id: 1,
            name: "Trust".into(),
            parent_id: None,
            coding_count: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(code.label(), "Trust (3)");
        assert!(code.is_root());
    }

    #[test]
    fn normalize_trims_and_rejects_blank() {
        assert_eq!(normalize_code_name("  Power ").unwrap(), "Power");
        assert!(normalize_code_name("   ").is_err());
    }
}
