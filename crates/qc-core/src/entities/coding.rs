use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{CodeId, CodingId, SourceId};

/// An excerpt of a source with a code attached to it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    pub id: CodingId,
    pub code_id: CodeId,
    pub source_id: SourceId,
    /// Rich-text excerpt, stored as the editor's serialized markup.
    #[serde(rename = "codedSnippet")]
    pub snippet: String,
    pub start_index: Option<i64>,
    pub end_index: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
