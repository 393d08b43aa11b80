use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::SourceId;

/// A reviewed document or publication.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: SourceId,
    /// Display identifier, unique across sources.
    pub source_number: i64,
    pub author: Option<String>,
    pub source_name: String,
    pub publication_title: Option<String>,
    pub source_type: Option<String>,
    pub search_type: Option<String>,
    pub url: Option<String>,
    /// Set once the first coding pass over this source is complete.
    pub initial_coding_done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
