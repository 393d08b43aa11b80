//! Coding update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingUpdate {
    #[serde(rename = "codedSnippet", skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<Option<i64>>,
}

impl CodingUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.snippet.is_none() && self.start_index.is_none() && self.end_index.is_none()
    }
}

pub struct CodingUpdateBuilder(CodingUpdate);

impl CodingUpdateBuilder {
    pub fn new() -> Self {
        Self(CodingUpdate::default())
    }

    pub fn snippet(mut self, val: impl Into<String>) -> Self {
        self.0.snippet = Some(val.into());
        self
    }

    pub const fn start_index(mut self, val: Option<i64>) -> Self {
        self.0.start_index = Some(val);
        self
    }

    pub const fn end_index(mut self, val: Option<i64>) -> Self {
        self.0.end_index = Some(val);
        self
    }

    pub fn build(self) -> CodingUpdate {
        self.0
    }
}

impl Default for CodingUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
