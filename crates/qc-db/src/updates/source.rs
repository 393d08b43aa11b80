//! Source update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_title: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_type: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_coding_done: Option<bool>,
}

impl SourceUpdate {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.author.is_none()
            && self.source_name.is_none()
            && self.publication_title.is_none()
            && self.source_type.is_none()
            && self.search_type.is_none()
            && self.url.is_none()
            && self.initial_coding_done.is_none()
    }
}

pub struct SourceUpdateBuilder(SourceUpdate);

impl SourceUpdateBuilder {
    pub fn new() -> Self {
        Self(SourceUpdate::default())
    }

    pub fn author(mut self, val: Option<String>) -> Self {
        self.0.author = Some(val);
        self
    }

    pub fn source_name(mut self, val: impl Into<String>) -> Self {
        self.0.source_name = Some(val.into());
        self
    }

    pub fn publication_title(mut self, val: Option<String>) -> Self {
        self.0.publication_title = Some(val);
        self
    }

    pub fn source_type(mut self, val: Option<String>) -> Self {
        self.0.source_type = Some(val);
        self
    }

    pub fn search_type(mut self, val: Option<String>) -> Self {
        self.0.search_type = Some(val);
        self
    }

    pub fn url(mut self, val: Option<String>) -> Self {
        self.0.url = Some(val);
        self
    }

    pub const fn initial_coding_done(mut self, val: bool) -> Self {
        self.0.initial_coding_done = Some(val);
        self
    }

    pub fn build(self) -> SourceUpdate {
        self.0
    }
}

impl Default for SourceUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
