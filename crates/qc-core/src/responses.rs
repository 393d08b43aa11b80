//! Response types shared by the HTTP API and the `qc` CLI.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Code, Coding, Source};
use crate::ids::CodeId;
use crate::tree::{ParentUpdate, TreeNode};

/// Outcome of a batch parent update.
///
/// Items are applied independently; a failure for one id does not stop the
/// others. Callers reconcile by refetching codes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParentUpdateReport {
    pub updated: Vec<ParentUpdate>,
    pub failed: Vec<ParentUpdateFailure>,
}

impl ParentUpdateReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A single rejected item of a batch parent update.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParentUpdateFailure {
    pub id: CodeId,
    pub error: String,
}

/// The display forest plus the codes it cannot place.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CodeTreeResponse {
    pub tree: Vec<TreeNode>,
    pub orphans: Vec<CodeId>,
}

/// Response from saving an edited tree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TreeSaveResponse {
    pub report: ParentUpdateReport,
    pub tree: Vec<TreeNode>,
    pub orphans: Vec<CodeId>,
}

/// A coding together with the name of its code.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CodingWithCode {
    #[serde(flatten)]
    pub coding: Coding,
    pub code_name: String,
}

/// A coding together with the source it was taken from.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CodingWithSource {
    #[serde(flatten)]
    pub coding: Coding,
    pub source: Source,
}

/// A code and every coding attached to it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CodeCodingsResponse {
    pub code: Code,
    pub codings: Vec<CodingWithSource>,
}

/// A source with its codings, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SourceDetail {
    pub source: Source,
    pub codings: Vec<CodingWithCode>,
}

/// Key under which [`ReviewSummary::by_source_type`] counts untyped sources.
pub const UNSPECIFIED_SOURCE_TYPE: &str = "unspecified";

/// Review coverage over sources whose initial coding is done.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub total_reviewed: u32,
    /// Reviewed sources per source type. Sources with no (or a blank) type
    /// count under [`UNSPECIFIED_SOURCE_TYPE`].
    pub by_source_type: BTreeMap<String, u32>,
}
