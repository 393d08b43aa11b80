//! Code hierarchy transformer.
//!
//! Converts the flat, parent-pointer list of [`Code`]s into an ordered forest
//! of [`TreeNode`]s for display, and flattens an edited forest back into
//! parent assignments. Every function here is pure: callers own the code list,
//! and the result of a flatten is a fresh mapping rather than mutated records.
//!
//! ```text
//! codes ──build_tree──▶ forest ──(widget edit)──▶ forest'
//!                                                   │
//!        updates ◀──changed_parents── assignments ◀─┘ flatten_tree
//!           │
//!           └──validate_forest──▶ CodeStore::update_parents
//! ```
//!
//! [`Code`]: crate::entities::Code

mod build;
mod flatten;
mod validate;

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::CodeId;

pub use build::{build_tree, orphans};
pub use flatten::{apply_updates, changed_parents, flatten_tree, index_codes, plan_tree_save};
pub use validate::{split_dangling, validate_forest};

/// A node of the display tree.
///
/// `children` is `None` for leaves. Consumers distinguish a leaf from an empty
/// child list, so [`build_tree`] never emits `Some(vec![])`. On input an empty
/// list is accepted and treated as a leaf.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TreeNode {
    pub id: CodeId,
    /// Display label. Edited trees may echo back only ids.
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    #[must_use]
    pub fn leaf(id: CodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            children: None,
        }
    }

    /// Build a node, normalizing an empty child list to a leaf.
    #[must_use]
    pub fn with_children(id: CodeId, label: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            id,
            label: label.into(),
            children: (!children.is_empty()).then_some(children),
        }
    }

    /// Child nodes, empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + count_nodes(self.children())
    }
}

/// Total number of nodes in a forest.
#[must_use]
pub fn count_nodes(forest: &[TreeNode]) -> usize {
    forest.iter().map(TreeNode::size).sum()
}

/// A single parent-reference change to persist.
///
/// Deserializes from either `{id, parentId}` or a full code object, since
/// unknown fields are ignored and a missing `parentId` means "root".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ParentUpdate {
    pub id: CodeId,
    #[serde(default)]
    pub parent_id: Option<CodeId>,
}

impl ParentUpdate {
    #[must_use]
    pub const fn new(id: CodeId, parent_id: Option<CodeId>) -> Self {
        Self { id, parent_id }
    }
}

/// New parent for every code that appears in a flattened tree.
pub type ParentAssignments = BTreeMap<CodeId, Option<CodeId>>;

/// Structural errors raised while flattening or validating a hierarchy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The edited tree references an id that was never handed out.
    #[error("tree node {0} does not match any known code")]
    UnknownNode(CodeId),

    /// The edited tree contains the same id at two positions.
    #[error("tree node {0} appears more than once")]
    DuplicateNode(CodeId),

    #[error("code {0} cannot be its own parent")]
    SelfParent(CodeId),

    /// Applying the updates would make `id` its own ancestor.
    #[error("moving code {id} would create a cycle: {}", format_path(.path))]
    Cycle { id: CodeId, path: Vec<CodeId> },

    #[error("code {id} references missing parent {parent_id}")]
    MissingParent { id: CodeId, parent_id: CodeId },
}

fn format_path(path: &[CodeId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_children_normalizes_empty_list() {
        let node = TreeNode::with_children(1, "A (0)", Vec::new());
        assert!(node.children.is_none());
        assert!(node.children().is_empty());
    }

    #[test]
    fn leaf_serializes_without_children_key() {
        let json = serde_json::to_value(TreeNode::leaf(7, "G (2)")).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "label": "G (2)"}));
    }

    #[test]
    fn node_deserializes_from_bare_ids() {
        let forest: Vec<TreeNode> =
            serde_json::from_str(r#"[{"id":1,"children":[{"id":2},{"id":3,"children":[]}]}]"#)
                .unwrap();
        assert_eq!(count_nodes(&forest), 3);
        assert!(forest[0].label.is_empty());
        assert!(forest[0].children()[1].children().is_empty());
    }

    #[test]
    fn parent_update_reads_full_code_objects() {
        let update: ParentUpdate = serde_json::from_str(
            r#"{"id":4,"name":"Trust","parentId":2,"codingCount":3,"createdAt":"x"}"#,
        )
        .unwrap();
        assert_eq!(update, ParentUpdate::new(4, Some(2)));

        let root: ParentUpdate = serde_json::from_str(r#"{"id":4}"#).unwrap();
        assert_eq!(root.parent_id, None);
    }

    #[test]
    fn cycle_error_lists_path() {
        let err = TreeError::Cycle {
            id: 1,
            path: vec![1, 3, 1],
        };
        assert_eq!(
            err.to_string(),
            "moving code 1 would create a cycle: 1 -> 3 -> 1"
        );
    }
}
