//! The tree widget's wire shape.
//!
//! The browser tree widget labels nodes with `name` and nests them under
//! `children`. It may post either a bare array of top-level nodes or a single
//! wrapper root `{name, children}` whose children are the real roots. Both
//! convert to and from [`TreeNode`] here so nothing else sees widget naming.

use serde::{Deserialize, Serialize};

use qc_core::ids::CodeId;
use qc_core::responses::{CodeTreeResponse, ParentUpdateReport, TreeSaveResponse};
use qc_core::tree::TreeNode;

/// One node as the widget sees it. Extra widget fields (`toggled`, `active`)
/// are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WidgetNode {
    pub id: CodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<WidgetNode>>,
}

/// Synthetic top node some widgets require around the forest.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetRoot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<WidgetNode>,
}

/// An edited tree as posted by the widget.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WidgetTree {
    Forest(Vec<WidgetNode>),
    Root(WidgetRoot),
}

impl WidgetTree {
    /// The top-level nodes, unwrapping a wrapper root.
    #[must_use]
    pub fn into_forest(self) -> Vec<TreeNode> {
        let nodes = match self {
            Self::Forest(nodes) => nodes,
            Self::Root(root) => root.children,
        };
        nodes.into_iter().map(TreeNode::from).collect()
    }
}

impl From<WidgetNode> for TreeNode {
    fn from(node: WidgetNode) -> Self {
        let children = node
            .children
            .unwrap_or_default()
            .into_iter()
            .map(Self::from)
            .collect();
        Self::with_children(node.id, node.name, children)
    }
}

impl From<TreeNode> for WidgetNode {
    fn from(node: TreeNode) -> Self {
        Self {
            id: node.id,
            name: node.label,
            children: node
                .children
                .map(|children| children.into_iter().map(Self::from).collect()),
        }
    }
}

fn to_widget(tree: Vec<TreeNode>) -> Vec<WidgetNode> {
    tree.into_iter().map(WidgetNode::from).collect()
}

/// `GET /api/code-tree` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetTreeResponse {
    pub tree: Vec<WidgetNode>,
    pub orphans: Vec<CodeId>,
}

impl From<CodeTreeResponse> for WidgetTreeResponse {
    fn from(response: CodeTreeResponse) -> Self {
        Self {
            tree: to_widget(response.tree),
            orphans: response.orphans,
        }
    }
}

/// `PUT /api/code-tree` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSaveResponse {
    #[serde(flatten)]
    pub report: ParentUpdateReport,
    pub tree: Vec<WidgetNode>,
    pub orphans: Vec<CodeId>,
}

impl From<TreeSaveResponse> for WidgetSaveResponse {
    fn from(response: TreeSaveResponse) -> Self {
        Self {
            report: response.report,
            tree: to_widget(response.tree),
            orphans: response.orphans,
        }
    }
}
