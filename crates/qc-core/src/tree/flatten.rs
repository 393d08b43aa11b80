use std::collections::HashMap;

use crate::entities::Code;
use crate::ids::CodeId;

use super::{ParentAssignments, ParentUpdate, TreeError, TreeNode, validate_forest};

/// Index codes by id for the duration of one save.
#[must_use]
pub fn index_codes(codes: &[Code]) -> HashMap<CodeId, &Code> {
    codes.iter().map(|code| (code.id, code)).collect()
}

/// Flatten an (edited) forest into the parent every node now has.
///
/// Roots map to `None`, every other node to the id of the node enclosing it.
/// All ids must resolve in `known`. On error no mapping is returned, so a
/// malformed tree can never be half-applied.
///
/// # Errors
///
/// Returns [`TreeError::UnknownNode`] for an id missing from `known` and
/// [`TreeError::DuplicateNode`] for an id that appears twice.
pub fn flatten_tree<V>(
    tree: &[TreeNode],
    known: &HashMap<CodeId, V>,
) -> Result<ParentAssignments, TreeError> {
    let mut assignments = ParentAssignments::new();
    flatten_level(tree, None, known, &mut assignments)?;
    Ok(assignments)
}

fn flatten_level<V>(
    nodes: &[TreeNode],
    parent: Option<CodeId>,
    known: &HashMap<CodeId, V>,
    assignments: &mut ParentAssignments,
) -> Result<(), TreeError> {
    for node in nodes {
        if !known.contains_key(&node.id) {
            return Err(TreeError::UnknownNode(node.id));
        }
        if assignments.insert(node.id, parent).is_some() {
            return Err(TreeError::DuplicateNode(node.id));
        }
        flatten_level(node.children(), Some(node.id), known, assignments)?;
    }
    Ok(())
}

/// Updates for the codes whose parent differs from `assignments`, by id.
#[must_use]
pub fn changed_parents(codes: &[Code], assignments: &ParentAssignments) -> Vec<ParentUpdate> {
    let current = index_codes(codes);
    assignments
        .iter()
        .filter(|(id, parent)| {
            current
                .get(*id)
                .is_none_or(|code| code.parent_id != **parent)
        })
        .map(|(&id, &parent_id)| ParentUpdate::new(id, parent_id))
        .collect()
}

/// Copy of `codes` with `updates` applied. Updates for unknown ids are ignored.
#[must_use]
pub fn apply_updates(codes: &[Code], updates: &[ParentUpdate]) -> Vec<Code> {
    let by_id: HashMap<CodeId, Option<CodeId>> =
        updates.iter().map(|u| (u.id, u.parent_id)).collect();
    codes
        .iter()
        .cloned()
        .map(|mut code| {
            if let Some(parent_id) = by_id.get(&code.id) {
                code.parent_id = *parent_id;
            }
            code
        })
        .collect()
}

/// Turn an edited tree into the validated set of updates to persist.
///
/// The lookup map is built from `codes` for this call only and dropped on
/// return. An unmodified tree yields no updates.
///
/// # Errors
///
/// Returns a [`TreeError`] if the tree is malformed or the resulting hierarchy
/// would not be a forest.
pub fn plan_tree_save(codes: &[Code], tree: &[TreeNode]) -> Result<Vec<ParentUpdate>, TreeError> {
    let known = index_codes(codes);
    let assignments = flatten_tree(tree, &known)?;
    let updates = changed_parents(codes, &assignments);
    validate_forest(codes, &updates)?;
    Ok(updates)
}
