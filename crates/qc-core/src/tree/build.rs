use std::collections::{HashMap, HashSet};

use crate::entities::Code;
use crate::ids::CodeId;

use super::TreeNode;

/// Build the display forest from a flat code list.
///
/// Siblings keep the order they have in `codes`. A code whose parent id is not
/// in `codes`, or that sits on a parent cycle, is unreachable from any root and
/// is left out; see [`orphans`] to list those.
#[must_use]
pub fn build_tree(codes: &[Code]) -> Vec<TreeNode> {
    let buckets = bucket_by_parent(codes);
    let mut placed = HashSet::with_capacity(codes.len());
    build_level(&buckets, None, &mut placed)
}

/// Ids of codes that [`build_tree`] omits, in input order.
#[must_use]
pub fn orphans(codes: &[Code]) -> Vec<CodeId> {
    let buckets = bucket_by_parent(codes);
    let mut placed = HashSet::with_capacity(codes.len());
    build_level(&buckets, None, &mut placed);

    codes
        .iter()
        .map(|code| code.id)
        .filter(|id| !placed.contains(id))
        .collect()
}

fn bucket_by_parent(codes: &[Code]) -> HashMap<Option<CodeId>, Vec<&Code>> {
    let mut buckets: HashMap<Option<CodeId>, Vec<&Code>> = HashMap::new();
    for code in codes {
        buckets.entry(code.parent_id).or_default().push(code);
    }
    buckets
}

fn build_level(
    buckets: &HashMap<Option<CodeId>, Vec<&Code>>,
    parent: Option<CodeId>,
    placed: &mut HashSet<CodeId>,
) -> Vec<TreeNode> {
    let Some(bucket) = buckets.get(&parent) else {
        return Vec::new();
    };

    let mut level = Vec::with_capacity(bucket.len());
    for code in bucket {
        // Duplicate ids in the input are placed once.
        if !placed.insert(code.id) {
            continue;
        }
        let children = build_level(buckets, Some(code.id), placed);
        level.push(TreeNode::with_children(code.id, code.label(), children));
    }
    level
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tree::count_nodes;

    fn code(id: CodeId, parent_id: Option<CodeId>, name: &str) -> Code {
        Code {
            id,
            name: name.to_string(),
            parent_id,
            coding_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn builds_nested_forest_with_labels() {
        let codes = vec![
            code(1, None, "A"),
            code(2, Some(1), "B"),
            code(3, None, "C"),
        ];

        let tree = build_tree(&codes);

        assert_eq!(
            tree,
            vec![
                TreeNode::with_children(1, "A (0)", vec![TreeNode::leaf(2, "B (0)")]),
                TreeNode::leaf(3, "C (0)"),
            ]
        );
    }

    #[test]
    fn leaves_serialize_without_children() {
        let codes = vec![code(1, None, "A"), code(2, Some(1), "B")];
        let json = serde_json::to_value(build_tree(&codes)).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"id": 1, "label": "A (0)", "children": [{"id": 2, "label": "B (0)"}]}
            ])
        );
    }

    #[test]
    fn label_includes_coding_count() {
        let mut trust = code(5, None, "Trust");
        trust.coding_count = 12;
        assert_eq!(build_tree(&[trust])[0].label, "Trust (12)");
    }

    #[test]
    fn siblings_follow_input_order() {
        let codes = vec![
            code(1, None, "root"),
            code(9, Some(1), "zeta"),
            code(4, Some(1), "alpha"),
            code(6, Some(1), "mu"),
        ];
        let tree = build_tree(&codes);
        let ids: Vec<CodeId> = tree[0].children().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![9, 4, 6]);
    }

    #[test]
    fn children_listed_before_parent_still_nest() {
        let codes = vec![code(2, Some(1), "B"), code(1, None, "A")];
        let tree = build_tree(&codes);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children()[0].id, 2);
    }

    #[test]
    fn node_count_matches_input_for_valid_forest() {
        let codes = vec![
            code(1, None, "a"),
            code(2, Some(1), "b"),
            code(3, Some(2), "c"),
            code(4, Some(2), "d"),
            code(5, None, "e"),
            code(6, Some(5), "f"),
        ];
        assert_eq!(count_nodes(&build_tree(&codes)), codes.len());
        assert!(orphans(&codes).is_empty());
    }

    #[test]
    fn empty_input_builds_empty_forest() {
        assert!(build_tree(&[]).is_empty());
    }

    #[test]
    fn dangling_parent_is_omitted_and_reported() {
        let codes = vec![code(1, None, "A"), code(2, Some(99), "lost")];
        let tree = build_tree(&codes);
        assert_eq!(count_nodes(&tree), 1);
        assert_eq!(orphans(&codes), vec![2]);
    }

    #[test]
    fn cycles_terminate_and_are_reported() {
        let codes = vec![
            code(1, None, "A"),
            code(2, Some(3), "B"),
            code(3, Some(2), "C"),
            code(4, Some(4), "self"),
        ];
        let tree = build_tree(&codes);
        assert_eq!(count_nodes(&tree), 1);
        assert_eq!(orphans(&codes), vec![2, 3, 4]);
    }
}
