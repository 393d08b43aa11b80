use std::collections::{HashMap, HashSet};

use crate::entities::Code;
use crate::ids::CodeId;

use super::{ParentUpdate, TreeError};

/// Check that applying `updates` over `codes` still leaves a forest.
///
/// Updates for ids not in `codes` are skipped here; persisting them fails per
/// item at the store. Codes already dangling from a missing parent are left
/// alone, but a new reference to a missing parent is rejected.
///
/// # Errors
///
/// - [`TreeError::SelfParent`] when an update points a code at itself.
/// - [`TreeError::MissingParent`] when an update names an unknown parent.
/// - [`TreeError::Cycle`] when the resulting parent graph has a cycle.
pub fn validate_forest(codes: &[Code], updates: &[ParentUpdate]) -> Result<(), TreeError> {
    let mut parents: HashMap<CodeId, Option<CodeId>> =
        codes.iter().map(|code| (code.id, code.parent_id)).collect();

    for update in updates {
        if update.parent_id == Some(update.id) {
            return Err(TreeError::SelfParent(update.id));
        }
        if !parents.contains_key(&update.id) {
            continue;
        }
        if let Some(parent_id) = update.parent_id
            && !parents.contains_key(&parent_id)
        {
            return Err(TreeError::MissingParent {
                id: update.id,
                parent_id,
            });
        }
        parents.insert(update.id, update.parent_id);
    }

    let moved: HashSet<CodeId> = updates.iter().map(|u| u.id).collect();
    find_cycle(&parents).map_or(Ok(()), |cycle| {
        let id = cycle
            .iter()
            .copied()
            .find(|id| moved.contains(id))
            .unwrap_or(cycle[0]);
        Err(TreeError::Cycle { id, path: cycle })
    })
}

/// Split `updates` into those whose new parent exists in `codes` and those
/// naming a parent that does not.
///
/// Batch callers apply the first half and report the second per item, so one
/// dangling reference does not hold back the rest of the batch.
#[must_use]
pub fn split_dangling(
    codes: &[Code],
    updates: &[ParentUpdate],
) -> (Vec<ParentUpdate>, Vec<ParentUpdate>) {
    let known: HashSet<CodeId> = codes.iter().map(|code| code.id).collect();
    updates
        .iter()
        .partition(|update| update.parent_id.is_none_or(|parent| known.contains(&parent)))
}

/// Walk every ancestor chain once. Returns the first cycle found, closed
/// (first id repeated at the end).
fn find_cycle(parents: &HashMap<CodeId, Option<CodeId>>) -> Option<Vec<CodeId>> {
    let mut ids: Vec<CodeId> = parents.keys().copied().collect();
    ids.sort_unstable();

    let mut settled: HashSet<CodeId> = HashSet::with_capacity(ids.len());
    for start in ids {
        let mut chain: Vec<CodeId> = Vec::new();
        let mut on_chain: HashSet<CodeId> = HashSet::new();
        let mut current = Some(start);

        while let Some(id) = current {
            if settled.contains(&id) {
                break;
            }
            if !on_chain.insert(id) {
                let from = chain.iter().position(|&c| c == id).unwrap_or(0);
                let mut cycle = chain[from..].to_vec();
                cycle.push(id);
                return Some(cycle);
            }
            chain.push(id);
            current = parents.get(&id).copied().flatten();
        }
        settled.extend(chain);
    }
    None
}
