//! Code-hierarchy edit session.
//!
//! Holds the codes last fetched from a [`CodeStore`], the tree the user is
//! editing, and whether that tree has unsaved changes. Saving flattens the
//! pending tree, validates the resulting hierarchy, persists the changed
//! parents, then refetches and rebuilds. A failed save keeps the session dirty
//! with the pending tree untouched so the user can retry.

use thiserror::Error;

use crate::entities::Code;
use crate::enums::EditState;
use crate::responses::ParentUpdateReport;
use crate::tree::{self, ParentUpdate, TreeError, TreeNode};

/// Persistence seam for the code hierarchy.
#[allow(async_fn_in_trait)]
pub trait CodeStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch every code with its coding count.
    async fn list_codes(&self) -> Result<Vec<Code>, Self::Error>;

    /// Apply parent updates independently, reporting which ones applied.
    async fn update_parents(
        &self,
        updates: &[ParentUpdate],
    ) -> Result<ParentUpdateReport, Self::Error>;
}

/// Errors from [`EditSession::save`].
#[derive(Debug, Error)]
pub enum SessionError<E>
where
    E: std::error::Error + 'static,
{
    /// The pending tree is malformed or would break the forest invariant.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The store failed to persist or refetch.
    #[error("code store failed: {0}")]
    Store(#[source] E),
}

#[derive(Debug, Clone, Default)]
pub struct EditSession {
    codes: Vec<Code>,
    tree: Vec<TreeNode>,
    state: EditState,
}

impl EditSession {
    /// Fetch codes and build a clean session.
    ///
    /// # Errors
    ///
    /// Returns the store error if the codes cannot be fetched.
    pub async fn load<S: CodeStore>(store: &S) -> Result<Self, S::Error> {
        let codes = store.list_codes().await?;
        Ok(Self::from_codes(codes))
    }

    #[must_use]
    pub fn from_codes(codes: Vec<Code>) -> Self {
        let tree = tree::build_tree(&codes);
        Self {
            codes,
            tree,
            state: EditState::Clean,
        }
    }

    #[must_use]
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    /// The tree being edited (pending edits included).
    #[must_use]
    pub fn tree(&self) -> &[TreeNode] {
        &self.tree
    }

    #[must_use]
    pub const fn state(&self) -> EditState {
        self.state
    }

    #[must_use]
    pub fn unsaved_changes(&self) -> bool {
        self.state == EditState::Dirty
    }

    /// Replace the pending tree with the one the widget reported.
    pub fn apply_widget_tree(&mut self, tree: Vec<TreeNode>) {
        self.tree = tree;
        self.transition(EditState::Dirty);
    }

    /// Persist the pending tree.
    ///
    /// A clean session has nothing to save and returns an empty report without
    /// touching the store.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Tree` before anything is persisted if the tree
    /// is malformed or would create a cycle, and `SessionError::Store` if
    /// persisting or refetching fails. The session stays dirty either way.
    pub async fn save<S: CodeStore>(
        &mut self,
        store: &S,
    ) -> Result<ParentUpdateReport, SessionError<S::Error>> {
        if self.state == EditState::Clean {
            return Ok(ParentUpdateReport::default());
        }

        let updates = tree::plan_tree_save(&self.codes, &self.tree)?;
        tracing::debug!(updates = updates.len(), "saving code hierarchy");

        let report = if updates.is_empty() {
            ParentUpdateReport::default()
        } else {
            store
                .update_parents(&updates)
                .await
                .map_err(SessionError::Store)?
        };

        for failure in &report.failed {
            tracing::warn!(id = failure.id, error = %failure.error, "parent update rejected");
        }

        let codes = store.list_codes().await.map_err(SessionError::Store)?;
        self.tree = tree::build_tree(&codes);
        self.codes = codes;
        self.transition(EditState::Clean);
        Ok(report)
    }

    fn transition(&mut self, next: EditState) {
        debug_assert!(self.state.can_transition_to(next) || self.state == next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ids::CodeId;
    use crate::responses::ParentUpdateFailure;

    #[derive(Debug, Error)]
    #[error("store offline")]
    struct Offline;

    /// In-memory store that can be switched offline.
    #[derive(Default)]
    struct MemoryStore {
        codes: RefCell<Vec<Code>>,
        offline: Cell<bool>,
        calls: Cell<u32>,
    }

    impl MemoryStore {
        fn with(codes: Vec<Code>) -> Self {
            Self {
                codes: RefCell::new(codes),
                ..Self::default()
            }
        }

        fn parent_of(&self, id: CodeId) -> Option<CodeId> {
            self.codes
                .borrow()
                .iter()
                .find(|c| c.id == id)
                .and_then(|c| c.parent_id)
        }
    }

    impl CodeStore for MemoryStore {
        type Error = Offline;

        async fn list_codes(&self) -> Result<Vec<Code>, Offline> {
            if self.offline.get() {
                return Err(Offline);
            }
            Ok(self.codes.borrow().clone())
        }

        async fn update_parents(
            &self,
            updates: &[ParentUpdate],
        ) -> Result<ParentUpdateReport, Offline> {
            if self.offline.get() {
                return Err(Offline);
            }
            self.calls.set(self.calls.get() + 1);
            let mut report = ParentUpdateReport::default();
            let mut codes = self.codes.borrow_mut();
            for update in updates {
                match codes.iter_mut().find(|c| c.id == update.id) {
                    Some(code) => {
                        code.parent_id = update.parent_id;
                        report.updated.push(*update);
                    }
                    None => report.failed.push(ParentUpdateFailure {
                        id: update.id,
                        error: "not found".into(),
                    }),
                }
            }
            Ok(report)
        }
    }

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

    fn store() -> MemoryStore {
        MemoryStore::with(vec![
            code(1, None, "A"),
            code(2, Some(1), "B"),
            code(3, None, "C"),
        ])
    }

    fn bare(id: CodeId, children: Vec<TreeNode>) -> TreeNode {
        TreeNode::with_children(id, "", children)
    }

    #[tokio::test]
    async fn load_builds_clean_session() {
        let store = store();
        let session = EditSession::load(&store).await.unwrap();
        assert_eq!(session.state(), EditState::Clean);
        assert!(!session.unsaved_changes());
        assert_eq!(session.tree().len(), 2);
    }

    #[tokio::test]
    async fn widget_edit_marks_dirty_and_save_cleans() {
        let store = store();
        let mut session = EditSession::load(&store).await.unwrap();

        session.apply_widget_tree(vec![bare(1, vec![bare(2, vec![]), bare(3, vec![])])]);
        assert!(session.unsaved_changes());

        let report = session.save(&store).await.unwrap();
        assert_eq!(report.updated, vec![ParentUpdate::new(3, Some(1))]);
        assert!(report.is_complete());
        assert_eq!(store.parent_of(3), Some(1));
        assert_eq!(store.parent_of(2), Some(1));
        assert_eq!(store.parent_of(1), None);

        assert_eq!(session.state(), EditState::Clean);
        assert_eq!(session.tree().len(), 1);
        assert_eq!(session.tree()[0].children().len(), 2);
        assert_eq!(session.tree()[0].children()[1].label, "C (0)");
    }

    #[tokio::test]
    async fn saving_unmodified_tree_changes_nothing() {
        let store = store();
        let mut session = EditSession::load(&store).await.unwrap();
        let same = session.tree().to_vec();

        session.apply_widget_tree(same);
        let report = session.save(&store).await.unwrap();

        assert!(report.updated.is_empty());
        assert_eq!(store.calls.get(), 0);
        assert_eq!(store.parent_of(2), Some(1));
        assert!(!session.unsaved_changes());
    }

    #[tokio::test]
    async fn failed_save_keeps_pending_edits() {
        let store = store();
        let mut session = EditSession::load(&store).await.unwrap();
        let edited = vec![bare(3, vec![bare(1, vec![bare(2, vec![])])])];
        session.apply_widget_tree(edited.clone());

        store.offline.set(true);
        let err = session.save(&store).await.unwrap_err();
        assert!(matches!(err, SessionError::Store(Offline)));
        assert!(session.unsaved_changes());
        assert_eq!(session.tree(), edited.as_slice());

        store.offline.set(false);
        session.save(&store).await.unwrap();
        assert_eq!(store.parent_of(1), Some(3));
        assert!(!session.unsaved_changes());
    }

    #[tokio::test]
    async fn unknown_node_aborts_before_persistence() {
        let store = store();
        let mut session = EditSession::load(&store).await.unwrap();
        session.apply_widget_tree(vec![bare(1, vec![bare(8, vec![])])]);

        let err = session.save(&store).await.unwrap_err();
        assert!(matches!(err, SessionError::Tree(TreeError::UnknownNode(8))));
        assert_eq!(store.calls.get(), 0);
        assert!(session.unsaved_changes());
    }

    #[tokio::test]
    async fn clean_session_save_is_a_no_op() {
        let store = store();
        let mut session = EditSession::load(&store).await.unwrap();
        store.offline.set(true);
        let report = session.save(&store).await.unwrap();
        assert_eq!(report, ParentUpdateReport::default());
    }
}
