//! Code hierarchy integration tests
//!
//! Exercises the service against an on-disk database:
//! - Tree save flow: flatten, diff, validate, persist, rebuild
//! - Batch parent updates with partial failure
//! - Serialized writes under concurrent moves
//! - Edit session over the real store
//! - Persistence across reopen

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use qc_core::enums::EditState;
use qc_core::session::{EditSession, SessionError};
use qc_core::tree::{ParentUpdate, TreeError, TreeNode, count_nodes};
use qc_db::error::DatabaseError;
use qc_db::repos::source::NewSource;
use qc_db::service::QcService;

async fn disk_service(dir: &TempDir) -> QcService {
    let path = dir.path().join("qualcode.db");
    QcService::new_local(path.to_str().unwrap()).await.unwrap()
}

/// Seed `[{1,null,A},{2,1,B},{3,null,C}]`.
async fn seed_abc(svc: &QcService) -> (i64, i64, i64) {
    let a = svc.create_code("A").await.unwrap();
    let b = svc.create_code("B").await.unwrap();
    let c = svc.create_code("C").await.unwrap();
    svc.set_code_parent(b.id, Some(a.id)).await.unwrap();
    (a.id, b.id, c.id)
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

#[tokio::test]
async fn code_tree_matches_stored_hierarchy() {
    let dir = TempDir::new().unwrap();
    let svc = disk_service(&dir).await;
    let (a, b, c) = seed_abc(&svc).await;

    let response = svc.code_tree().await.unwrap();
    assert_eq!(
        response.tree,
        vec![
            TreeNode::with_children(a, "A (0)", vec![TreeNode::leaf(b, "B (0)")]),
            TreeNode::leaf(c, "C (0)"),
        ]
    );
    assert_eq!(count_nodes(&response.tree), 3);
    assert!(response.orphans.is_empty());
}

#[tokio::test]
async fn tree_save_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let (a, c) = {
        let svc = disk_service(&dir).await;
        let (a, b, c) = seed_abc(&svc).await;
        let edited = vec![TreeNode::with_children(
            a,
            "A (0)",
            vec![TreeNode::leaf(b, "B (0)"), TreeNode::leaf(c, "C (0)")],
        )];
        let saved = svc.save_code_tree(&edited).await.unwrap();
        assert_eq!(saved.report.updated, vec![ParentUpdate::new(c, Some(a))]);
        (a, c)
    };

    let svc = disk_service(&dir).await;
    assert_eq!(svc.get_code(c).await.unwrap().parent_id, Some(a));
}

#[tokio::test]
async fn moving_a_subtree_keeps_grandchildren_attached() {
    let dir = TempDir::new().unwrap();
    let svc = disk_service(&dir).await;
    let (a, b, c) = seed_abc(&svc).await;
    let d = svc.create_code("D").await.unwrap().id;
    svc.set_code_parent(d, Some(b)).await.unwrap();

    // Drag B (with D beneath it) under C.
    let edited = vec![
        TreeNode::leaf(a, ""),
        TreeNode::with_children(
            c,
            "",
            vec![TreeNode::with_children(b, "", vec![TreeNode::leaf(d, "")])],
        ),
    ];
    let saved = svc.save_code_tree(&edited).await.unwrap();
    assert_eq!(saved.report.updated, vec![ParentUpdate::new(b, Some(c))]);
    assert_eq!(svc.get_code(d).await.unwrap().parent_id, Some(b));
}

#[tokio::test]
async fn dragging_a_node_under_its_descendant_is_rejected() {
    let dir = TempDir::new().unwrap();
    let svc = disk_service(&dir).await;
    let (a, b, _) = seed_abc(&svc).await;

    let err = svc
        .update_parents(&[ParentUpdate::new(a, Some(b))])
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Tree(TreeError::Cycle { .. })));
    assert_eq!(svc.get_code(a).await.unwrap().parent_id, None);
}

#[tokio::test]
async fn batch_with_dangling_parent_applies_the_valid_items() {
    let dir = TempDir::new().unwrap();
    let (a, c) = {
        let svc = disk_service(&dir).await;
        let (a, _, c) = seed_abc(&svc).await;

        let report = svc
            .update_parents(&[
                ParentUpdate::new(c, Some(a)),
                ParentUpdate::new(a, Some(9999)),
            ])
            .await
            .unwrap();
        assert_eq!(report.updated, vec![ParentUpdate::new(c, Some(a))]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, a);
        (a, c)
    };

    let svc = disk_service(&dir).await;
    assert_eq!(svc.get_code(c).await.unwrap().parent_id, Some(a));
    assert_eq!(svc.get_code(a).await.unwrap().parent_id, None);
    assert!(svc.code_tree().await.unwrap().orphans.is_empty());
}

#[tokio::test]
async fn single_move_to_dangling_parent_is_rejected() {
    let dir = TempDir::new().unwrap();
    let svc = disk_service(&dir).await;
    let (_, _, c) = seed_abc(&svc).await;

    let err = svc.set_code_parent(c, Some(404)).await.unwrap_err();
    assert!(matches!(
        err,
        DatabaseError::Tree(TreeError::MissingParent { .. })
    ));
}

#[tokio::test]
async fn concurrent_swaps_on_disk_never_commit_a_cycle() {
    let dir = TempDir::new().unwrap();
    let svc = disk_service(&dir).await;
    let (a, _, c) = seed_abc(&svc).await;

    let first_updates = [ParentUpdate::new(a, Some(c))];
    let second_updates = [ParentUpdate::new(c, Some(a))];
    let (first, second) = tokio::join!(
        svc.update_parents(&first_updates),
        svc.update_parents(&second_updates),
    );
    assert!(first.is_ok() != second.is_ok());

    let response = svc.code_tree().await.unwrap();
    assert!(response.orphans.is_empty());
    assert_eq!(count_nodes(&response.tree), 3);
}

// ---------------------------------------------------------------------------
// Edit session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edit_session_unknown_node_keeps_session_dirty() {
    let dir = TempDir::new().unwrap();
    let svc = disk_service(&dir).await;
    let (a, _, _) = seed_abc(&svc).await;

    let mut session = EditSession::load(&svc).await.unwrap();
    let pending = vec![TreeNode::with_children(a, "", vec![TreeNode::leaf(77, "")])];
    session.apply_widget_tree(pending.clone());

    let err = session.save(&svc).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Tree(TreeError::UnknownNode { .. })
    ));
    assert_eq!(session.state(), EditState::Dirty);
    assert!(session.unsaved_changes());
    assert_eq!(session.tree(), pending.as_slice());
}

#[tokio::test]
async fn edit_session_reflects_coding_counts_after_save() {
    let dir = TempDir::new().unwrap();
    let svc = disk_service(&dir).await;
    let (a, b, c) = seed_abc(&svc).await;
    let source = svc
        .create_source(&NewSource::new(1, "Interview"))
        .await
        .unwrap();
    svc.create_coding(source.id, c, "excerpt", None, None)
        .await
        .unwrap();

    let mut session = EditSession::load(&svc).await.unwrap();
    session.apply_widget_tree(vec![TreeNode::with_children(
        a,
        "",
        vec![TreeNode::leaf(b, ""), TreeNode::leaf(c, "")],
    )]);
    session.save(&svc).await.unwrap();

    assert_eq!(session.state(), EditState::Clean);
    let labels: Vec<&str> = session.tree()[0]
        .children()
        .iter()
        .map(|n| n.label.as_str())
        .collect();
    assert_eq!(labels, vec!["B (0)", "C (1)"]);
}
