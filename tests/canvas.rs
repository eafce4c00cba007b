//! Tests for optimistic canvas state and the reconcile pass.
mod common;
use common::{blank_node, edge};
use jouken::prelude::*;
use std::result::Result;

/// Records every remote call and fails the operations listed in `fail`.
#[derive(Default)]
struct MockApi {
    calls: Vec<String>,
    fail: Vec<&'static str>,
    synced_edges: usize,
}

impl MockApi {
    fn check(&mut self, call: String, operation: &'static str) -> Result<(), SyncError> {
        self.calls.push(call);
        if self.fail.contains(&operation) {
            Err(SyncError::Remote(format!("{operation} unavailable")))
        } else {
            Ok(())
        }
    }
}

impl WorkflowApi for MockApi {
    fn create_node(&mut self, node: &NodeState) -> Result<(), SyncError> {
        self.check(format!("create:{}", node.id), "create")
    }

    fn update_node(&mut self, node: &NodeState) -> Result<(), SyncError> {
        self.check(format!("update:{}", node.id), "update")
    }

    fn delete_node(&mut self, node_id: &str) -> Result<(), SyncError> {
        self.check(format!("delete:{node_id}"), "delete")
    }

    fn sync_connections(&mut self, edges: &[EdgeState]) -> Result<(), SyncError> {
        self.synced_edges = edges.len();
        self.check("sync".to_string(), "sync")
    }
}

#[test]
fn test_loading_a_saved_workflow_is_clean() {
    let canvas = CanvasState::from_saved(
        vec![blank_node("a"), blank_node("b")],
        vec![edge("a", "b")],
    );
    assert!(!canvas.is_dirty());
    assert_eq!(canvas.nodes().count(), 2);
    assert_eq!(canvas.edges().count(), 1);
}

#[test]
fn test_local_edits_mark_dirty_until_reconciled() {
    let mut canvas = CanvasState::new();
    canvas.add_node(blank_node("a"));
    canvas.add_node(blank_node("b"));
    canvas.add_edge(edge("a", "b"));
    assert!(canvas.is_dirty());

    let mut api = MockApi::default();
    let report = canvas.reconcile(&mut api);
    assert!(report.is_clean());
    assert_eq!(report.applied, 3, "two creates plus one edge sync");
    assert!(!canvas.is_dirty());
    assert_eq!(api.synced_edges, 1);

    // A second save with nothing pending makes no remote calls.
    let mut api = MockApi::default();
    let report = canvas.reconcile(&mut api);
    assert_eq!(report.applied, 0);
    assert!(api.calls.is_empty());
}

#[test]
fn test_reconcile_order_is_delete_create_update_sync() {
    let mut canvas = CanvasState::from_saved(
        vec![blank_node("old"), blank_node("kept")],
        vec![edge("old", "kept")],
    );
    canvas.remove_node("old");
    canvas.add_node(blank_node("new"));
    canvas.update_node("kept", |n| n.label = "Renamed".to_string());

    let mut api = MockApi::default();
    let report = canvas.reconcile(&mut api);
    assert!(report.is_clean());
    assert_eq!(
        api.calls,
        vec!["delete:old", "create:new", "update:kept", "sync"]
    );
    assert_eq!(api.synced_edges, 0, "the removed node took its edge with it");
}

#[test]
fn test_partial_failure_keeps_only_failed_work_pending() {
    let mut canvas = CanvasState::new();
    canvas.add_node(blank_node("a"));
    canvas.add_node(blank_node("b"));
    canvas.add_edge(edge("a", "b"));

    let mut api = MockApi {
        fail: vec!["sync"],
        ..MockApi::default()
    };
    let report = canvas.reconcile(&mut api);
    assert_eq!(report.applied, 2, "node creates persisted despite the sync failure");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].operation, "syncConnections");
    assert!(canvas.is_dirty(), "the failed edge sync stays pending");

    // The retry replays only the edge sync.
    let mut api = MockApi::default();
    let report = canvas.reconcile(&mut api);
    assert!(report.is_clean());
    assert_eq!(api.calls, vec!["sync"]);
    assert!(!canvas.is_dirty());
}

#[test]
fn test_unsaved_node_removed_again_needs_no_remote_call() {
    let mut canvas = CanvasState::new();
    canvas.add_node(blank_node("ephemeral"));
    canvas.remove_node("ephemeral");
    assert!(!canvas.is_dirty());

    let mut api = MockApi::default();
    canvas.reconcile(&mut api);
    assert!(api.calls.is_empty());
}

#[test]
fn test_editing_an_unsaved_node_stays_a_single_create() {
    let mut canvas = CanvasState::new();
    canvas.add_node(blank_node("a"));
    assert!(canvas.update_node("a", |n| n.label = "Renamed".to_string()));
    assert!(!canvas.update_node("ghost", |_| {}));

    let mut api = MockApi::default();
    let report = canvas.reconcile(&mut api);
    assert_eq!(report.applied, 1);
    assert_eq!(api.calls, vec!["create:a"]);
    assert_eq!(canvas.node("a").map(|n| n.label.as_str()), Some("Renamed"));
}

#[test]
fn test_removing_an_edge_marks_edges_dirty() {
    let mut canvas = CanvasState::from_saved(
        vec![blank_node("a"), blank_node("b")],
        vec![edge("a", "b")],
    );
    canvas.remove_edge("a-b");
    assert!(canvas.is_dirty());

    let mut api = MockApi::default();
    let report = canvas.reconcile(&mut api);
    assert!(report.is_clean());
    assert_eq!(api.calls, vec!["sync"]);
    assert_eq!(api.synced_edges, 0);
}
