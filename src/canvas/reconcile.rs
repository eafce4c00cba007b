//! The manual save step: replaying pending canvas operations against the
//! remote persistence API.

use itertools::Itertools;

use super::{CanvasState, EdgeState, NodeState};
use crate::error::SyncError;

/// The remote persistence seam. Wire format and transport are the server's
/// concern; the canvas only sees success or failure per call.
pub trait WorkflowApi {
    fn create_node(&mut self, node: &NodeState) -> Result<(), SyncError>;
    fn update_node(&mut self, node: &NodeState) -> Result<(), SyncError>;
    fn delete_node(&mut self, node_id: &str) -> Result<(), SyncError>;
    fn sync_connections(&mut self, edges: &[EdgeState]) -> Result<(), SyncError>;
}

/// One failed remote call, kept for the user-facing notification.
#[derive(Debug, Clone)]
pub struct RpcFailure {
    pub operation: &'static str,
    pub node_id: Option<String>,
    pub error: SyncError,
}

/// Outcome of a reconcile pass. Reconciliation is not atomic: `applied`
/// operations are already persisted even when `failures` is non-empty, and
/// the failed operations remain pending for the next save.
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    pub applied: usize,
    pub failures: Vec<RpcFailure>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl CanvasState {
    /// Replays pending deletions, creations, updates, and finally the edge
    /// sync, sequentially. Each success clears its own pending mark
    /// immediately, so a partial failure retries only what is still unsaved.
    pub fn reconcile(&mut self, api: &mut dyn WorkflowApi) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        let deletions: Vec<String> = self.pending_deletions.iter().cloned().sorted().collect();
        for id in deletions {
            match api.delete_node(&id) {
                Ok(()) => {
                    self.pending_deletions.remove(&id);
                    report.applied += 1;
                }
                Err(error) => record(&mut report, "deleteNode", Some(id), error),
            }
        }

        let creations: Vec<String> = self.pending_creations.iter().cloned().sorted().collect();
        for id in creations {
            // A pending id without a node means it was removed again before
            // ever being saved; just drop the mark.
            let Some(node) = self.nodes.get(&id) else {
                self.pending_creations.remove(&id);
                continue;
            };
            match api.create_node(node) {
                Ok(()) => {
                    self.pending_creations.remove(&id);
                    report.applied += 1;
                }
                Err(error) => record(&mut report, "createNode", Some(id), error),
            }
        }

        let updates: Vec<String> = self.pending_updates.iter().cloned().sorted().collect();
        for id in updates {
            let Some(node) = self.nodes.get(&id) else {
                self.pending_updates.remove(&id);
                continue;
            };
            match api.update_node(node) {
                Ok(()) => {
                    self.pending_updates.remove(&id);
                    report.applied += 1;
                }
                Err(error) => record(&mut report, "updateNode", Some(id), error),
            }
        }

        if self.edges_dirty {
            let edges: Vec<EdgeState> = self
                .edges
                .values()
                .sorted_by(|a, b| a.id.cmp(&b.id))
                .cloned()
                .collect();
            match api.sync_connections(&edges) {
                Ok(()) => {
                    self.edges_dirty = false;
                    report.applied += 1;
                }
                Err(error) => record(&mut report, "syncConnections", None, error),
            }
        }

        if report.is_clean() {
            tracing::debug!(applied = report.applied, "canvas reconciled");
        } else {
            tracing::warn!(
                applied = report.applied,
                failed = report.failures.len(),
                "canvas reconcile left pending operations"
            );
        }
        report
    }
}

fn record(
    report: &mut ReconcileReport,
    operation: &'static str,
    node_id: Option<String>,
    error: SyncError,
) {
    tracing::warn!(operation, node_id = node_id.as_deref(), %error, "remote call failed");
    report.failures.push(RpcFailure {
        operation,
        node_id,
        error,
    });
}
