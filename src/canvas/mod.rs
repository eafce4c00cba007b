//! Optimistic canvas state for the workflow graph editor.
//!
//! The editor mutates nodes and edges locally and keeps a three-set dirty
//! tracker (created/updated/deleted ids) plus an edge-sync flag. A manual
//! save runs [`CanvasState::reconcile`], which replays the pending operations
//! against the remote API one at a time. Local state stays the source of
//! truth until a save succeeds; a failed call is reported, never rolled back.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::config::NodeConfig;

mod reconcile;

pub use reconcile::{ReconcileReport, RpcFailure, WorkflowApi};

/// Canvas position of a node, in editor coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One node as the editor sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeState {
    pub id: String,
    pub label: String,
    pub position: Position,
    /// Unconfigured nodes are allowed on the canvas; they just cannot run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<NodeConfig>,
}

/// One edge as the editor sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeState {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

/// Arena of nodes and edges keyed by id, with pending-operation sets.
#[derive(Debug, Clone, Default)]
pub struct CanvasState {
    nodes: AHashMap<String, NodeState>,
    edges: AHashMap<String, EdgeState>,
    pending_creations: AHashSet<String>,
    pending_updates: AHashSet<String>,
    pending_deletions: AHashSet<String>,
    edges_dirty: bool,
}

impl CanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the canvas from a saved workflow; nothing is marked dirty.
    pub fn from_saved(
        nodes: impl IntoIterator<Item = NodeState>,
        edges: impl IntoIterator<Item = EdgeState>,
    ) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
            edges: edges.into_iter().map(|e| (e.id.clone(), e)).collect(),
            ..Self::default()
        }
    }

    pub fn node(&self, id: &str) -> Option<&NodeState> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeState> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeState> {
        self.edges.values()
    }

    /// Whether any local change has not been saved yet.
    pub fn is_dirty(&self) -> bool {
        self.edges_dirty
            || !self.pending_creations.is_empty()
            || !self.pending_updates.is_empty()
            || !self.pending_deletions.is_empty()
    }

    pub fn add_node(&mut self, node: NodeState) {
        self.pending_creations.insert(node.id.clone());
        self.pending_deletions.remove(&node.id);
        self.nodes.insert(node.id.clone(), node);
    }

    /// Edits a node in place. Returns false when the id is unknown.
    pub fn update_node(&mut self, id: &str, edit: impl FnOnce(&mut NodeState)) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        edit(node);
        // A node that has never been persisted stays a pending creation; the
        // eventual create call carries the latest state anyway.
        if !self.pending_creations.contains(id) {
            self.pending_updates.insert(id.to_string());
        }
        true
    }

    /// Removes a node and every edge touching it.
    pub fn remove_node(&mut self, id: &str) {
        if self.nodes.remove(id).is_none() {
            return;
        }
        // Deleting a node that only ever existed locally needs no remote call.
        if !self.pending_creations.remove(id) {
            self.pending_deletions.insert(id.to_string());
        }
        self.pending_updates.remove(id);

        let before = self.edges.len();
        self.edges
            .retain(|_, edge| edge.source != id && edge.target != id);
        if self.edges.len() != before {
            self.edges_dirty = true;
        }
    }

    pub fn add_edge(&mut self, edge: EdgeState) {
        self.edges.insert(edge.id.clone(), edge);
        self.edges_dirty = true;
    }

    pub fn remove_edge(&mut self, id: &str) {
        if self.edges.remove(id).is_some() {
            self.edges_dirty = true;
        }
    }
}
