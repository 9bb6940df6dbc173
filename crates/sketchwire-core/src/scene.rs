//! Scene: the node arena, paint order, history and redraw bookkeeping.

use crate::graphs::{Graph, NodeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Maximum number of committed history entries to keep.
pub const MAX_HISTORY: usize = 50;

/// Visual layers that can be repainted independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Graph primitives and their anchor handles.
    Graph,
    /// Connection lines between primitives.
    Link,
    /// Transient previews (drag ghosts, guides).
    Preview,
}

/// Notifications emitted by the scene for the host to drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    /// The selection set changed; carries the new set (possibly empty).
    SelectionChange(Vec<NodeId>),
}

/// A primitive plus its scene bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub graph: Graph,
    /// Paint-order rank; higher paints on top.
    pub z_index: u32,
    pub opacity: f64,
    /// Whether the node receives pointer interaction.
    pub listening: bool,
    pub selected: bool,
    /// Saved while selected, restored on deselect.
    #[serde(skip)]
    pub press_position: Option<Point>,
    #[serde(skip)]
    pub prior_opacity: Option<f64>,
    #[serde(skip)]
    pub prior_z_index: Option<u32>,
}

impl GraphNode {
    fn new(graph: Graph, z_index: u32) -> Self {
        Self {
            graph,
            z_index,
            opacity: 1.0,
            listening: true,
            selected: false,
            press_position: None,
            prior_opacity: None,
            prior_z_index: None,
        }
    }
}

/// One committed history entry: the full node table and insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SceneSnapshot {
    nodes: HashMap<NodeId, GraphNode>,
    insertion: Vec<NodeId>,
}

/// Scene errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The scene: all graph primitives, keyed by id.
///
/// Also owns the cross-cutting bookkeeping the interaction controllers rely
/// on: the committed-state history, the scoped-redraw accumulator, the
/// outbound event queue, and the link-selection flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    nodes: HashMap<NodeId, GraphNode>,
    /// Insertion order; breaks z-index ties so raising several nodes to the
    /// same rank preserves their relative stacking.
    insertion: Vec<NodeId>,
    #[serde(skip)]
    history: Vec<SceneSnapshot>,
    #[serde(skip)]
    history_cursor: usize,
    #[serde(skip)]
    dirty: BTreeSet<Layer>,
    #[serde(skip)]
    events: Vec<SceneEvent>,
    #[serde(skip)]
    link_selection: Vec<NodeId>,
    #[serde(skip)]
    link_points_visible: bool,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a graph to the scene, assigning the next paint rank.
    pub fn add_graph(&mut self, graph: Graph) -> NodeId {
        let id = graph.id;
        let node = GraphNode::new(graph, self.insertion.len() as u32);
        self.insertion.push(id);
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node from the scene.
    pub fn remove(&mut self, id: NodeId) -> Option<GraphNode> {
        self.insertion.retain(|&n| n != id);
        self.nodes.remove(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut GraphNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.insertion.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.insertion.iter().copied()
    }

    /// Node ids sorted back-to-front for painting.
    pub fn paint_order(&self) -> Vec<NodeId> {
        let mut order: Vec<(usize, NodeId)> = self.insertion.iter().copied().enumerate().collect();
        order.sort_by_key(|&(seq, id)| {
            (self.nodes.get(&id).map_or(0, |n| n.z_index), seq)
        });
        order.into_iter().map(|(_, id)| id).collect()
    }

    /// Highest z-index among interactive nodes.
    pub fn max_listening_z(&self) -> Option<u32> {
        self.nodes
            .values()
            .filter(|n| n.listening)
            .map(|n| n.z_index)
            .max()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // --- History ---

    fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            nodes: self.nodes.clone(),
            insertion: self.insertion.clone(),
        }
    }

    fn restore(&mut self, snapshot: SceneSnapshot) {
        self.nodes = snapshot.nodes;
        self.insertion = snapshot.insertion;
    }

    /// Append the current full scene state as one undo step.
    ///
    /// Entries past the cursor (undone states) are discarded, and the oldest
    /// entry is dropped once [`MAX_HISTORY`] is exceeded.
    pub fn commit_history(&mut self) {
        if !self.history.is_empty() {
            self.history.truncate(self.history_cursor + 1);
        }
        self.history.push(self.snapshot());
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
        self.history_cursor = self.history.len() - 1;
        log::debug!("history commit ({} entries)", self.history.len());
    }

    /// Step back to the previous committed state.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.history_cursor == 0 || self.history.is_empty() {
            return false;
        }
        self.history_cursor -= 1;
        let snapshot = self.history[self.history_cursor].clone();
        self.restore(snapshot);
        true
    }

    /// Step forward to the next committed state.
    /// Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if self.history.is_empty() || self.history_cursor + 1 >= self.history.len() {
            return false;
        }
        self.history_cursor += 1;
        let snapshot = self.history[self.history_cursor].clone();
        self.restore(snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history_cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.history.is_empty() && self.history_cursor + 1 < self.history.len()
    }

    /// Number of committed history entries.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // --- Scoped redraw ---

    /// Mark the given layers as needing a repaint.
    pub fn request_redraw(&mut self, layers: &[Layer]) {
        self.dirty.extend(layers.iter().copied());
    }

    /// Drain the set of layers needing a repaint.
    pub fn take_redraw(&mut self) -> Vec<Layer> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }

    // --- Events ---

    /// Queue a notification for the host.
    pub fn emit(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Drain queued notifications in emission order.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Link selection (connection lines) ---

    /// Mark a connection line as selected.
    pub fn select_link(&mut self, id: NodeId) {
        if !self.link_selection.contains(&id) {
            self.link_selection.push(id);
        }
    }

    pub fn link_selection(&self) -> &[NodeId] {
        &self.link_selection
    }

    /// Clear any connection-line selection.
    pub fn clear_link_selection(&mut self) {
        self.link_selection.clear();
    }

    /// Show or hide the connection-point indicators.
    pub fn set_link_points_visible(&mut self, visible: bool) {
        self.link_points_visible = visible;
    }

    pub fn link_points_visible(&self) -> bool {
        self.link_points_visible
    }

    // --- Persistence ---

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }
}
