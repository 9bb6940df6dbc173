//! Selection transforms: select, clear, select-all and group moves.

use crate::graphs::NodeId;
use crate::scene::{Layer, Scene, SceneEvent};
use kurbo::Vec2;

/// Opacity multiplier applied to nodes while they are selected.
pub const SELECTED_OPACITY_FACTOR: f64 = 0.8;

/// Layers repainted when the selection changes.
const SELECT_LAYERS: [Layer; 2] = [Layer::Graph, Layer::Link];

/// Owns the ordered set of selected primitives.
///
/// Selecting a node saves its position, opacity and paint rank, disables its
/// interactivity, fades it and raises it to the top of the paint order;
/// clearing restores everything from the saved values. Selection and anchor
/// adjustment are mutually exclusive: selected nodes grow no anchor handles.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selecting: Vec<NodeId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected node ids, in selection order.
    pub fn selecting(&self) -> &[NodeId] {
        &self.selecting
    }

    /// Replace the selection with the given nodes.
    ///
    /// Always notifies with the new set, even an empty one; the internal
    /// clear of the previous selection is silent so callers see exactly one
    /// notification per call.
    pub fn select(&mut self, scene: &mut Scene, ids: &[NodeId]) {
        // Selection kinds are mutually exclusive.
        scene.clear_link_selection();

        scene.emit(SceneEvent::SelectionChange(ids.to_vec()));

        self.selecting_clear(scene, true);

        if !ids.is_empty() {
            let max_z = scene.max_listening_z().unwrap_or(0);

            for &id in ids {
                let Some(node) = scene.get_mut(id) else { continue };
                node.press_position = Some(node.graph.position());
                node.prior_opacity = Some(node.opacity);
                node.prior_z_index = Some(node.z_index);
                node.selected = true;
                node.listening = false;
                node.opacity *= SELECTED_OPACITY_FACTOR;
            }

            // Raise in ascending original rank so relative stacking inside
            // the selection is preserved.
            let mut by_rank: Vec<NodeId> = ids
                .iter()
                .copied()
                .filter(|&id| scene.contains(id))
                .collect();
            by_rank.sort_by_key(|&id| {
                scene
                    .get(id)
                    .and_then(|n| n.prior_z_index)
                    .unwrap_or_default()
            });
            for id in by_rank {
                if let Some(node) = scene.get_mut(id) {
                    node.z_index = max_z;
                }
            }

            self.selecting = ids.to_vec();
            log::debug!("selected {} nodes", self.selecting.len());
        }

        scene.request_redraw(&SELECT_LAYERS);
    }

    /// Clear the selection, restoring each node's saved attributes.
    ///
    /// Notifies with an empty set unless `silent` or nothing was selected.
    pub fn selecting_clear(&mut self, scene: &mut Scene, silent: bool) {
        if !self.selecting.is_empty() && !silent {
            scene.emit(SceneEvent::SelectionChange(Vec::new()));
        }

        let mut ids = std::mem::take(&mut self.selecting);

        // Restore in ascending saved rank, mirroring how they were raised.
        ids.sort_by_key(|&id| {
            scene
                .get(id)
                .and_then(|n| n.prior_z_index)
                .unwrap_or_default()
        });
        for id in &ids {
            let Some(node) = scene.get_mut(*id) else { continue };
            node.listening = true;
            node.opacity = node.prior_opacity.unwrap_or(1.0);
            if let Some(z) = node.prior_z_index {
                node.z_index = z;
            }
        }
        for id in &ids {
            let Some(node) = scene.get_mut(*id) else { continue };
            node.press_position = None;
            node.prior_opacity = None;
            node.prior_z_index = None;
            node.selected = false;
        }

        scene.set_link_points_visible(false);

        scene.request_redraw(&SELECT_LAYERS);
    }

    /// Select every drawable primitive in the scene.
    pub fn select_all(&mut self, scene: &mut Scene) {
        let ids = scene.paint_order();
        self.select(scene, &ids);
    }

    /// Translate every selected node by an offset.
    ///
    /// Used during a group drag; emits nothing, repaints nothing and commits
    /// nothing; that is the caller's responsibility.
    pub fn selecting_nodes_move(&mut self, scene: &mut Scene, offset: Vec2) {
        for &id in &self.selecting {
            if let Some(node) = scene.get_mut(id) {
                node.graph.translate(offset);
            }
        }
    }
}
