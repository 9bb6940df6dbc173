//! Drag-based anchor adjustment of graph primitives.
//!
//! [`GraphAdjustController`] owns the press → move → release state machine.
//! Anchor handles are rebuilt from their sources on every redraw pass
//! ([`GraphAdjustController::rebuild_handles`]), but the pointer surface is
//! the controller itself: `on_press` routes a press to the handle under the
//! pointer, while `on_move` / `on_release` are stage-global, so a rebuild
//! mid-gesture never loses the drag.

use crate::anchor::{
    ANCHOR_ACTIVE_COLOR, ANCHOR_HIT_TOLERANCE, AdjustType, AnchorHandle, create_anchor_handle,
};
use crate::attract::AttractTool;
use crate::graphs::{self, Graph, GraphKind, NodeId};
use crate::scene::{Layer, Scene};
use crate::viewport::Viewport;
use kurbo::Point;

/// Layers repainted while an adjustment is in flight, so connection lines
/// and previews stay consistent with the new geometry.
const ADJUST_LAYERS: [Layer; 3] = [Layer::Graph, Layer::Link, Layer::Preview];

/// The singleton drag state: at most one anchor drag exists system-wide.
#[derive(Debug, Clone, Default)]
pub struct AdjustState {
    /// Whether a drag is in progress.
    pub adjusting: bool,
    /// Id of the graph being adjusted.
    pub adjust_group_id: Option<NodeId>,
    /// The anchor being dragged.
    pub adjust_type: Option<AdjustType>,
}

impl AdjustState {
    fn clear(&mut self) {
        self.adjusting = false;
        self.adjust_group_id = None;
        self.adjust_type = None;
    }
}

/// Orchestrates the anchor-drag lifecycle across all primitives.
#[derive(Debug, Default)]
pub struct GraphAdjustController {
    state: AdjustState,
    /// Pointer position at drag start, in stage coordinates (unsnapped).
    start_point: Point,
    /// Deep copy of the graph at drag start; the reference for all delta
    /// computation, so intermediate moves never accumulate error.
    snapshot: Option<Graph>,
    /// Handles built on the last rebuild pass.
    handles: Vec<AnchorHandle>,
}

impl GraphAdjustController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AdjustState {
        &self.state
    }

    pub fn handles(&self) -> &[AnchorHandle] {
        &self.handles
    }

    /// Build phase, run on every redraw pass: create a handle for each
    /// anchor of each unselected graph whose source resolves. Mid-drag, the
    /// held handle is recreated in its active state.
    pub fn rebuild_handles(&mut self, scene: &Scene) {
        self.handles.clear();
        for id in scene.paint_order() {
            let Some(node) = scene.get(id) else { continue };
            // Selected graphs are moved as a group, not adjusted.
            if node.selected {
                continue;
            }
            for descriptor in &node.graph.anchors {
                if let Some(handle) = create_anchor_handle(&node.graph, descriptor, &self.state) {
                    self.handles.push(handle);
                }
            }
        }
    }

    /// Pointer press: start a drag if the pointer lands on a handle.
    ///
    /// Records the adjust type and owning graph, captures the unsnapped
    /// stage point and a geometry snapshot. An unresolvable pointer, or a
    /// drag already in progress, leaves the controller untouched.
    /// Returns true when a drag started.
    pub fn on_press(&mut self, scene: &Scene, viewport: &Viewport) -> bool {
        if self.state.adjusting {
            return false;
        }
        let Some(pos) = viewport.stage_point() else {
            return false;
        };
        let tolerance = ANCHOR_HIT_TOLERANCE / viewport.zoom;
        // Topmost handle wins.
        let Some(index) = self
            .handles
            .iter()
            .rposition(|h| h.hit_test(pos, tolerance))
        else {
            return false;
        };
        let graph_id = self.handles[index].graph_id;
        let adjust_type = self.handles[index].adjust_type;
        let Some(node) = scene.get(graph_id) else {
            return false;
        };

        self.state.adjusting = true;
        self.state.adjust_group_id = Some(graph_id);
        self.state.adjust_type = Some(adjust_type);
        let held = &mut self.handles[index];
        held.adjusting = true;
        held.color = ANCHOR_ACTIVE_COLOR;
        held.cursor = adjust_type.cursor();
        self.start_point = pos;
        self.snapshot = Some(node.graph.clone());
        log::debug!("adjust start: {graph_id} {adjust_type:?}");
        true
    }

    /// Pointer move: recompute geometry from the snapshot and the snapped
    /// pointer delta, then request a scoped redraw.
    ///
    /// A move while idle is a no-op; an unresolvable pointer skips this
    /// frame; a vanished graph cancels the drag without a history commit.
    pub fn on_move(&mut self, scene: &mut Scene, viewport: &Viewport, attract: &mut AttractTool) {
        if !self.state.adjusting {
            return;
        }
        let (Some(graph_id), Some(adjust_type)) =
            (self.state.adjust_group_id, self.state.adjust_type)
        else {
            return;
        };
        if !scene.contains(graph_id) {
            log::warn!("adjusted graph {graph_id} vanished; cancelling drag");
            self.cancel(attract);
            return;
        }
        let Some(raw) = viewport.stage_point() else {
            // Pointer off-stage: skip this frame, keep dragging.
            return;
        };
        let current = attract.attract_point(raw, scene, Some(graph_id));

        let Self {
            snapshot, handles, ..
        } = self;
        let Some(snapshot) = snapshot.as_ref() else {
            return;
        };
        let Some(node) = scene.get_mut(graph_id) else {
            return;
        };
        match node.graph.kind() {
            GraphKind::Circle => graphs::adjust_circle(
                &mut node.graph,
                &snapshot.geometry,
                adjust_type,
                handles,
                self.start_point,
                current,
            ),
            GraphKind::Rect => graphs::adjust_rect(
                &mut node.graph,
                &snapshot.geometry,
                adjust_type,
                handles,
                self.start_point,
                current,
            ),
            GraphKind::Line => graphs::adjust_line(
                &mut node.graph,
                &snapshot.geometry,
                adjust_type,
                handles,
                self.start_point,
                current,
            ),
        }

        scene.request_redraw(&ADJUST_LAYERS);
    }

    /// Pointer release: commit one history entry for the whole drag, then
    /// reset the controller unconditionally.
    ///
    /// Releasing while idle is a harmless no-op reset.
    pub fn on_release(&mut self, scene: &mut Scene, attract: &mut AttractTool) {
        if self.state.adjusting {
            match self.state.adjust_group_id {
                Some(graph_id) if scene.contains(graph_id) => {
                    scene.commit_history();
                    scene.request_redraw(&ADJUST_LAYERS);
                    log::debug!("adjust end: {graph_id}");
                }
                Some(graph_id) => {
                    log::warn!("adjusted graph {graph_id} vanished; dropping drag");
                }
                None => {}
            }
        }
        self.reset(attract);
    }

    /// Cancel the in-flight drag without committing.
    fn cancel(&mut self, attract: &mut AttractTool) {
        self.reset(attract);
    }

    /// Clear the drag state, restore handle visuals, drop the snapshot and
    /// clear any alignment guides. Every exit path from a drag ends here.
    fn reset(&mut self, attract: &mut AttractTool) {
        self.state.clear();
        for handle in &mut self.handles {
            handle.reset_steady();
        }
        self.snapshot = None;
        attract.clear_guides();
    }
}
