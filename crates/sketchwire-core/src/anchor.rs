//! Anchors: the adjustable control points of a graph primitive.
//!
//! Each primitive carries a set of [`AnchorDescriptor`]s (logical degrees of
//! freedom) backed by hidden [`AnchorSource`] markers that track position and
//! size. The visible, interactive [`AnchorHandle`]s are rebuilt from the
//! sources on every redraw pass and are never the authoritative geometry.

use crate::adjust::AdjustState;
use crate::graphs::{Graph, GraphKind, NodeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Radius of an anchor handle, in stage units.
pub const ANCHOR_SIZE: f64 = 6.0;

/// Hit-test tolerance around a handle, in screen pixels.
pub const ANCHOR_HIT_TOLERANCE: f64 = 12.0;

/// Opacity applied to sibling handles while one of them is being dragged.
pub const SIBLING_DIM_OPACITY: f64 = 0.3;

/// Steady-state handle color.
pub const ANCHOR_COLOR: Rgba = Rgba::new(0, 0, 255, 51);

/// Color of the handle currently being dragged.
pub const ANCHOR_ACTIVE_COLOR: Rgba = Rgba::new(0, 0, 255, 204);

/// An RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Edge anchors resize along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeAnchor {
    Top,
    Right,
    Bottom,
    Left,
}

/// Corner anchors resize both axes at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CornerAnchor {
    /// Sign of the outward direction on each axis.
    pub fn outward(self) -> (f64, f64) {
        match self {
            CornerAnchor::TopLeft => (-1.0, -1.0),
            CornerAnchor::TopRight => (1.0, -1.0),
            CornerAnchor::BottomLeft => (-1.0, 1.0),
            CornerAnchor::BottomRight => (1.0, 1.0),
        }
    }
}

/// Which geometric degree of freedom an anchor controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustType {
    /// Edge midpoint (rect) or cardinal point (circle).
    Edge(EdgeAnchor),
    /// Bounding-box corner.
    Corner(CornerAnchor),
    /// Polyline vertex by index.
    Vertex(usize),
}

impl AdjustType {
    /// Cursor hint shown while this anchor is hovered or dragged.
    pub fn cursor(self) -> Cursor {
        match self {
            AdjustType::Edge(EdgeAnchor::Left | EdgeAnchor::Right) => Cursor::EwResize,
            AdjustType::Edge(EdgeAnchor::Top | EdgeAnchor::Bottom) => Cursor::NsResize,
            AdjustType::Corner(CornerAnchor::TopLeft | CornerAnchor::BottomRight) => {
                Cursor::NwseResize
            }
            AdjustType::Corner(CornerAnchor::TopRight | CornerAnchor::BottomLeft) => {
                Cursor::NeswResize
            }
            AdjustType::Vertex(_) => Cursor::Move,
        }
    }
}

/// Pointer cursor hints the host maps onto its windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Move,
    EwResize,
    NsResize,
    NwseResize,
    NeswResize,
}

/// Paint style of a handle: stroked outline or filled disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlePaint {
    Stroke,
    Fill,
}

/// A logical anchor on a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorDescriptor {
    pub adjust_type: AdjustType,
}

/// Hidden marker carrying an anchor's current position, size and owner kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorSource {
    pub adjust_type: AdjustType,
    pub position: Point,
    pub size: f64,
    pub kind: GraphKind,
}

impl AnchorSource {
    /// A source with non-finite coordinates or a degenerate size cannot
    /// produce a handle.
    pub fn is_renderable(&self) -> bool {
        self.position.x.is_finite() && self.position.y.is_finite() && self.size > 0.0
    }
}

/// The visible, interactive handle rendered for an anchor.
///
/// Handles are ephemeral: rebuilt on every redraw pass, they hold only a
/// back-reference to their graph, never a copy of its geometry.
#[derive(Debug, Clone)]
pub struct AnchorHandle {
    pub graph_id: NodeId,
    pub adjust_type: AdjustType,
    pub position: Point,
    pub radius: f64,
    pub paint: HandlePaint,
    pub color: Rgba,
    pub opacity: f64,
    pub cursor: Cursor,
    pub adjusting: bool,
}

impl AnchorHandle {
    /// Check whether a stage point falls on this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        let reach = self.radius + tolerance;
        dx * dx + dy * dy <= reach * reach
    }

    /// Restore the steady-state appearance after a drag ends.
    pub(crate) fn reset_steady(&mut self) {
        self.adjusting = false;
        self.opacity = 1.0;
        self.color = ANCHOR_COLOR;
        self.cursor = Cursor::Default;
    }
}

/// Build the visible handle for one anchor of a graph.
///
/// Returns `None` when the backing source is missing or malformed; the
/// anchor is simply not renderable right now, which is not an error. When a
/// drag is in progress on this graph, the held handle is recreated in its
/// active state and its siblings are dimmed, so a mid-drag rebuild does not
/// visually reset the gesture.
pub fn create_anchor_handle(
    graph: &Graph,
    descriptor: &AnchorDescriptor,
    state: &AdjustState,
) -> Option<AnchorHandle> {
    let source = graph.source_for(descriptor.adjust_type)?;
    if !source.is_renderable() {
        return None;
    }

    let paint = match source.kind {
        GraphKind::Line => HandlePaint::Fill,
        GraphKind::Circle | GraphKind::Rect => HandlePaint::Stroke,
    };

    let mut handle = AnchorHandle {
        graph_id: graph.id,
        adjust_type: descriptor.adjust_type,
        position: source.position,
        radius: source.size,
        paint,
        color: ANCHOR_COLOR,
        opacity: 1.0,
        cursor: Cursor::Default,
        adjusting: false,
    };

    if state.adjusting && state.adjust_group_id == Some(graph.id) {
        if state.adjust_type == Some(descriptor.adjust_type) {
            handle.adjusting = true;
            handle.color = ANCHOR_ACTIVE_COLOR;
            handle.cursor = descriptor.adjust_type.cursor();
        } else {
            handle.opacity = SIBLING_DIM_OPACITY;
        }
    }

    Some(handle)
}

/// Reposition a graph's handles from its anchor sources mid-drag: the active
/// handle keeps full opacity and its resize cursor, siblings are dimmed.
pub(crate) fn track_sources(graph: &Graph, handles: &mut [AnchorHandle], active: AdjustType) {
    for handle in handles.iter_mut().filter(|h| h.graph_id == graph.id) {
        if let Some(source) = graph.source_for(handle.adjust_type) {
            handle.position = source.position;
        }
        if handle.adjust_type == active {
            handle.opacity = 1.0;
            handle.cursor = active.cursor();
        } else {
            handle.opacity = SIBLING_DIM_OPACITY;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_hit_test() {
        let graph = Graph::rect(Point::new(0.0, 0.0), 10.0, 10.0);
        let handle = AnchorHandle {
            graph_id: graph.id,
            adjust_type: AdjustType::Corner(CornerAnchor::TopLeft),
            position: Point::new(50.0, 50.0),
            radius: ANCHOR_SIZE,
            paint: HandlePaint::Stroke,
            color: ANCHOR_COLOR,
            opacity: 1.0,
            cursor: Cursor::Default,
            adjusting: false,
        };

        assert!(handle.hit_test(Point::new(50.0, 50.0), 0.0));
        assert!(handle.hit_test(Point::new(55.0, 50.0), 0.0));
        assert!(!handle.hit_test(Point::new(70.0, 70.0), 0.0));
        assert!(handle.hit_test(Point::new(65.0, 50.0), 10.0));
    }

    #[test]
    fn test_factory_builds_from_source() {
        let graph = Graph::rect(Point::new(10.0, 10.0), 50.0, 50.0);
        let state = AdjustState::default();
        let descriptor = AnchorDescriptor {
            adjust_type: AdjustType::Corner(CornerAnchor::BottomRight),
        };

        let handle = create_anchor_handle(&graph, &descriptor, &state).unwrap();
        assert_eq!(handle.graph_id, graph.id);
        assert!((handle.position.x - 60.0).abs() < f64::EPSILON);
        assert_eq!(handle.paint, HandlePaint::Stroke);
        assert!(!handle.adjusting);
    }

    #[test]
    fn test_factory_missing_source_yields_none() {
        let graph = Graph::rect(Point::new(0.0, 0.0), 10.0, 10.0);
        let state = AdjustState::default();
        // No vertex anchors on a rectangle.
        let descriptor = AnchorDescriptor {
            adjust_type: AdjustType::Vertex(0),
        };
        assert!(create_anchor_handle(&graph, &descriptor, &state).is_none());
    }

    #[test]
    fn test_factory_malformed_source_yields_none() {
        let mut graph = Graph::rect(Point::new(0.0, 0.0), 10.0, 10.0);
        graph.sources[0].position = Point::new(f64::NAN, 0.0);
        let state = AdjustState::default();
        let descriptor = graph.anchors[0];
        assert!(create_anchor_handle(&graph, &descriptor, &state).is_none());
    }

    #[test]
    fn test_line_handles_are_filled() {
        let graph = Graph::line(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        let state = AdjustState::default();
        let handle = create_anchor_handle(&graph, &graph.anchors[0], &state).unwrap();
        assert_eq!(handle.paint, HandlePaint::Fill);
    }

    #[test]
    fn test_factory_keeps_active_state_mid_drag() {
        let graph = Graph::rect(Point::new(0.0, 0.0), 10.0, 10.0);
        let active = AdjustType::Corner(CornerAnchor::BottomRight);
        let state = AdjustState {
            adjusting: true,
            adjust_group_id: Some(graph.id),
            adjust_type: Some(active),
        };

        let held = create_anchor_handle(&graph, &AnchorDescriptor { adjust_type: active }, &state)
            .unwrap();
        assert!(held.adjusting);
        assert_eq!(held.color, ANCHOR_ACTIVE_COLOR);
        assert_eq!(held.cursor, Cursor::NwseResize);

        let sibling = create_anchor_handle(
            &graph,
            &AnchorDescriptor {
                adjust_type: AdjustType::Corner(CornerAnchor::TopLeft),
            },
            &state,
        )
        .unwrap();
        assert!(!sibling.adjusting);
        assert!((sibling.opacity - SIBLING_DIM_OPACITY).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cursor_hints() {
        assert_eq!(
            AdjustType::Edge(EdgeAnchor::Left).cursor(),
            Cursor::EwResize
        );
        assert_eq!(AdjustType::Edge(EdgeAnchor::Top).cursor(), Cursor::NsResize);
        assert_eq!(
            AdjustType::Corner(CornerAnchor::TopRight).cursor(),
            Cursor::NeswResize
        );
        assert_eq!(AdjustType::Vertex(3).cursor(), Cursor::Move);
    }
}
