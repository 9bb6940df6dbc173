//! Rectangle primitive and its corner/edge adjuster.

use super::{Geometry, Graph, MIN_EXTENT};
use crate::anchor::{self, AdjustType, AnchorHandle, CornerAnchor, EdgeAnchor};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            position,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self::new(
            Point::new(p1.x.min(p2.x), p1.y.min(p2.y)),
            (p2.x - p1.x).abs(),
            (p2.y - p1.y).abs(),
        )
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    pub(crate) fn anchor_positions(&self) -> Vec<(AdjustType, Point)> {
        let bounds = self.bounds();
        let center = bounds.center();
        vec![
            (
                AdjustType::Corner(CornerAnchor::TopLeft),
                Point::new(bounds.x0, bounds.y0),
            ),
            (
                AdjustType::Corner(CornerAnchor::TopRight),
                Point::new(bounds.x1, bounds.y0),
            ),
            (
                AdjustType::Corner(CornerAnchor::BottomRight),
                Point::new(bounds.x1, bounds.y1),
            ),
            (
                AdjustType::Corner(CornerAnchor::BottomLeft),
                Point::new(bounds.x0, bounds.y1),
            ),
            (
                AdjustType::Edge(EdgeAnchor::Top),
                Point::new(center.x, bounds.y0),
            ),
            (
                AdjustType::Edge(EdgeAnchor::Right),
                Point::new(bounds.x1, center.y),
            ),
            (
                AdjustType::Edge(EdgeAnchor::Bottom),
                Point::new(center.x, bounds.y1),
            ),
            (
                AdjustType::Edge(EdgeAnchor::Left),
                Point::new(bounds.x0, center.y),
            ),
        ]
    }
}

/// Resolve one axis of a resize: the moved side follows the pointer, the
/// opposite side stays fixed, and the extent never drops below
/// [`MIN_EXTENT`] (no flipping past the fixed side).
fn resize_axis(fixed: f64, moved: f64, moved_is_low: bool) -> (f64, f64) {
    if moved_is_low {
        let extent = (fixed - moved).max(MIN_EXTENT);
        (fixed - extent, extent)
    } else {
        let extent = (moved - fixed).max(MIN_EXTENT);
        (fixed, extent)
    }
}

/// Adjust a rectangle graph from one of its anchors.
///
/// Corner anchors resize both axes with the opposite corner fixed; edge
/// anchors resize one axis with the opposite edge fixed. Geometry is always
/// recomputed from the drag-start snapshot plus the pointer delta, and all
/// sibling handles are repositioned to the new geometry.
pub(crate) fn adjust(
    graph: &mut Graph,
    snapshot: &Geometry,
    active: AdjustType,
    handles: &mut [AnchorHandle],
    start: Point,
    current: Point,
) {
    let Geometry::Rect(snap) = snapshot else {
        return;
    };
    let Geometry::Rect(live) = &mut graph.geometry else {
        return;
    };
    let delta = Vec2::new(current.x - start.x, current.y - start.y);
    let bounds = snap.bounds();

    match active {
        AdjustType::Corner(corner) => {
            let (moved_x, fixed_x, x_low, moved_y, fixed_y, y_low) = match corner {
                CornerAnchor::TopLeft => (
                    bounds.x0 + delta.x,
                    bounds.x1,
                    true,
                    bounds.y0 + delta.y,
                    bounds.y1,
                    true,
                ),
                CornerAnchor::TopRight => (
                    bounds.x1 + delta.x,
                    bounds.x0,
                    false,
                    bounds.y0 + delta.y,
                    bounds.y1,
                    true,
                ),
                CornerAnchor::BottomLeft => (
                    bounds.x0 + delta.x,
                    bounds.x1,
                    true,
                    bounds.y1 + delta.y,
                    bounds.y0,
                    false,
                ),
                CornerAnchor::BottomRight => (
                    bounds.x1 + delta.x,
                    bounds.x0,
                    false,
                    bounds.y1 + delta.y,
                    bounds.y0,
                    false,
                ),
            };
            let (x, width) = resize_axis(fixed_x, moved_x, x_low);
            let (y, height) = resize_axis(fixed_y, moved_y, y_low);
            live.position = Point::new(x, y);
            live.width = width;
            live.height = height;
        }
        AdjustType::Edge(edge) => match edge {
            EdgeAnchor::Top => {
                let (y, height) = resize_axis(bounds.y1, bounds.y0 + delta.y, true);
                live.position.y = y;
                live.height = height;
            }
            EdgeAnchor::Bottom => {
                let (y, height) = resize_axis(bounds.y0, bounds.y1 + delta.y, false);
                live.position.y = y;
                live.height = height;
            }
            EdgeAnchor::Left => {
                let (x, width) = resize_axis(bounds.x1, bounds.x0 + delta.x, true);
                live.position.x = x;
                live.width = width;
            }
            EdgeAnchor::Right => {
                let (x, width) = resize_axis(bounds.x0, bounds.x1 + delta.x, false);
                live.position.x = x;
                live.width = width;
            }
        },
        AdjustType::Vertex(_) => {}
    }

    graph.sync_anchor_sources();
    anchor::track_sources(graph, handles, active);
}
