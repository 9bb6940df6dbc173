//! Circle/ellipse primitive and its radius adjuster.

use super::{Geometry, Graph, MIN_EXTENT};
use crate::anchor::{self, AdjustType, AnchorHandle, CornerAnchor, EdgeAnchor};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A circle or axis-aligned ellipse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
}

impl Circle {
    /// Create a new circle/ellipse.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
        }
    }

    /// Create a uniform circle.
    pub fn uniform(center: Point, radius: f64) -> Self {
        Self::new(center, radius, radius)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius_x,
            self.center.y - self.radius_y,
            self.center.x + self.radius_x,
            self.center.y + self.radius_y,
        )
    }

    pub(crate) fn anchor_positions(&self) -> Vec<(AdjustType, Point)> {
        let bounds = self.bounds();
        vec![
            (
                AdjustType::Edge(EdgeAnchor::Top),
                Point::new(self.center.x, bounds.y0),
            ),
            (
                AdjustType::Edge(EdgeAnchor::Right),
                Point::new(bounds.x1, self.center.y),
            ),
            (
                AdjustType::Edge(EdgeAnchor::Bottom),
                Point::new(self.center.x, bounds.y1),
            ),
            (
                AdjustType::Edge(EdgeAnchor::Left),
                Point::new(bounds.x0, self.center.y),
            ),
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
        ]
    }
}

/// Adjust a circle graph from one of its anchors.
///
/// Edge anchors control one radius; corner anchors apply a uniform delta to
/// both radii. Radii are recomputed from the drag-start snapshot plus the
/// pointer delta, floored at [`MIN_EXTENT`], and all sibling handles are
/// repositioned to the new geometry.
pub(crate) fn adjust(
    graph: &mut Graph,
    snapshot: &Geometry,
    active: AdjustType,
    handles: &mut [AnchorHandle],
    start: Point,
    current: Point,
) {
    let Geometry::Circle(snap) = snapshot else {
        return;
    };
    let Geometry::Circle(live) = &mut graph.geometry else {
        return;
    };
    let delta = Vec2::new(current.x - start.x, current.y - start.y);

    match active {
        AdjustType::Edge(EdgeAnchor::Right) => {
            live.radius_x = (snap.radius_x + delta.x).max(MIN_EXTENT);
        }
        AdjustType::Edge(EdgeAnchor::Left) => {
            live.radius_x = (snap.radius_x - delta.x).max(MIN_EXTENT);
        }
        AdjustType::Edge(EdgeAnchor::Bottom) => {
            live.radius_y = (snap.radius_y + delta.y).max(MIN_EXTENT);
        }
        AdjustType::Edge(EdgeAnchor::Top) => {
            live.radius_y = (snap.radius_y - delta.y).max(MIN_EXTENT);
        }
        AdjustType::Corner(corner) => {
            // Uniform resize: the outward component of the delta, averaged
            // over both axes, applied to both radii.
            let (sx, sy) = corner.outward();
            let uniform = (sx * delta.x + sy * delta.y) / 2.0;
            live.radius_x = (snap.radius_x + uniform).max(MIN_EXTENT);
            live.radius_y = (snap.radius_y + uniform).max(MIN_EXTENT);
        }
        AdjustType::Vertex(_) => {}
    }

    graph.sync_anchor_sources();
    anchor::track_sources(graph, handles, active);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle_graph() -> Graph {
        Graph::circle(Point::new(50.0, 50.0), 20.0, 20.0)
    }

    #[test]
    fn test_edge_right_grows_radius_x() {
        let mut graph = circle_graph();
        let snapshot = graph.geometry.clone();

        adjust(
            &mut graph,
            &snapshot,
            AdjustType::Edge(EdgeAnchor::Right),
            &mut [],
            Point::new(70.0, 50.0),
            Point::new(85.0, 50.0),
        );

        let Geometry::Circle(live) = &graph.geometry else {
            panic!("expected circle");
        };
        assert!((live.radius_x - 35.0).abs() < f64::EPSILON);
        assert!((live.radius_y - 20.0).abs() < f64::EPSILON);
        assert!((live.center.x - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_edge_top_grows_radius_y_upward() {
        let mut graph = circle_graph();
        let snapshot = graph.geometry.clone();

        adjust(
            &mut graph,
            &snapshot,
            AdjustType::Edge(EdgeAnchor::Top),
            &mut [],
            Point::new(50.0, 30.0),
            Point::new(50.0, 10.0),
        );

        let Geometry::Circle(live) = &graph.geometry else {
            panic!("expected circle");
        };
        assert!((live.radius_y - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_radius_clamped_at_minimum() {
        let mut graph = circle_graph();
        let snapshot = graph.geometry.clone();

        // Drag the right edge far past the center.
        adjust(
            &mut graph,
            &snapshot,
            AdjustType::Edge(EdgeAnchor::Right),
            &mut [],
            Point::new(70.0, 50.0),
            Point::new(-100.0, 50.0),
        );

        let Geometry::Circle(live) = &graph.geometry else {
            panic!("expected circle");
        };
        assert!((live.radius_x - MIN_EXTENT).abs() < f64::EPSILON);
        assert!(live.radius_x > 0.0);
    }

    #[test]
    fn test_corner_uniform_resize() {
        let mut graph = circle_graph();
        let snapshot = graph.geometry.clone();

        adjust(
            &mut graph,
            &snapshot,
            AdjustType::Corner(CornerAnchor::BottomRight),
            &mut [],
            Point::new(70.0, 70.0),
            Point::new(80.0, 80.0),
        );

        let Geometry::Circle(live) = &graph.geometry else {
            panic!("expected circle");
        };
        assert!((live.radius_x - 30.0).abs() < f64::EPSILON);
        assert!((live.radius_y - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sources_track_geometry() {
        let mut graph = circle_graph();
        let snapshot = graph.geometry.clone();

        adjust(
            &mut graph,
            &snapshot,
            AdjustType::Edge(EdgeAnchor::Right),
            &mut [],
            Point::new(70.0, 50.0),
            Point::new(90.0, 50.0),
        );

        let right = graph
            .source_for(AdjustType::Edge(EdgeAnchor::Right))
            .unwrap();
        assert!((right.position.x - 90.0).abs() < f64::EPSILON);
    }
}
