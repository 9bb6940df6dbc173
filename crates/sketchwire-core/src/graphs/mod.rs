//! Graph primitives: the drawable shapes of the diagram.

mod circle;
mod line;
mod rect;

pub use circle::Circle;
pub use line::Line;
pub use rect::Rectangle;

pub(crate) use circle::adjust as adjust_circle;
pub(crate) use line::adjust as adjust_line;
pub(crate) use rect::adjust as adjust_rect;

use crate::anchor::{ANCHOR_SIZE, AdjustType, AnchorDescriptor, AnchorSource};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for scene nodes.
pub type NodeId = Uuid;

/// Smallest extent (width, height or radius) a resize may produce.
pub const MIN_EXTENT: f64 = 1.0;

/// The kind of a graph primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphKind {
    Circle,
    Rect,
    Line,
}

/// Kind-specific geometry of a primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Geometry {
    Circle(Circle),
    Rect(Rectangle),
    Line(Line),
}

impl Geometry {
    pub fn kind(&self) -> GraphKind {
        match self {
            Geometry::Circle(_) => GraphKind::Circle,
            Geometry::Rect(_) => GraphKind::Rect,
            Geometry::Line(_) => GraphKind::Line,
        }
    }

    /// Bounding box in stage coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Geometry::Circle(c) => c.bounds(),
            Geometry::Rect(r) => r.bounds(),
            Geometry::Line(l) => l.bounds(),
        }
    }

    /// Translate the geometry by an offset.
    pub fn translate(&mut self, offset: Vec2) {
        match self {
            Geometry::Circle(c) => c.center += offset,
            Geometry::Rect(r) => r.position += offset,
            Geometry::Line(l) => {
                for p in &mut l.points {
                    *p += offset;
                }
            }
        }
    }

    /// The anchor set derived from the current geometry: one entry per
    /// adjustable degree of freedom, with its current stage position.
    pub(crate) fn anchor_positions(&self) -> Vec<(AdjustType, Point)> {
        match self {
            Geometry::Circle(c) => c.anchor_positions(),
            Geometry::Rect(r) => r.anchor_positions(),
            Geometry::Line(l) => l.anchor_positions(),
        }
    }
}

/// A drawn primitive: geometry plus its adjustable anchor set.
///
/// `anchors` lists the logical control points; `sources` are the hidden
/// markers carrying each anchor's current position and size. Sources are
/// recomputed from the geometry, never edited directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    pub id: NodeId,
    pub geometry: Geometry,
    pub anchors: Vec<AnchorDescriptor>,
    pub sources: Vec<AnchorSource>,
}

impl Graph {
    /// Create a graph for the given geometry with its full anchor set.
    pub fn new(geometry: Geometry) -> Self {
        let mut graph = Self {
            id: Uuid::new_v4(),
            geometry,
            anchors: Vec::new(),
            sources: Vec::new(),
        };
        graph.anchors = graph
            .geometry
            .anchor_positions()
            .into_iter()
            .map(|(adjust_type, _)| AnchorDescriptor { adjust_type })
            .collect();
        graph.sync_anchor_sources();
        graph
    }

    /// Create a circle/ellipse graph.
    pub fn circle(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self::new(Geometry::Circle(Circle::new(center, radius_x, radius_y)))
    }

    /// Create a rectangle graph.
    pub fn rect(position: Point, width: f64, height: f64) -> Self {
        Self::new(Geometry::Rect(Rectangle::new(position, width, height)))
    }

    /// Create a line/polyline graph.
    pub fn line(points: Vec<Point>) -> Self {
        Self::new(Geometry::Line(Line::from_points(points)))
    }

    pub fn kind(&self) -> GraphKind {
        self.geometry.kind()
    }

    pub fn bounds(&self) -> Rect {
        self.geometry.bounds()
    }

    /// Top-left of the bounding box; the reference point for group moves.
    pub fn position(&self) -> Point {
        let bounds = self.bounds();
        Point::new(bounds.x0, bounds.y0)
    }

    /// Translate the geometry and keep the anchor sources in step.
    pub fn translate(&mut self, offset: Vec2) {
        self.geometry.translate(offset);
        self.sync_anchor_sources();
    }

    /// Recompute the hidden anchor sources from the current geometry.
    pub fn sync_anchor_sources(&mut self) {
        let kind = self.kind();
        self.sources = self
            .geometry
            .anchor_positions()
            .into_iter()
            .map(|(adjust_type, position)| AnchorSource {
                adjust_type,
                position,
                size: ANCHOR_SIZE,
                kind,
            })
            .collect();
    }

    /// Find the anchor source backing a given adjust type, if any.
    pub fn source_for(&self, adjust_type: AdjustType) -> Option<&AnchorSource> {
        self.sources.iter().find(|s| s.adjust_type == adjust_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{CornerAnchor, EdgeAnchor};

    #[test]
    fn test_circle_anchor_set() {
        let graph = Graph::circle(Point::new(50.0, 50.0), 20.0, 10.0);
        // Four cardinal edges plus four corners.
        assert_eq!(graph.anchors.len(), 8);
        assert_eq!(graph.sources.len(), 8);

        let right = graph
            .source_for(AdjustType::Edge(EdgeAnchor::Right))
            .unwrap();
        assert!((right.position.x - 70.0).abs() < f64::EPSILON);
        assert!((right.position.y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rect_anchor_set() {
        let graph = Graph::rect(Point::new(10.0, 10.0), 50.0, 50.0);
        assert_eq!(graph.anchors.len(), 8);

        let br = graph
            .source_for(AdjustType::Corner(CornerAnchor::BottomRight))
            .unwrap();
        assert!((br.position.x - 60.0).abs() < f64::EPSILON);
        assert!((br.position.y - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_line_anchor_per_vertex() {
        let graph = Graph::line(vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 20.0),
            Point::new(100.0, 0.0),
        ]);
        assert_eq!(graph.anchors.len(), 3);
        let mid = graph.source_for(AdjustType::Vertex(1)).unwrap();
        assert!((mid.position.x - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translate_moves_sources() {
        let mut graph = Graph::rect(Point::new(0.0, 0.0), 10.0, 10.0);
        graph.translate(Vec2::new(5.0, 7.0));

        let tl = graph
            .source_for(AdjustType::Corner(CornerAnchor::TopLeft))
            .unwrap();
        assert!((tl.position.x - 5.0).abs() < f64::EPSILON);
        assert!((tl.position.y - 7.0).abs() < f64::EPSILON);
        assert!((graph.position().x - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_source_for_unknown_type() {
        let graph = Graph::rect(Point::new(0.0, 0.0), 10.0, 10.0);
        assert!(graph.source_for(AdjustType::Vertex(0)).is_none());
    }
}
