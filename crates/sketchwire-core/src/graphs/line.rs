//! Line/polyline primitive and its vertex adjuster.

use super::{Geometry, Graph};
use crate::anchor::{self, AdjustType, AnchorHandle};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A line or polyline: an ordered list of vertices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub points: Vec<Point>,
}

impl Line {
    /// Create a two-point line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            points: vec![start, end],
        }
    }

    /// Create a polyline from a vertex list.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Get the length of the polyline.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| {
                let dx = w[1].x - w[0].x;
                let dy = w[1].y - w[0].y;
                (dx * dx + dy * dy).sqrt()
            })
            .sum()
    }

    pub fn bounds(&self) -> Rect {
        let (min_x, max_x) = self
            .points
            .iter()
            .fold((f64::MAX, f64::MIN), |(mn, mx), p| {
                (mn.min(p.x), mx.max(p.x))
            });
        let (min_y, max_y) = self
            .points
            .iter()
            .fold((f64::MAX, f64::MIN), |(mn, mx), p| {
                (mn.min(p.y), mx.max(p.y))
            });
        Rect::new(min_x, min_y, max_x, max_y)
    }

    pub(crate) fn anchor_positions(&self) -> Vec<(AdjustType, Point)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, &p)| (AdjustType::Vertex(i), p))
            .collect()
    }
}

/// Adjust a line graph from one of its vertex anchors.
///
/// The dragged vertex is recomputed as snapshot vertex plus the pointer
/// delta; all other vertices are untouched, and only the dragged vertex's
/// handle is moved.
pub(crate) fn adjust(
    graph: &mut Graph,
    snapshot: &Geometry,
    active: AdjustType,
    handles: &mut [AnchorHandle],
    start: Point,
    current: Point,
) {
    let Geometry::Line(snap) = snapshot else {
        return;
    };
    let Geometry::Line(live) = &mut graph.geometry else {
        return;
    };
    let delta = Vec2::new(current.x - start.x, current.y - start.y);

    if let AdjustType::Vertex(index) = active {
        let (Some(&snap_vertex), Some(vertex)) =
            (snap.points.get(index), live.points.get_mut(index))
        else {
            return;
        };
        *vertex = snap_vertex + delta;
    }

    graph.sync_anchor_sources();
    anchor::track_sources(graph, handles, active);
}
