//! Pointer attraction toward alignment lines of nearby nodes.
//!
//! Given a raw stage point, [`AttractTool::attract_point`] pulls it onto the
//! nearest alignment line of other nodes (bounds edges and centers, per
//! axis) within a threshold, records the guides to display, and falls back
//! to grid snapping when enabled. Guides persist until cleared.

use crate::graphs::NodeId;
use crate::scene::Scene;
use kurbo::Point;

/// Attraction distance, in stage units.
pub const ATTRACT_THRESHOLD: f64 = 5.0;

/// Grid cell size for grid snapping.
pub const GRID_SIZE: f64 = 20.0;

/// Orientation of an alignment guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideAxis {
    /// A vertical line at `x = position`.
    Vertical,
    /// A horizontal line at `y = position`.
    Horizontal,
}

/// An alignment guide line to display while attracting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignGuide {
    pub axis: GuideAxis,
    pub position: f64,
}

/// Snaps stage points to alignment lines of other nodes.
#[derive(Debug, Clone)]
pub struct AttractTool {
    /// Master switch for node attraction.
    pub enabled: bool,
    /// Snap unattracted axes to the grid.
    pub grid_enabled: bool,
    /// Attraction distance, in stage units.
    pub threshold: f64,
    guides: Vec<AlignGuide>,
}

impl Default for AttractTool {
    fn default() -> Self {
        Self::new()
    }
}

impl AttractTool {
    pub fn new() -> Self {
        Self {
            enabled: true,
            grid_enabled: false,
            threshold: ATTRACT_THRESHOLD,
            guides: Vec::new(),
        }
    }

    /// Adjust a stage point toward nearby alignment lines.
    ///
    /// `skip` excludes a node (typically the one being adjusted) from the
    /// candidate set. Each call replaces the active guide set.
    pub fn attract_point(&mut self, point: Point, scene: &Scene, skip: Option<NodeId>) -> Point {
        self.guides.clear();
        if !self.enabled {
            return point;
        }

        let mut best_x: Option<(f64, f64)> = None;
        let mut best_y: Option<(f64, f64)> = None;

        for node in scene.nodes() {
            if Some(node.graph.id) == skip || !node.listening {
                continue;
            }
            let bounds = node.graph.bounds();
            let center = bounds.center();
            for x in [bounds.x0, center.x, bounds.x1] {
                let dist = (point.x - x).abs();
                if dist <= self.threshold && best_x.is_none_or(|(d, _)| dist < d) {
                    best_x = Some((dist, x));
                }
            }
            for y in [bounds.y0, center.y, bounds.y1] {
                let dist = (point.y - y).abs();
                if dist <= self.threshold && best_y.is_none_or(|(d, _)| dist < d) {
                    best_y = Some((dist, y));
                }
            }
        }

        let mut adjusted = point;
        match best_x {
            Some((_, x)) => {
                adjusted.x = x;
                self.guides.push(AlignGuide {
                    axis: GuideAxis::Vertical,
                    position: x,
                });
            }
            None if self.grid_enabled => {
                adjusted.x = (point.x / GRID_SIZE).round() * GRID_SIZE;
            }
            None => {}
        }
        match best_y {
            Some((_, y)) => {
                adjusted.y = y;
                self.guides.push(AlignGuide {
                    axis: GuideAxis::Horizontal,
                    position: y,
                });
            }
            None if self.grid_enabled => {
                adjusted.y = (point.y / GRID_SIZE).round() * GRID_SIZE;
            }
            None => {}
        }
        adjusted
    }

    /// Guide lines active since the last attraction.
    pub fn guides(&self) -> &[AlignGuide] {
        &self.guides
    }

    /// Remove all active guide lines.
    pub fn clear_guides(&mut self) {
        self.guides.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::Graph;

    fn scene_with_rect() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let id = scene.add_graph(Graph::rect(Point::new(100.0, 100.0), 40.0, 40.0));
        (scene, id)
    }

    #[test]
    fn test_attracts_within_threshold() {
        let (scene, _) = scene_with_rect();
        let mut attract = AttractTool::new();

        // 3 units left of the rect's left edge.
        let adjusted = attract.attract_point(Point::new(97.0, 50.0), &scene, None);
        assert!((adjusted.x - 100.0).abs() < f64::EPSILON);
        assert!((adjusted.y - 50.0).abs() < f64::EPSILON);
        assert_eq!(attract.guides().len(), 1);
        assert_eq!(attract.guides()[0].axis, GuideAxis::Vertical);
    }

    #[test]
    fn test_no_attraction_beyond_threshold() {
        let (scene, _) = scene_with_rect();
        let mut attract = AttractTool::new();

        let adjusted = attract.attract_point(Point::new(80.0, 50.0), &scene, None);
        assert!((adjusted.x - 80.0).abs() < f64::EPSILON);
        assert!(attract.guides().is_empty());
    }

    #[test]
    fn test_skips_excluded_node() {
        let (scene, id) = scene_with_rect();
        let mut attract = AttractTool::new();

        let adjusted = attract.attract_point(Point::new(97.0, 50.0), &scene, Some(id));
        assert!((adjusted.x - 97.0).abs() < f64::EPSILON);
        assert!(attract.guides().is_empty());
    }

    #[test]
    fn test_disabled_is_identity() {
        let (scene, _) = scene_with_rect();
        let mut attract = AttractTool::new();
        attract.enabled = false;

        let adjusted = attract.attract_point(Point::new(99.0, 101.0), &scene, None);
        assert!((adjusted.x - 99.0).abs() < f64::EPSILON);
        assert!((adjusted.y - 101.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grid_fallback() {
        let (scene, _) = scene_with_rect();
        let mut attract = AttractTool::new();
        attract.grid_enabled = true;

        let adjusted = attract.attract_point(Point::new(31.0, 49.0), &scene, None);
        assert!((adjusted.x - 40.0).abs() < f64::EPSILON);
        assert!((adjusted.y - 40.0).abs() < f64::EPSILON);
        // Grid snapping shows no guide lines.
        assert!(attract.guides().is_empty());
    }

    #[test]
    fn test_clear_guides() {
        let (scene, _) = scene_with_rect();
        let mut attract = AttractTool::new();
        attract.attract_point(Point::new(97.0, 50.0), &scene, None);
        assert!(!attract.guides().is_empty());

        attract.clear_guides();
        assert!(attract.guides().is_empty());
    }
}
