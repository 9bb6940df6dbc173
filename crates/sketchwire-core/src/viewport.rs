//! Viewport pan/zoom state and pointer resolution.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Viewport manages the view transform of the stage.
///
/// It handles panning (translation) and zooming (scaling), converting
/// between screen coordinates and stage coordinates, and tracks the current
/// pointer position, which may be unresolvable when the pointer has left
/// the stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan).
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
    /// Pointer position in screen coordinates, `None` while off-stage.
    #[serde(skip)]
    pointer: Option<Point>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
            pointer: None,
        }
    }
}

impl Viewport {
    /// Create a new viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform converting stage coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Transform converting screen coordinates to stage coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to stage coordinates.
    pub fn screen_to_stage(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a stage point to screen coordinates.
    pub fn stage_to_screen(&self, stage_point: Point) -> Point {
        self.transform() * stage_point
    }

    /// Pan the viewport by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the viewport, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let stage_point = self.screen_to_stage(screen_point);
        self.zoom = new_zoom;

        let new_screen = self.stage_to_screen(stage_point);
        self.offset += Vec2::new(screen_point.x - new_screen.x, screen_point.y - new_screen.y);
    }

    /// Record the pointer position in screen coordinates.
    pub fn set_pointer(&mut self, screen_point: Point) {
        self.pointer = Some(screen_point);
    }

    /// Mark the pointer as having left the stage.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Pointer position in screen coordinates, if on-stage.
    pub fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }

    /// Pointer position in stage coordinates, if on-stage.
    pub fn stage_point(&self) -> Option<Point> {
        self.pointer.map(|p| self.screen_to_stage(p))
    }
}
