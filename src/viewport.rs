//! Viewport boundary supplied by the hosting UI.
//!
//! The render engine owns the camera, scene graph, and canvas; the
//! interaction tools only need a narrow slice of it: where a pointer ray
//! meets the scene, how big the canvas is, and a couple of one-way commands
//! (cursor style, camera focus). Hosts hand an implementation to
//! [`Tool::activate`](crate::tools::Tool::activate) and the tool retains it
//! until deactivation.

use glam::{Vec2, Vec3};

/// Pixel size of the render canvas.
///
/// Used to convert normalized pointer coordinates into pixels for drag
/// thresholds and context-menu placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub width: f32,
    pub height: f32,
}

/// Pointer cursor style a tool may request on activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    /// Standard arrow (selection)
    Default,
    /// Crosshair (draw tools)
    Crosshair,
    /// Grab/move cursor
    Move,
}

/// Host-side viewport services.
///
/// `intersection_point` casts a ray from the camera through the normalized
/// screen coordinate and returns the first scene intersection, falling back
/// to the ground plane (`y = 0`) when the ray misses all geometry. The
/// fallback means a drag always has a valid anchor; `None` is reserved for
/// rays that cannot meet the ground plane at all (camera parallel to it).
pub trait ViewportContext {
    /// World-space point under the normalized pointer coordinate.
    fn intersection_point(&self, ndc: Vec2) -> Option<Vec3>;

    /// Current canvas size in pixels.
    fn canvas_bounds(&self) -> CanvasBounds;

    /// Moves the camera to frame the given world-space target.
    fn focus_on(&self, target: Vec3);

    /// Requests a pointer cursor style on the input surface.
    fn set_cursor(&self, style: CursorStyle);
}
