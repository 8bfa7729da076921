//! Geometry helpers for grid snapping, screen-space conversion, and
//! ground-plane rectangles.
//!
//! This module provides:
//! - Per-axis grid snapping for positions and drag deltas
//! - Normalized-device-coordinate to pixel conversion
//! - Axis-aligned ground-plane rectangle tests for rubber-band selection

use glam::{Vec2, Vec3};

use crate::viewport::CanvasBounds;

// ============================================================================
// Grid Snapping
// ============================================================================

/// Snaps a scalar to the nearest multiple of `grid`.
///
/// A non-positive grid size disables snapping and returns the value unchanged,
/// so callers don't have to guard against degenerate project settings.
pub fn snap(value: f32, grid: f32) -> f32 {
    if grid <= 0.0 {
        return value;
    }
    (value / grid).round() * grid
}

/// Snaps each axis of a vector independently to the nearest grid multiple.
///
/// Used both for anchoring new elements and for quantizing drag deltas; the
/// per-axis rounding means a diagonal movement can snap on one axis while the
/// other stays put.
pub fn snap_vec3(v: Vec3, grid: f32) -> Vec3 {
    Vec3::new(snap(v.x, grid), snap(v.y, grid), snap(v.z, grid))
}

// ============================================================================
// Screen-Space Conversion
// ============================================================================

/// Converts a normalized device coordinate (-1..1, Y up) into pixel space.
///
/// Pixel origin is the top-left corner of the canvas, matching the coordinate
/// space hosts use to place overlay widgets such as the context menu.
pub fn ndc_to_pixels(ndc: Vec2, bounds: &CanvasBounds) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * bounds.width,
        (1.0 - ndc.y) * 0.5 * bounds.height,
    )
}

/// Pixel distance between two normalized pointer positions.
///
/// Drag thresholds are specified in pixels; comparing in normalized space
/// would make the threshold depend on the canvas aspect ratio.
pub fn pixel_distance(a: Vec2, b: Vec2, bounds: &CanvasBounds) -> f32 {
    ndc_to_pixels(a, bounds).distance(ndc_to_pixels(b, bounds))
}

// ============================================================================
// Ground-Plane Rectangles
// ============================================================================

/// Axis-aligned rectangle on the X/Z ground plane.
///
/// Built from two opposite corners in any drag direction; `min`/`max` are
/// normalized so containment tests stay simple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl GroundRect {
    /// Builds a normalized rectangle from two opposite ground-plane corners.
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec2::new(a.x.min(b.x), a.z.min(b.z)),
            max: Vec2::new(a.x.max(b.x), a.z.max(b.z)),
        }
    }

    /// Returns true if the point's X/Z footprint falls inside the rectangle.
    ///
    /// Bounds are inclusive; an element sitting exactly on the rubber-band
    /// edge counts as enclosed.
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.z >= self.min.y
            && point.z <= self.max.y
    }
}
