//! Building elements and their picking geometry.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fallback pick radius for elements without a more specific footprint.
pub const DEFAULT_PICK_RADIUS: f32 = 0.5;

/// Pick radius for floor slabs, which are large and flat.
pub const FLOOR_PICK_RADIUS: f32 = 1.0;

/// The kind of building element a scene entry represents.
///
/// This is a closed set: the interaction engine dispatches per-kind picking
/// thresholds over it, and hosts map it to meshes and export categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Wall,
    Floor,
    Door,
    Window,
    /// Host-defined element (furniture, props, imported meshes)
    Custom,
}

impl ElementKind {
    /// Lowercase label used for generated ids and user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Wall => "wall",
            ElementKind::Floor => "floor",
            ElementKind::Door => "door",
            ElementKind::Window => "window",
            ElementKind::Custom => "element",
        }
    }
}

/// A single element of the building layout.
///
/// Elements are owned by the scene store; the interaction engine only holds
/// ids across events. Positions are world-space meters, rotations are Euler
/// radians, and free-form parameters (wall thickness, door width, ...) live
/// in the `properties` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Store-assigned identifier; empty until the element is added
    pub id: String,
    /// What kind of building element this is
    pub kind: ElementKind,
    /// World-space position (ground plane is y = 0)
    pub position: Vec3,
    /// Euler rotation in radians (XYZ order)
    pub rotation: Vec3,
    /// Per-axis scale; the store keeps every component strictly positive
    pub scale: Vec3,
    /// Free-form element parameters (thickness, width, material, ...)
    #[serde(default)]
    pub properties: HashMap<String, Value>,
    /// Hidden elements are skipped by picking and box selection
    pub visible: bool,
    /// Locked elements are immovable and block deletion
    pub locked: bool,
    /// When the element was created
    pub created_at: DateTime<Utc>,
    /// Last store mutation touching this element
    pub modified_at: DateTime<Utc>,
}

impl Element {
    /// Creates a new element at `position` with identity transform.
    ///
    /// The id is left empty; the store assigns one when the element is added.
    pub fn new(kind: ElementKind, position: Vec3) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            kind,
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            properties: HashMap::new(),
            visible: true,
            locked: false,
            created_at: now,
            modified_at: now,
        }
    }

    /// Sets a free-form property, consuming and returning the element.
    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Reads a numeric property, if present and numeric.
    pub fn property_f32(&self, key: &str) -> Option<f32> {
        self.properties.get(key).and_then(Value::as_f64).map(|v| v as f32)
    }

    /// Distance threshold within which a ground-plane point picks this element.
    ///
    /// Picking is point-based: the cursor's ground intersection is compared
    /// against the element's position, not its hull, so the radius scales
    /// with the footprint each kind actually occupies. `min_radius` is the
    /// floor applied to thin walls and narrow openings so they stay pickable.
    pub fn pick_radius(&self, min_radius: f32) -> f32 {
        match self.kind {
            ElementKind::Wall => self
                .property_f32("thickness")
                .unwrap_or(0.0)
                .max(min_radius),
            ElementKind::Door | ElementKind::Window => {
                self.property_f32("width").unwrap_or(0.0).max(min_radius)
            }
            ElementKind::Floor => FLOOR_PICK_RADIUS.max(min_radius),
            ElementKind::Custom => min_radius,
        }
    }
}

/// Partial element update merged into an existing element.
///
/// Unset fields leave the current value untouched; `properties` entries are
/// merged key-by-key rather than replacing the whole map.
#[derive(Debug, Clone, Default)]
pub struct ElementPatch {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub scale: Option<Vec3>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    pub properties: Option<HashMap<String, Value>>,
}

impl ElementPatch {
    /// Patch that only moves the element.
    pub fn position(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Patch that only changes visibility.
    pub fn visibility(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Self::default()
        }
    }

    /// Patch that only changes the lock flag.
    pub fn lock(locked: bool) -> Self {
        Self {
            locked: Some(locked),
            ..Self::default()
        }
    }
}
