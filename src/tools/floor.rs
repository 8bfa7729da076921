//! Floor drawing tool.
//!
//! Press-drag-release workflow: the press anchors one corner of a slab, the
//! drag previews an axis-aligned rectangle on the ground plane, and the
//! release commits a floor element centered on the rectangle. A release
//! with no area is a quiet no-op, like an empty box selection.

use std::rc::Rc;

use glam::{Vec2, Vec3};
use log::debug;

use crate::math;
use crate::scene::{Element, ElementKind, SceneStore};
use crate::viewport::{CursorStyle, ViewportContext};

use super::event::{Key, PointerButton, ToolEvent};
use super::result::ToolResult;
use super::tool::{Tool, ToolState};

/// Slabs narrower than this on either axis are discarded.
const MIN_FLOOR_EXTENT: f32 = 0.05;

/// In-progress slab rectangle between press and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorGhost {
    pub start: Vec3,
    pub end: Vec3,
}

/// Tool that draws rectangular floor slabs on the ground plane.
pub struct FloorTool {
    state: ToolState,
    viewport: Option<Rc<dyn ViewportContext>>,
    ghost: Option<FloorGhost>,
}

impl FloorTool {
    pub fn new() -> Self {
        Self {
            state: ToolState::Idle,
            viewport: None,
            ghost: None,
        }
    }

    /// Ghost rectangle for host rendering while in `Preview`.
    pub fn ghost(&self) -> Option<FloorGhost> {
        self.ghost
    }

    fn snapped_point(&self, position: Vec2, store: &dyn SceneStore) -> Option<Vec3> {
        let point = self.viewport.as_ref()?.intersection_point(position)?;
        let settings = store.settings();
        Some(if settings.snap_to_grid {
            math::snap_vec3(point, settings.grid_size)
        } else {
            point
        })
    }

    fn on_pointer_down(
        &mut self,
        position: Vec2,
        store: &mut dyn SceneStore,
    ) -> Option<ToolResult> {
        let point = self.snapped_point(position, store)?;
        self.ghost = Some(FloorGhost {
            start: point,
            end: point,
        });
        self.state = ToolState::Preview;
        None
    }

    fn on_pointer_move(&mut self, position: Vec2, store: &dyn SceneStore) -> Option<ToolResult> {
        if let Some(point) = self.snapped_point(position, store) {
            if let Some(ghost) = &mut self.ghost {
                ghost.end = point;
            }
        }
        None
    }

    fn on_pointer_up(&mut self, position: Vec2, store: &mut dyn SceneStore) -> Option<ToolResult> {
        let ghost = self.ghost.take()?;
        self.state = ToolState::Active;

        let end = self.snapped_point(position, store).unwrap_or(ghost.end);
        let rect = math::GroundRect::from_corners(ghost.start, end);
        let size = rect.max - rect.min;
        if size.x < MIN_FLOOR_EXTENT || size.y < MIN_FLOOR_EXTENT {
            return Some(ToolResult::success("No floor created"));
        }

        let center = (rect.min + rect.max) * 0.5;
        let floor = Element::new(ElementKind::Floor, Vec3::new(center.x, 0.0, center.y))
            .with_property("width", size.x as f64)
            .with_property("depth", size.y as f64);
        let id = store.add_element(floor);
        let created = store.element(&id).cloned()?;
        Some(ToolResult::success(format!("Created {id}")).with_element(created))
    }

    fn on_key_down(&mut self, key: Key) -> Option<ToolResult> {
        if key == Key::Escape && self.ghost.is_some() {
            self.ghost = None;
            self.state = ToolState::Active;
            return Some(ToolResult::success("Floor cancelled"));
        }
        None
    }
}

impl Default for FloorTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for FloorTool {
    fn name(&self) -> &'static str {
        "floor"
    }

    fn description(&self) -> &'static str {
        "Draw rectangular floor slabs"
    }

    fn icon(&self) -> &'static str {
        "floor"
    }

    fn shortcut(&self) -> Option<char> {
        Some('f')
    }

    fn state(&self) -> ToolState {
        self.state
    }

    fn activate(&mut self, viewport: Rc<dyn ViewportContext>) {
        debug!("floor tool activated");
        viewport.set_cursor(CursorStyle::Crosshair);
        self.viewport = Some(viewport);
        self.ghost = None;
        self.state = ToolState::Active;
    }

    fn deactivate(&mut self) {
        debug!("floor tool deactivated");
        self.ghost = None;
        self.viewport = None;
        self.state = ToolState::Idle;
    }

    fn handle_event(
        &mut self,
        event: &ToolEvent,
        store: &mut dyn SceneStore,
    ) -> Option<ToolResult> {
        if self.state == ToolState::Idle {
            return None;
        }
        if !event.is_finite() {
            return None;
        }
        match *event {
            ToolEvent::PointerDown {
                position,
                button: PointerButton::Primary,
                ..
            } => self.on_pointer_down(position, store),
            ToolEvent::PointerMove { position, .. } => self.on_pointer_move(position, store),
            ToolEvent::PointerUp {
                position,
                button: PointerButton::Primary,
                ..
            } => self.on_pointer_up(position, store),
            ToolEvent::KeyDown { key, modifiers } if modifiers.none_held() => self.on_key_down(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryStore;
    use crate::tools::event::Modifiers;
    use crate::viewport::CanvasBounds;

    struct GroundViewport;

    impl ViewportContext for GroundViewport {
        fn intersection_point(&self, ndc: Vec2) -> Option<Vec3> {
            Some(Vec3::new(ndc.x * 10.0, 0.0, ndc.y * 10.0))
        }

        fn canvas_bounds(&self) -> CanvasBounds {
            CanvasBounds {
                width: 800.0,
                height: 600.0,
            }
        }

        fn focus_on(&self, _target: Vec3) {}

        fn set_cursor(&self, _style: CursorStyle) {}
    }

    fn event_at(world: Vec3, kind: fn(Vec2) -> ToolEvent) -> ToolEvent {
        kind(Vec2::new(world.x / 10.0, world.z / 10.0))
    }

    fn press_event(position: Vec2) -> ToolEvent {
        ToolEvent::PointerDown {
            position,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    fn release_event(position: Vec2) -> ToolEvent {
        ToolEvent::PointerUp {
            position,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn press_drag_release_creates_a_centered_slab() {
        let viewport = Rc::new(GroundViewport);
        let mut store = MemoryStore::new();
        let mut tool = FloorTool::new();
        tool.activate(viewport.clone());

        tool.handle_event(&event_at(Vec3::ZERO, press_event), &mut store);
        assert_eq!(tool.state(), ToolState::Preview);

        let result = tool
            .handle_event(&event_at(Vec3::new(4.0, 0.0, 2.0), release_event), &mut store)
            .unwrap();

        let floor = result.element.unwrap();
        assert_eq!(floor.position, Vec3::new(2.0, 0.0, 1.0));
        assert_eq!(floor.property_f32("width"), Some(4.0));
        assert_eq!(floor.property_f32("depth"), Some(2.0));
        assert_eq!(tool.state(), ToolState::Active);
        assert!(tool.ghost().is_none());
    }

    #[test]
    fn zero_area_release_is_a_quiet_no_op() {
        let viewport = Rc::new(GroundViewport);
        let mut store = MemoryStore::new();
        let mut tool = FloorTool::new();
        tool.activate(viewport.clone());

        tool.handle_event(&event_at(Vec3::ZERO, press_event), &mut store);
        let result = tool
            .handle_event(&event_at(Vec3::ZERO, release_event), &mut store)
            .unwrap();

        assert!(result.succeeded());
        assert_eq!(result.message.as_deref(), Some("No floor created"));
        assert!(store.elements().is_empty());
    }

    #[test]
    fn escape_cancels_the_slab() {
        let viewport = Rc::new(GroundViewport);
        let mut store = MemoryStore::new();
        let mut tool = FloorTool::new();
        tool.activate(viewport.clone());

        tool.handle_event(&event_at(Vec3::ZERO, press_event), &mut store);
        let result = tool
            .handle_event(
                &ToolEvent::KeyDown {
                    key: Key::Escape,
                    modifiers: Modifiers::NONE,
                },
                &mut store,
            )
            .unwrap();

        assert_eq!(result.message.as_deref(), Some("Floor cancelled"));
        assert!(tool.ghost().is_none());
        assert!(store.elements().is_empty());
    }
}
