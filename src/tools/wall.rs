//! Wall drawing tool.
//!
//! Two-press workflow: the first primary press anchors the wall start on the
//! ground plane, the tool enters `Preview` and stretches a ghost segment
//! under the cursor, and the second press commits the wall through the
//! store. Escape cancels the ghost. Grid snapping applies to both endpoints
//! when the project has it enabled.

use std::rc::Rc;

use glam::{Vec2, Vec3};
use log::debug;

use crate::config::Config;
use crate::math;
use crate::scene::{Element, ElementKind, SceneStore};
use crate::viewport::{CursorStyle, ViewportContext};

use super::event::{Key, PointerButton, ToolEvent};
use super::result::{ToolError, ToolResult};
use super::tool::{Tool, ToolState};

/// Segments shorter than this commit nothing.
const MIN_WALL_LENGTH: f32 = 0.05;

/// In-progress wall segment between the anchoring press and the commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallGhost {
    pub start: Vec3,
    pub end: Vec3,
}

/// Tool that draws wall segments on the ground plane.
pub struct WallTool {
    state: ToolState,
    viewport: Option<Rc<dyn ViewportContext>>,
    ghost: Option<WallGhost>,
    thickness: f32,
    height: f32,
}

impl WallTool {
    pub fn new() -> Self {
        let defaults = Config::default();
        Self::from_config(&defaults)
    }

    /// Tool with wall dimensions taken from the editor configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            state: ToolState::Idle,
            viewport: None,
            ghost: None,
            thickness: config.walls.thickness,
            height: config.walls.height,
        }
    }

    /// Ghost segment for host rendering while in `Preview`.
    pub fn ghost(&self) -> Option<WallGhost> {
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

        match self.ghost.take() {
            None => {
                self.ghost = Some(WallGhost {
                    start: point,
                    end: point,
                });
                self.state = ToolState::Preview;
                None
            }
            Some(ghost) => {
                let start = ghost.start;
                let segment = point - start;
                let length = segment.length();
                if length < MIN_WALL_LENGTH {
                    // Keep the ghost anchored; the user can try a new endpoint.
                    self.ghost = Some(ghost);
                    return Some(ToolResult::failure(ToolError::DegenerateShape {
                        label: "Wall",
                    }));
                }

                self.state = ToolState::Active;
                let mut wall = Element::new(ElementKind::Wall, start + segment * 0.5)
                    .with_property("length", length as f64)
                    .with_property("thickness", self.thickness as f64)
                    .with_property("height", self.height as f64);
                wall.rotation.y = segment.x.atan2(segment.z);

                let id = store.add_element(wall);
                let created = store.element(&id).cloned()?;
                Some(
                    ToolResult::success(format!("Created {id}")).with_element(created),
                )
            }
        }
    }

    fn on_pointer_move(&mut self, position: Vec2, store: &dyn SceneStore) -> Option<ToolResult> {
        if let Some(point) = self.snapped_point(position, store) {
            if let Some(ghost) = &mut self.ghost {
                ghost.end = point;
            }
        }
        None
    }

    fn on_key_down(&mut self, key: Key) -> Option<ToolResult> {
        if key == Key::Escape && self.ghost.is_some() {
            self.ghost = None;
            self.state = ToolState::Active;
            return Some(ToolResult::success("Wall cancelled"));
        }
        None
    }
}

impl Default for WallTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for WallTool {
    fn name(&self) -> &'static str {
        "wall"
    }

    fn description(&self) -> &'static str {
        "Draw wall segments on the ground plane"
    }

    fn icon(&self) -> &'static str {
        "wall"
    }

    fn shortcut(&self) -> Option<char> {
        Some('w')
    }

    fn state(&self) -> ToolState {
        self.state
    }

    fn activate(&mut self, viewport: Rc<dyn ViewportContext>) {
        debug!("wall tool activated");
        viewport.set_cursor(CursorStyle::Crosshair);
        self.viewport = Some(viewport);
        self.ghost = None;
        self.state = ToolState::Active;
    }

    fn deactivate(&mut self) {
        debug!("wall tool deactivated");
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
            ToolEvent::KeyDown { key, modifiers } if modifiers.none_held() => self.on_key_down(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::scene::MemoryStore;
    use crate::tools::event::Modifiers;
    use crate::viewport::CanvasBounds;

    struct GroundViewport {
        cursor: Cell<Option<CursorStyle>>,
    }

    impl GroundViewport {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                cursor: Cell::new(None),
            })
        }
    }

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

        fn set_cursor(&self, style: CursorStyle) {
            self.cursor.set(Some(style));
        }
    }

    fn press(tool: &mut WallTool, store: &mut MemoryStore, world: Vec3) -> Option<ToolResult> {
        tool.handle_event(
            &ToolEvent::PointerDown {
                position: Vec2::new(world.x / 10.0, world.z / 10.0),
                button: PointerButton::Primary,
                modifiers: Modifiers::NONE,
            },
            store,
        )
    }

    fn move_to(tool: &mut WallTool, store: &mut MemoryStore, world: Vec3) {
        tool.handle_event(
            &ToolEvent::PointerMove {
                position: Vec2::new(world.x / 10.0, world.z / 10.0),
                modifiers: Modifiers::NONE,
            },
            store,
        );
    }

    #[test]
    fn two_presses_create_a_snapped_wall() {
        let viewport = GroundViewport::new();
        let mut store = MemoryStore::new();
        let mut tool = WallTool::new();
        tool.activate(viewport.clone());
        assert_eq!(viewport.cursor.get(), Some(CursorStyle::Crosshair));

        assert!(press(&mut tool, &mut store, Vec3::new(0.2, 0.0, -0.1)).is_none());
        assert_eq!(tool.state(), ToolState::Preview);
        // Snap pulled the anchor onto the grid.
        assert_eq!(tool.ghost().unwrap().start, Vec3::ZERO);

        move_to(&mut tool, &mut store, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(tool.ghost().unwrap().end, Vec3::new(2.0, 0.0, 0.0));

        let result = press(&mut tool, &mut store, Vec3::new(4.1, 0.0, 0.0)).unwrap();
        assert!(result.succeeded());
        assert_eq!(tool.state(), ToolState::Active);
        assert!(tool.ghost().is_none());

        let wall = result.element.unwrap();
        assert_eq!(wall.position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(wall.property_f32("length"), Some(4.0));
        assert_eq!(wall.property_f32("thickness"), Some(0.2));
        assert!((wall.rotation.y - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(store.elements().len(), 1);
    }

    #[test]
    fn degenerate_segment_is_rejected_and_ghost_survives() {
        let viewport = GroundViewport::new();
        let mut store = MemoryStore::new();
        let mut tool = WallTool::new();
        tool.activate(viewport.clone());

        press(&mut tool, &mut store, Vec3::ZERO);
        let result = press(&mut tool, &mut store, Vec3::new(0.01, 0.0, 0.0)).unwrap();

        assert_eq!(
            result.error,
            Some(ToolError::DegenerateShape { label: "Wall" })
        );
        assert_eq!(tool.state(), ToolState::Preview);
        assert!(tool.ghost().is_some());
        assert!(store.elements().is_empty());
    }

    #[test]
    fn escape_cancels_the_ghost() {
        let viewport = GroundViewport::new();
        let mut store = MemoryStore::new();
        let mut tool = WallTool::new();
        tool.activate(viewport.clone());

        press(&mut tool, &mut store, Vec3::ZERO);
        let result = tool
            .handle_event(
                &ToolEvent::KeyDown {
                    key: Key::Escape,
                    modifiers: Modifiers::NONE,
                },
                &mut store,
            )
            .unwrap();

        assert_eq!(result.message.as_deref(), Some("Wall cancelled"));
        assert_eq!(tool.state(), ToolState::Active);
        assert!(tool.ghost().is_none());
        assert!(store.elements().is_empty());
    }

    #[test]
    fn deactivate_mid_preview_drops_the_ghost() {
        let viewport = GroundViewport::new();
        let mut store = MemoryStore::new();
        let mut tool = WallTool::new();
        tool.activate(viewport.clone());

        press(&mut tool, &mut store, Vec3::ZERO);
        tool.deactivate();

        assert_eq!(tool.state(), ToolState::Idle);
        assert!(tool.ghost().is_none());
    }
}
