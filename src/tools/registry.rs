//! Tool registry and active-tool dispatch.

use std::rc::Rc;

use log::{debug, warn};

use crate::config::Config;
use crate::scene::SceneStore;
use crate::viewport::ViewportContext;

use super::event::ToolEvent;
use super::floor::FloorTool;
use super::result::ToolResult;
use super::select::SelectTool;
use super::tool::Tool;
use super::wall::WallTool;

/// Ordered collection of tools with at most one active.
///
/// The registry owns the lifecycle ordering the tool contract requires: the
/// outgoing tool is deactivated (and thereby forced to drop any in-flight
/// gesture) before the incoming tool is activated. Hosts route every input
/// event through [`ToolRegistry::dispatch`].
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    active: Option<usize>,
}

impl ToolRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            active: None,
        }
    }

    /// Registry pre-populated with the standard editing tools.
    pub fn with_standard_tools(config: &Config) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SelectTool::from_config(config)));
        registry.register(Box::new(WallTool::from_config(config)));
        registry.register(Box::new(FloorTool::new()));
        registry
    }

    /// Adds a tool. A duplicate name replaces nothing and is refused.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        if self.tools.iter().any(|t| t.name() == tool.name()) {
            warn!("Refusing duplicate tool registration: {}", tool.name());
            return;
        }
        self.tools.push(tool);
    }

    /// Registered tools, for palettes and toolbars.
    pub fn tools(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    /// The active tool, if any.
    pub fn active_tool(&self) -> Option<&dyn Tool> {
        self.active.map(|i| self.tools[i].as_ref())
    }

    /// Mutable access to the active tool, for host-driven state such as
    /// closing a context menu.
    pub fn active_tool_mut(&mut self) -> Option<&mut Box<dyn Tool>> {
        self.active.map(|i| &mut self.tools[i])
    }

    /// Activates the named tool, deactivating the current one first.
    /// Returns false when the name is unknown.
    pub fn activate(&mut self, name: &str, viewport: Rc<dyn ViewportContext>) -> bool {
        let Some(index) = self.tools.iter().position(|t| t.name() == name) else {
            warn!("Unknown tool requested: {name}");
            return false;
        };
        if let Some(current) = self.active {
            if current != index {
                self.tools[current].deactivate();
            }
        }
        debug!("Switching active tool to {name}");
        self.tools[index].activate(viewport);
        self.active = Some(index);
        true
    }

    /// Activates the tool registered under the given shortcut key.
    pub fn activate_by_shortcut(&mut self, key: char, viewport: Rc<dyn ViewportContext>) -> bool {
        let key = key.to_ascii_lowercase();
        let Some(name) = self
            .tools
            .iter()
            .find(|t| t.shortcut() == Some(key))
            .map(|t| t.name())
        else {
            return false;
        };
        self.activate(name, viewport)
    }

    /// Deactivates the active tool, leaving no tool selected.
    pub fn deactivate(&mut self) {
        if let Some(index) = self.active.take() {
            self.tools[index].deactivate();
        }
    }

    /// Forwards one input event to the active tool.
    pub fn dispatch(
        &mut self,
        event: &ToolEvent,
        store: &mut dyn SceneStore,
    ) -> Option<ToolResult> {
        let index = self.active?;
        self.tools[index].handle_event(event, store)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;
    use crate::scene::MemoryStore;
    use crate::tools::event::{Modifiers, PointerButton};
    use crate::tools::tool::ToolState;
    use crate::viewport::{CanvasBounds, CursorStyle};

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

    fn registry() -> (ToolRegistry, Rc<GroundViewport>) {
        (
            ToolRegistry::with_standard_tools(&Config::default()),
            Rc::new(GroundViewport),
        )
    }

    #[test]
    fn standard_registry_lists_three_tools() {
        let (registry, _viewport) = registry();
        let names: Vec<&str> = registry.tools().map(|t| t.name()).collect();
        assert_eq!(names, ["select", "wall", "floor"]);
        assert!(registry.active_tool().is_none());
    }

    #[test]
    fn switching_deactivates_the_previous_tool() {
        let (mut registry, viewport) = registry();
        let mut store = MemoryStore::new();

        assert!(registry.activate("wall", viewport.clone()));
        // Anchor a ghost, then switch away mid-preview.
        registry.dispatch(
            &ToolEvent::PointerDown {
                position: Vec2::ZERO,
                button: PointerButton::Primary,
                modifiers: Modifiers::NONE,
            },
            &mut store,
        );
        assert_eq!(registry.active_tool().unwrap().state(), ToolState::Preview);

        assert!(registry.activate("select", viewport.clone()));
        assert_eq!(registry.active_tool().unwrap().name(), "select");

        // The wall tool went back to Idle and dropped its ghost.
        let wall = registry.tools().find(|t| t.name() == "wall").unwrap();
        assert_eq!(wall.state(), ToolState::Idle);
    }

    #[test]
    fn shortcut_activation_is_case_insensitive() {
        let (mut registry, viewport) = registry();
        assert!(registry.activate_by_shortcut('W', viewport.clone()));
        assert_eq!(registry.active_tool().unwrap().name(), "wall");
        assert!(!registry.activate_by_shortcut('z', viewport.clone()));
    }

    #[test]
    fn dispatch_without_active_tool_is_none() {
        let (mut registry, _viewport) = registry();
        let mut store = MemoryStore::new();
        let result = registry.dispatch(
            &ToolEvent::PointerMove {
                position: Vec2::ZERO,
                modifiers: Modifiers::NONE,
            },
            &mut store,
        );
        assert!(result.is_none());
    }

    #[test]
    fn duplicate_registration_is_refused() {
        let (mut registry, _viewport) = registry();
        registry.register(Box::new(SelectTool::new()));
        assert_eq!(registry.tools().count(), 3);
    }
}
