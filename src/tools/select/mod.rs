//! Selection and transform tool.
//!
//! This is the default tool of the editor and the densest state machine in
//! the crate. Five behaviors share one event stream: point-based picking,
//! click/drag/double-click disambiguation, single/multi selection,
//! rubber-band box selection on the ground plane, and grid-snapped dragging
//! of the current selection. Keyboard shortcuts for destructive and mode
//! actions are layered on top (see `keys.rs`), pointer handling lives in
//! `pointer.rs`.

mod keys;
mod pointer;

use std::rc::Rc;
use std::time::{Duration, Instant};

use glam::{Vec2, Vec3};
use log::debug;

use crate::config::Config;
use crate::scene::{DEFAULT_PICK_RADIUS, Element, SceneStore};
use crate::viewport::{CursorStyle, ViewportContext};

use super::event::ToolEvent;
use super::result::ToolResult;
use super::tool::{Tool, ToolState};

/// Pixel movement required before a press becomes a drag.
const DRAG_THRESHOLD_PX: f32 = 5.0;

/// Two presses within this window count as a double-click.
const DOUBLE_CLICK_MS: u64 = 300;

/// Rubber-band rectangle being dragged on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBox {
    /// Ground-plane point where the band was anchored
    pub start: Vec3,
    /// Ground-plane point under the cursor
    pub end: Vec3,
}

/// Context menu staged by a secondary-button press.
///
/// The tool only stages the menu; the host renders it at `position` (pixels,
/// top-left origin) and closes it through [`SelectTool::close_context_menu`].
/// A new primary press or Escape also dismisses it. It does not auto-dismiss
/// on hover-out.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    /// Menu anchor in canvas pixels
    pub position: Vec2,
    /// Selected elements the menu actions apply to
    pub elements: Vec<Element>,
}

/// Pointer gesture currently in progress.
///
/// All variants reset to `Neutral` on `PointerUp`, Escape, and deactivation;
/// a mid-gesture tool switch must not leak an anchor into the next
/// activation.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Interaction {
    /// No gesture in progress
    Neutral,
    /// Primary button held on an element, drag threshold not yet exceeded
    Pressed {
        /// Ground-plane intersection at press time
        anchor: Vec3,
        /// Normalized press position, for the pixel drag threshold
        press: Vec2,
    },
    /// Past the drag threshold; the anchor advances every move
    Dragging { anchor: Vec3 },
    /// Primary button held on empty space; rubber band in progress
    BoxSelecting { band: SelectionBox },
}

/// The selection/transform tool.
pub struct SelectTool {
    state: ToolState,
    viewport: Option<Rc<dyn ViewportContext>>,
    interaction: Interaction,
    context_menu: Option<ContextMenu>,
    /// Timestamp of the previous primary press, for double-click detection
    last_press: Option<Instant>,
    drag_threshold_px: f32,
    double_click_window: Duration,
    min_pick_radius: f32,
}

impl SelectTool {
    /// Tool with built-in interaction defaults.
    pub fn new() -> Self {
        Self {
            state: ToolState::Idle,
            viewport: None,
            interaction: Interaction::Neutral,
            context_menu: None,
            last_press: None,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            double_click_window: Duration::from_millis(DOUBLE_CLICK_MS),
            min_pick_radius: DEFAULT_PICK_RADIUS,
        }
    }

    /// Tool with thresholds taken from the editor configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            drag_threshold_px: config.interaction.drag_threshold_px,
            double_click_window: Duration::from_millis(config.interaction.double_click_ms),
            min_pick_radius: config.interaction.min_pick_radius,
            ..Self::new()
        }
    }

    /// Rubber band currently being dragged, for host rendering.
    pub fn selection_box(&self) -> Option<SelectionBox> {
        match self.interaction {
            Interaction::BoxSelecting { band } => Some(band),
            _ => None,
        }
    }

    /// Staged context menu, if one is open.
    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    /// Explicit close requested by the host (menu action ran, click-away).
    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// Closest visible element whose pick radius covers `point`.
    ///
    /// Distance is measured to the element's position only; extent and
    /// rotation are ignored, so large or rotated elements pick near their
    /// center. Hidden elements never pick. Returns a clone so callers can
    /// keep mutating the store.
    fn hit_test(&self, store: &dyn SceneStore, point: Vec3) -> Option<Element> {
        let mut best: Option<(f32, &Element)> = None;
        for element in store.elements().iter().filter(|e| e.visible) {
            let distance = element.position.distance(point);
            if distance > element.pick_radius(self.min_pick_radius) {
                continue;
            }
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, element));
            }
        }
        best.map(|(_, element)| element.clone())
    }

    fn reset_transients(&mut self) {
        self.interaction = Interaction::Neutral;
        self.context_menu = None;
        self.last_press = None;
    }
}

impl Default for SelectTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for SelectTool {
    fn name(&self) -> &'static str {
        "select"
    }

    fn description(&self) -> &'static str {
        "Select, move, and organize building elements"
    }

    fn icon(&self) -> &'static str {
        "cursor"
    }

    fn shortcut(&self) -> Option<char> {
        Some('v')
    }

    fn state(&self) -> ToolState {
        self.state
    }

    fn activate(&mut self, viewport: Rc<dyn ViewportContext>) {
        debug!("select tool activated");
        viewport.set_cursor(CursorStyle::Default);
        self.viewport = Some(viewport);
        self.reset_transients();
        self.state = ToolState::Active;
    }

    fn deactivate(&mut self) {
        debug!("select tool deactivated");
        self.reset_transients();
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
            debug!("dropping event with non-finite coordinates");
            return None;
        }
        match *event {
            ToolEvent::PointerDown {
                position,
                button,
                modifiers,
            } => self.on_pointer_down(position, button, modifiers, store),
            ToolEvent::PointerMove { position, .. } => self.on_pointer_move(position, store),
            ToolEvent::PointerUp {
                position,
                button,
                modifiers,
            } => self.on_pointer_up(position, button, modifiers, store),
            ToolEvent::KeyDown { key, modifiers } => self.on_key_down(key, modifiers, store),
        }
    }
}
