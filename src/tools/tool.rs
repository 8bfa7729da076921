//! Lifecycle contract shared by every interaction tool.

use std::rc::Rc;

use crate::scene::SceneStore;
use crate::viewport::ViewportContext;

use super::event::ToolEvent;
use super::result::ToolResult;

/// Lifecycle state of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolState {
    /// Not receiving events
    Idle,
    /// Receiving events, no pending commit
    Active,
    /// Receiving events while a ghost element awaits commit or cancel
    Preview,
}

/// An interaction tool driven by host input events.
///
/// The hosting UI keeps at most one tool active and forwards every pointer
/// and keyboard event, in arrival order, to [`Tool::handle_event`]. Dispatch
/// is single-threaded and non-reentrant: a handler runs to completion before
/// the next event is delivered, and handlers never call back into dispatch.
///
/// Implementations must uphold two contract rules:
///
/// - `activate` is idempotent-safe: re-activating an active tool may reset
///   transient state but must leave the tool `Active` and consistent.
/// - `deactivate` releases every piece of per-activation state (rubber
///   bands, drag anchors, ghosts, staged menus), even when it arrives
///   mid-gesture with no closing `PointerUp`. Stale state leaking across
///   tool switches is a correctness bug.
pub trait Tool {
    /// Stable identifier used by hosts to select the tool.
    fn name(&self) -> &'static str;

    /// One-line description for tool palettes and tooltips.
    fn description(&self) -> &'static str;

    /// Icon identifier the host maps to an asset.
    fn icon(&self) -> &'static str;

    /// Keyboard shortcut that selects this tool, if any.
    fn shortcut(&self) -> Option<char>;

    /// Current lifecycle state.
    fn state(&self) -> ToolState;

    /// Transitions Idle → Active, retaining the viewport for the
    /// activation's lifetime. May set a cursor style on the input surface.
    fn activate(&mut self, viewport: Rc<dyn ViewportContext>);

    /// Transitions back to Idle, dropping all transient state.
    fn deactivate(&mut self);

    /// Processes one input event against the scene.
    ///
    /// Returns `None` when the tool is idle or the event is not one it
    /// handles; failure modes are encoded in the result, never panicked.
    fn handle_event(&mut self, event: &ToolEvent, store: &mut dyn SceneStore)
    -> Option<ToolResult>;
}
