//! Generic input event types for cross-host compatibility.
//!
//! Hosts translate their native pointer/keyboard events into these types and
//! feed them to the active tool in arrival order. Events are immutable value
//! types; modifiers are sampled by the host at event time rather than
//! tracked by the tools.

use glam::Vec2;

/// Pointer button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button (select, drag, draw)
    Primary,
    /// Right button (context menu)
    Secondary,
    /// Middle button (reserved for host camera controls)
    Middle,
}

/// Generic key representation for cross-host compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    Delete,
    Backspace,
    Escape,
    /// Unmapped or unrecognized key
    Unknown,
}

/// Modifier key state sampled by the host at event time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Only Ctrl held.
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };

    /// Only Shift held.
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
        alt: false,
    };

    /// True if no modifier is held.
    pub fn none_held(&self) -> bool {
        !self.ctrl && !self.shift && !self.alt
    }
}

/// A single input event delivered to the active tool.
///
/// Pointer positions are normalized device coordinates (-1..1 on both axes,
/// Y up), the space ray casters consume directly; tools convert to pixels
/// through the viewport's canvas bounds when a threshold is specified in
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolEvent {
    PointerDown {
        position: Vec2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        position: Vec2,
        modifiers: Modifiers,
    },
    PointerUp {
        position: Vec2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
}

impl ToolEvent {
    /// Pointer position carried by the event, if it is a pointer event.
    pub fn position(&self) -> Option<Vec2> {
        match self {
            ToolEvent::PointerDown { position, .. }
            | ToolEvent::PointerMove { position, .. }
            | ToolEvent::PointerUp { position, .. } => Some(*position),
            ToolEvent::KeyDown { .. } => None,
        }
    }

    /// True if every coordinate in the event is finite.
    ///
    /// Hosts occasionally produce NaN positions (detached pointers, device
    /// resets); such events are dropped at dispatch instead of being allowed
    /// to poison anchors and deltas.
    pub fn is_finite(&self) -> bool {
        self.position().is_none_or(|p| p.x.is_finite() && p.y.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_events_are_always_finite() {
        let event = ToolEvent::KeyDown {
            key: Key::Escape,
            modifiers: Modifiers::NONE,
        };
        assert!(event.is_finite());
    }

    #[test]
    fn nan_positions_are_rejected() {
        let event = ToolEvent::PointerMove {
            position: Vec2::new(f32::NAN, 0.0),
            modifiers: Modifiers::NONE,
        };
        assert!(!event.is_finite());

        let event = ToolEvent::PointerDown {
            position: Vec2::new(0.0, f32::INFINITY),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        };
        assert!(!event.is_finite());
    }
}
