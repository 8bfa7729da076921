//! Result protocol shared by every interaction tool.

use thiserror::Error;

use crate::scene::Element;

/// Errors an interaction can report to the user.
///
/// These are returned, never thrown: a failed precondition leaves the scene
/// untouched and the message is surfaced verbatim by the host (status bar,
/// toast). Absence of a hit or an empty box selection is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// An action that requires a selection ran with nothing selected.
    #[error("Nothing selected to {action}")]
    EmptySelection { action: &'static str },

    /// Locked elements blocked a destructive action.
    #[error("Cannot delete: {count} locked element(s) in selection")]
    LockedSelection { count: usize },

    /// A draw tool was asked to commit a degenerate shape.
    #[error("{label} is too small to create")]
    DegenerateShape { label: &'static str },
}

/// Outcome of a handled input event.
///
/// `None` from a tool's event dispatch means "not handled"; a `ToolResult`
/// is either a message-bearing success (optionally carrying the affected
/// elements) or an error. Hosts display the message or error and use the
/// element payload to update panels and history.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// Primary element affected by the interaction, if exactly one
    pub element: Option<Element>,
    /// All elements affected by the interaction
    pub elements: Vec<Element>,
    /// Human-readable feedback for successful interactions
    pub message: Option<String>,
    /// Failure description; mutually exclusive with `message`
    pub error: Option<ToolError>,
}

impl ToolResult {
    /// Successful interaction with user-facing feedback.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            element: None,
            elements: Vec::new(),
            message: Some(message.into()),
            error: None,
        }
    }

    /// Failed interaction; the scene was left untouched.
    pub fn failure(error: ToolError) -> Self {
        Self {
            element: None,
            elements: Vec::new(),
            message: None,
            error: Some(error),
        }
    }

    /// Attaches the single affected element.
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    /// Attaches the list of affected elements.
    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = elements;
        self
    }

    /// True if the interaction succeeded.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}
