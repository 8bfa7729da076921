//! Selection state and transform modes.

use serde::{Deserialize, Serialize};

/// How drag input is applied to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    Translate,
    Rotate,
    Scale,
}

impl TransformMode {
    /// Next mode in the Translate → Rotate → Scale cycle.
    pub fn next(self) -> Self {
        match self {
            TransformMode::Translate => TransformMode::Rotate,
            TransformMode::Rotate => TransformMode::Scale,
            TransformMode::Scale => TransformMode::Translate,
        }
    }

    /// Human-readable label for status messages.
    pub fn label(self) -> &'static str {
        match self {
            TransformMode::Translate => "translate",
            TransformMode::Rotate => "rotate",
            TransformMode::Scale => "scale",
        }
    }
}

/// Which elements are selected, hovered, and how they will be transformed.
///
/// Selection order is preserved: the vector holds ids in the order they were
/// added (press order), with duplicates rejected at the store boundary. Hosts
/// use the order as the z-order of selection outlines.
#[derive(Debug, Clone)]
pub struct SelectionState {
    selected: Vec<String>,
    /// Element currently under the cursor, if any
    pub hovered: Option<String>,
    /// Active manipulation mode for the selection
    pub transform_mode: TransformMode,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            hovered: None,
            transform_mode: TransformMode::Translate,
        }
    }
}

impl SelectionState {
    /// Selected ids in insertion order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Number of selected elements.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// True if `id` is part of the selection.
    pub fn contains(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub(crate) fn add(&mut self, id: &str) {
        if !self.contains(id) {
            self.selected.push(id.to_string());
        }
    }

    pub(crate) fn remove(&mut self, id: &str) {
        self.selected.retain(|s| s != id);
    }

    pub(crate) fn replace(&mut self, ids: Vec<String>) {
        self.selected = ids;
    }

    pub(crate) fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_mode_cycle_wraps_around() {
        let mut mode = TransformMode::Translate;
        mode = mode.next();
        assert_eq!(mode, TransformMode::Rotate);
        mode = mode.next();
        assert_eq!(mode, TransformMode::Scale);
        mode = mode.next();
        assert_eq!(mode, TransformMode::Translate);
    }

    #[test]
    fn selection_preserves_order_and_rejects_duplicates() {
        let mut state = SelectionState::default();
        state.add("b");
        state.add("a");
        state.add("b");
        assert_eq!(state.selected(), ["b", "a"]);
        state.remove("b");
        assert_eq!(state.selected(), ["a"]);
    }
}
