use glam::Vec3;

use crate::scene::{Element, ElementPatch, SceneStore, SettingsPatch, TransformMode};
use crate::tools::event::{Key, Modifiers};
use crate::tools::result::{ToolError, ToolResult};

use super::{Interaction, SelectTool};

impl SelectTool {
    /// Processes a key press.
    ///
    /// Shortcuts are matched exactly: either unmodified or Ctrl-modified.
    /// Anything carrying Shift or Alt falls through unhandled so the host
    /// can keep its own bindings.
    ///
    /// - Delete/Backspace: delete selection (guarded against locks)
    /// - Escape: clear selection, close menu, drop any gesture in progress
    /// - Ctrl+A / Ctrl+D / Ctrl+F: select all, duplicate, focus camera
    /// - G: toggle grid snapping
    /// - T: cycle transform mode; R/S jump to rotate/scale
    /// - L: lock selection; H: hide selection
    pub(super) fn on_key_down(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        store: &mut dyn SceneStore,
    ) -> Option<ToolResult> {
        if modifiers.shift || modifiers.alt {
            return None;
        }
        match (key, modifiers.ctrl) {
            (Key::Delete | Key::Backspace, false) => Some(self.delete_selection(store)),
            (Key::Escape, false) => Some(self.clear_all(store)),
            (Key::Char(c), ctrl) => self.on_shortcut(c.to_ascii_lowercase(), ctrl, store),
            _ => None,
        }
    }

    fn on_shortcut(
        &mut self,
        c: char,
        ctrl: bool,
        store: &mut dyn SceneStore,
    ) -> Option<ToolResult> {
        match (c, ctrl) {
            ('a', true) => Some(self.select_all(store)),
            ('d', true) => Some(self.duplicate_selection(store)),
            ('f', true) => Some(self.focus_selection(store)),
            ('g', false) => Some(self.toggle_snap(store)),
            ('t', false) => {
                let next = store.selection().transform_mode.next();
                Some(Self::set_mode(store, next))
            }
            ('r', false) => Some(Self::set_mode(store, TransformMode::Rotate)),
            ('s', false) => Some(Self::set_mode(store, TransformMode::Scale)),
            ('l', false) => Some(self.lock_selection(store)),
            ('h', false) => Some(self.hide_selection(store)),
            _ => None,
        }
    }

    /// Deletes the selection after validating every precondition.
    ///
    /// Fails without touching the store when the selection is empty or
    /// contains locked elements; partial deletion would leave the scene in
    /// a state the user never asked for.
    fn delete_selection(&mut self, store: &mut dyn SceneStore) -> ToolResult {
        let ids: Vec<String> = store.selection().selected().to_vec();
        if ids.is_empty() {
            return ToolResult::failure(ToolError::EmptySelection { action: "delete" });
        }
        let locked = ids
            .iter()
            .filter(|id| store.element(id).is_some_and(|e| e.locked))
            .count();
        if locked > 0 {
            return ToolResult::failure(ToolError::LockedSelection { count: locked });
        }

        let elements: Vec<Element> = ids
            .iter()
            .filter_map(|id| store.element(id).cloned())
            .collect();
        store.remove_elements(&ids);
        store.clear_selection();
        ToolResult::success(format!("Deleted {} element(s)", elements.len()))
            .with_elements(elements)
    }

    /// Escape: selection, hover, context menu, and any gesture all reset.
    fn clear_all(&mut self, store: &mut dyn SceneStore) -> ToolResult {
        self.interaction = Interaction::Neutral;
        self.context_menu = None;
        self.last_press = None;
        store.clear_selection();
        store.set_hovered(None);
        ToolResult::success("Selection cleared")
    }

    fn select_all(&mut self, store: &mut dyn SceneStore) -> ToolResult {
        let ids: Vec<String> = store.elements().iter().map(|e| e.id.clone()).collect();
        store.select_elements(&ids);
        let elements: Vec<Element> = store.elements().to_vec();
        ToolResult::success(format!("Selected {} element(s)", elements.len()))
            .with_elements(elements)
    }

    /// Duplicates the selection and re-selects the copies, so a follow-up
    /// drag moves the new elements rather than the originals.
    fn duplicate_selection(&mut self, store: &mut dyn SceneStore) -> ToolResult {
        let ids: Vec<String> = store.selection().selected().to_vec();
        if ids.is_empty() {
            return ToolResult::failure(ToolError::EmptySelection { action: "duplicate" });
        }

        let mut copies = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(copy) = store.duplicate_element(id) {
                copies.push(copy);
            }
        }
        let new_ids: Vec<String> = copies.iter().map(|e| e.id.clone()).collect();
        store.select_elements(&new_ids);
        ToolResult::success(format!("Duplicated {} element(s)", copies.len()))
            .with_elements(copies)
    }

    /// Ctrl+F: frame the selection's centroid in the viewport camera.
    fn focus_selection(&mut self, store: &mut dyn SceneStore) -> ToolResult {
        let ids: Vec<String> = store.selection().selected().to_vec();
        if ids.is_empty() {
            return ToolResult::failure(ToolError::EmptySelection { action: "focus" });
        }

        let mut center = Vec3::ZERO;
        let mut count = 0;
        for id in &ids {
            if let Some(element) = store.element(id) {
                center += element.position;
                count += 1;
            }
        }
        if count > 0 {
            center /= count as f32;
            if let Some(viewport) = &self.viewport {
                viewport.focus_on(center);
            }
        }
        ToolResult::success("Focused camera on selection")
    }

    fn toggle_snap(&mut self, store: &mut dyn SceneStore) -> ToolResult {
        let snap = !store.settings().snap_to_grid;
        store.update_settings(SettingsPatch::snap(snap));
        ToolResult::success(if snap {
            "Grid snapping enabled"
        } else {
            "Grid snapping disabled"
        })
    }

    fn set_mode(store: &mut dyn SceneStore, mode: TransformMode) -> ToolResult {
        store.set_transform_mode(mode);
        ToolResult::success(format!("Transform mode: {}", mode.label()))
    }

    fn lock_selection(&mut self, store: &mut dyn SceneStore) -> ToolResult {
        let ids: Vec<String> = store.selection().selected().to_vec();
        if ids.is_empty() {
            return ToolResult::failure(ToolError::EmptySelection { action: "lock" });
        }
        for id in &ids {
            store.update_element(id, ElementPatch::lock(true));
        }
        let elements: Vec<Element> = ids
            .iter()
            .filter_map(|id| store.element(id).cloned())
            .collect();
        ToolResult::success(format!("Locked {} element(s)", elements.len()))
            .with_elements(elements)
    }

    /// H hides the selection and then clears it; hidden elements cannot be
    /// picked, so leaving them selected would make the selection unreachable.
    fn hide_selection(&mut self, store: &mut dyn SceneStore) -> ToolResult {
        let ids: Vec<String> = store.selection().selected().to_vec();
        if ids.is_empty() {
            return ToolResult::failure(ToolError::EmptySelection { action: "hide" });
        }
        for id in &ids {
            store.update_element(id, ElementPatch::visibility(false));
        }
        let elements: Vec<Element> = ids
            .iter()
            .filter_map(|id| store.element(id).cloned())
            .collect();
        store.clear_selection();
        ToolResult::success(format!("Hid {} element(s)", elements.len())).with_elements(elements)
    }
}
