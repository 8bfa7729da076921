//! Scene store contract and the in-memory reference implementation.
//!
//! The interaction engine never owns elements; it mutates them through the
//! [`SceneStore`] trait. Hosts with a persistent project store implement the
//! trait over it; tests and simple hosts use [`MemoryStore`]. Every call is
//! synchronous and atomic from the tool's point of view, which is sound
//! because event dispatch is single-threaded. A store shared across UI
//! surfaces must add its own synchronization behind this boundary.

use chrono::Utc;
use glam::Vec3;
use log::warn;

use super::element::{Element, ElementPatch};
use super::project::{ProjectSettings, SettingsPatch};
use super::selection::{SelectionState, TransformMode};

/// Mutation and query surface the interaction tools depend on.
pub trait SceneStore {
    /// All elements in the scene, in insertion order.
    fn elements(&self) -> &[Element];

    /// Looks up a single element by id.
    fn element(&self, id: &str) -> Option<&Element>;

    /// Adds an element, assigning a fresh id if the element carries none.
    /// Returns the id under which the element was stored.
    fn add_element(&mut self, element: Element) -> String;

    /// Merges a partial update into an element. Returns false if the id is
    /// unknown.
    fn update_element(&mut self, id: &str, patch: ElementPatch) -> bool;

    /// Removes the given elements, dropping them from selection and hover.
    fn remove_elements(&mut self, ids: &[String]);

    /// Clones an element under a fresh id and returns the copy.
    fn duplicate_element(&mut self, id: &str) -> Option<Element>;

    /// Current selection state.
    fn selection(&self) -> &SelectionState;

    /// Selects an element; `additive` keeps the existing selection.
    fn select_element(&mut self, id: &str, additive: bool);

    /// Replaces the selection with the given ids (unknown ids are dropped,
    /// order is preserved, duplicates collapse to their first occurrence).
    fn select_elements(&mut self, ids: &[String]);

    /// Removes one element from the selection.
    fn deselect_element(&mut self, id: &str);

    /// Empties the selection.
    fn clear_selection(&mut self);

    /// Publishes which element is under the cursor.
    fn set_hovered(&mut self, id: Option<&str>);

    /// Switches the manipulation mode for the selection.
    fn set_transform_mode(&mut self, mode: TransformMode);

    /// Project editing settings.
    fn settings(&self) -> &ProjectSettings;

    /// Merges a partial settings update.
    fn update_settings(&mut self, patch: SettingsPatch);
}

/// Single-threaded in-memory scene store.
///
/// Keeps elements in a plain vector (scene sizes here are hundreds, not
/// millions) and enforces the store-side invariants: unique ids, strictly
/// positive scale components, selection free of dangling ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    elements: Vec<Element>,
    selection: SelectionState,
    settings: ProjectSettings,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with explicit initial settings.
    pub fn with_settings(settings: ProjectSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    fn fresh_id(&mut self, element: &Element) -> String {
        loop {
            self.next_id += 1;
            let candidate = format!("{}-{}", element.kind.label(), self.next_id);
            if self.element(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Drops scale components that would violate the strictly-positive
    /// invariant, keeping the previous value on the offending axis.
    fn sanitize_scale(current: Vec3, requested: Vec3) -> Vec3 {
        let mut scale = requested;
        for axis in 0..3 {
            if scale[axis] <= 0.0 {
                warn!(
                    "Ignoring non-positive scale component {} on axis {axis}",
                    scale[axis]
                );
                scale[axis] = current[axis];
            }
        }
        scale
    }
}

impl SceneStore for MemoryStore {
    fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn add_element(&mut self, mut element: Element) -> String {
        if element.id.is_empty() || self.element(&element.id).is_some() {
            element.id = self.fresh_id(&element);
        }
        element.scale = Self::sanitize_scale(Vec3::ONE, element.scale);
        let id = element.id.clone();
        self.elements.push(element);
        id
    }

    fn update_element(&mut self, id: &str, patch: ElementPatch) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if let Some(position) = patch.position {
            element.position = position;
        }
        if let Some(rotation) = patch.rotation {
            element.rotation = rotation;
        }
        if let Some(scale) = patch.scale {
            element.scale = Self::sanitize_scale(element.scale, scale);
        }
        if let Some(visible) = patch.visible {
            element.visible = visible;
        }
        if let Some(locked) = patch.locked {
            element.locked = locked;
        }
        if let Some(properties) = patch.properties {
            element.properties.extend(properties);
        }
        element.modified_at = Utc::now();
        true
    }

    fn remove_elements(&mut self, ids: &[String]) {
        self.elements.retain(|e| !ids.contains(&e.id));
        for id in ids {
            self.selection.remove(id);
        }
        if let Some(hovered) = &self.selection.hovered {
            if ids.contains(hovered) {
                self.selection.hovered = None;
            }
        }
    }

    fn duplicate_element(&mut self, id: &str) -> Option<Element> {
        let mut copy = self.element(id)?.clone();
        copy.id = String::new();
        let now = Utc::now();
        copy.created_at = now;
        copy.modified_at = now;
        let new_id = self.add_element(copy);
        self.element(&new_id).cloned()
    }

    fn selection(&self) -> &SelectionState {
        &self.selection
    }

    fn select_element(&mut self, id: &str, additive: bool) {
        if self.element(id).is_none() {
            warn!("Ignoring selection of unknown element {id}");
            return;
        }
        if !additive {
            self.selection.clear();
        }
        self.selection.add(id);
    }

    fn select_elements(&mut self, ids: &[String]) {
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            if self.element(id).is_some() && !resolved.contains(id) {
                resolved.push(id.clone());
            }
        }
        self.selection.replace(resolved);
    }

    fn deselect_element(&mut self, id: &str) {
        self.selection.remove(id);
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn set_hovered(&mut self, id: Option<&str>) {
        self.selection.hovered = id.map(str::to_string);
    }

    fn set_transform_mode(&mut self, mode: TransformMode) {
        self.selection.transform_mode = mode;
    }

    fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    fn update_settings(&mut self, patch: SettingsPatch) {
        if let Some(grid_size) = patch.grid_size {
            if grid_size > 0.0 {
                self.settings.grid_size = grid_size;
            } else {
                warn!("Ignoring non-positive grid size {grid_size}");
            }
        }
        if let Some(snap) = patch.snap_to_grid {
            self.settings.snap_to_grid = snap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::element::ElementKind;

    fn store_with_walls(count: usize) -> (MemoryStore, Vec<String>) {
        let mut store = MemoryStore::new();
        let ids = (0..count)
            .map(|i| {
                store.add_element(Element::new(
                    ElementKind::Wall,
                    Vec3::new(i as f32, 0.0, 0.0),
                ))
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn add_element_assigns_kind_prefixed_ids() {
        let (store, ids) = store_with_walls(2);
        assert_eq!(ids, ["wall-1", "wall-2"]);
        assert_eq!(store.elements().len(), 2);
    }

    #[test]
    fn add_element_keeps_caller_supplied_unique_id() {
        let mut store = MemoryStore::new();
        let mut element = Element::new(ElementKind::Door, Vec3::ZERO);
        element.id = "front-door".to_string();
        assert_eq!(store.add_element(element), "front-door");
    }

    #[test]
    fn update_merges_partial_fields() {
        let (mut store, ids) = store_with_walls(1);
        let before = store.element(&ids[0]).unwrap().clone();

        let ok = store.update_element(
            &ids[0],
            ElementPatch {
                position: Some(Vec3::new(5.0, 0.0, 5.0)),
                locked: Some(true),
                ..ElementPatch::default()
            },
        );
        assert!(ok);

        let after = store.element(&ids[0]).unwrap();
        assert_eq!(after.position, Vec3::new(5.0, 0.0, 5.0));
        assert!(after.locked);
        assert_eq!(after.rotation, before.rotation);
        assert_eq!(after.scale, before.scale);
        assert!(after.modified_at >= before.modified_at);
    }

    #[test]
    fn update_merges_properties_key_by_key() {
        let mut store = MemoryStore::new();
        let id = store.add_element(
            Element::new(ElementKind::Wall, Vec3::ZERO)
                .with_property("thickness", 0.2)
                .with_property("material", "brick"),
        );

        let mut props = std::collections::HashMap::new();
        props.insert("thickness".to_string(), serde_json::json!(0.4));
        store.update_element(
            &id,
            ElementPatch {
                properties: Some(props),
                ..ElementPatch::default()
            },
        );

        let element = store.element(&id).unwrap();
        assert_eq!(element.property_f32("thickness"), Some(0.4));
        assert_eq!(
            element.properties.get("material"),
            Some(&serde_json::json!("brick"))
        );
    }

    #[test]
    fn update_unknown_id_reports_false() {
        let mut store = MemoryStore::new();
        assert!(!store.update_element("ghost", ElementPatch::default()));
    }

    #[test]
    fn scale_invariant_survives_bad_patches() {
        let (mut store, ids) = store_with_walls(1);
        store.update_element(
            &ids[0],
            ElementPatch {
                scale: Some(Vec3::new(2.0, 0.0, -1.0)),
                ..ElementPatch::default()
            },
        );
        let scale = store.element(&ids[0]).unwrap().scale;
        assert_eq!(scale, Vec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn remove_prunes_selection_and_hover() {
        let (mut store, ids) = store_with_walls(3);
        store.select_elements(&ids);
        store.set_hovered(Some(&ids[1]));

        store.remove_elements(&ids[..2].to_vec());

        assert_eq!(store.elements().len(), 1);
        assert_eq!(store.selection().selected(), [ids[2].clone()]);
        assert_eq!(store.selection().hovered, None);
    }

    #[test]
    fn duplicate_gets_fresh_id_and_same_position() {
        let mut store = MemoryStore::new();
        let id = store.add_element(
            Element::new(ElementKind::Window, Vec3::new(2.0, 0.0, 3.0)).with_property("width", 1.5),
        );

        let copy = store.duplicate_element(&id).unwrap();
        assert_ne!(copy.id, id);
        assert_eq!(copy.position, Vec3::new(2.0, 0.0, 3.0));
        assert_eq!(copy.property_f32("width"), Some(1.5));
        assert_eq!(store.elements().len(), 2);
    }

    #[test]
    fn duplicate_unknown_id_is_none() {
        let mut store = MemoryStore::new();
        assert!(store.duplicate_element("ghost").is_none());
    }

    #[test]
    fn select_element_replaces_unless_additive() {
        let (mut store, ids) = store_with_walls(2);
        store.select_element(&ids[0], false);
        store.select_element(&ids[1], false);
        assert_eq!(store.selection().selected(), [ids[1].clone()]);

        store.select_element(&ids[0], true);
        assert_eq!(store.selection().selected(), [ids[1].clone(), ids[0].clone()]);
    }

    #[test]
    fn select_elements_drops_unknown_and_duplicate_ids() {
        let (mut store, ids) = store_with_walls(2);
        store.select_elements(&[
            ids[1].clone(),
            "ghost".to_string(),
            ids[0].clone(),
            ids[1].clone(),
        ]);
        assert_eq!(store.selection().selected(), [ids[1].clone(), ids[0].clone()]);
    }

    #[test]
    fn settings_patch_rejects_bad_grid_size() {
        let mut store = MemoryStore::new();
        store.update_settings(SettingsPatch {
            grid_size: Some(-2.0),
            snap_to_grid: Some(false),
        });
        assert_eq!(store.settings().grid_size, 1.0);
        assert!(!store.settings().snap_to_grid);
    }
}
