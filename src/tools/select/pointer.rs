use glam::{Vec2, Vec3};

use crate::math;
use crate::scene::{Element, ElementPatch, SceneStore};
use crate::tools::event::{Modifiers, PointerButton};
use crate::tools::result::ToolResult;

use super::{ContextMenu, Interaction, SelectTool, SelectionBox};

impl SelectTool {
    /// Processes a pointer press.
    ///
    /// # Behavior
    /// - Primary on an element: selection semantics by modifier (replace,
    ///   Ctrl toggles, Shift adds), then arms a potential drag
    /// - Primary on empty space: clears selection (unless a modifier is
    ///   held) and starts a rubber band
    /// - Primary within the double-click window: opens the element for
    ///   properties instead of re-selecting
    /// - Secondary on an element: stages the context menu
    pub(super) fn on_pointer_down(
        &mut self,
        position: Vec2,
        button: PointerButton,
        modifiers: Modifiers,
        store: &mut dyn SceneStore,
    ) -> Option<ToolResult> {
        match button {
            PointerButton::Primary => self.on_primary_down(position, modifiers, store),
            PointerButton::Secondary => self.on_secondary_down(position, store),
            PointerButton::Middle => None,
        }
    }

    fn on_primary_down(
        &mut self,
        position: Vec2,
        modifiers: Modifiers,
        store: &mut dyn SceneStore,
    ) -> Option<ToolResult> {
        let viewport = self.viewport.clone()?;

        // Any primary press dismisses a staged context menu.
        self.context_menu = None;

        let double_click = self
            .last_press
            .is_some_and(|at| at.elapsed() <= self.double_click_window);
        // A double-click consumes the press pair; a third press starts over.
        self.last_press = if double_click {
            None
        } else {
            Some(std::time::Instant::now())
        };

        let point = viewport.intersection_point(position)?;
        let hit = self.hit_test(store, point);

        if double_click {
            self.interaction = Interaction::Neutral;
            let element = hit?;
            store.select_element(&element.id, false);
            return Some(
                ToolResult::success(format!("Opened properties for {}", element.id))
                    .with_element(element),
            );
        }

        match hit {
            Some(element) => {
                let (message, still_selected) = if modifiers.ctrl {
                    if store.selection().contains(&element.id) {
                        store.deselect_element(&element.id);
                        (format!("Deselected {}", element.id), false)
                    } else {
                        store.select_element(&element.id, true);
                        (format!("Added {} to selection", element.id), true)
                    }
                } else if modifiers.shift {
                    store.select_element(&element.id, true);
                    (format!("Added {} to selection", element.id), true)
                } else {
                    store.select_element(&element.id, false);
                    (format!("Selected {}", element.id), true)
                };

                // A press that deselected its element cannot start a drag.
                self.interaction = if still_selected {
                    Interaction::Pressed {
                        anchor: point,
                        press: position,
                    }
                } else {
                    Interaction::Neutral
                };

                Some(ToolResult::success(message).with_element(element))
            }
            None => {
                if modifiers.none_held() {
                    store.clear_selection();
                }
                self.interaction = Interaction::BoxSelecting {
                    band: SelectionBox {
                        start: point,
                        end: point,
                    },
                };
                None
            }
        }
    }

    fn on_secondary_down(
        &mut self,
        position: Vec2,
        store: &mut dyn SceneStore,
    ) -> Option<ToolResult> {
        let viewport = self.viewport.clone()?;
        let point = viewport.intersection_point(position)?;

        match self.hit_test(store, point) {
            Some(element) => {
                // Right-clicking outside the selection retargets it; within
                // the selection the menu applies to all selected elements.
                if !store.selection().contains(&element.id) {
                    store.select_element(&element.id, false);
                }
                let elements: Vec<Element> = store
                    .selection()
                    .selected()
                    .iter()
                    .filter_map(|id| store.element(id).cloned())
                    .collect();
                let count = elements.len();
                self.context_menu = Some(ContextMenu {
                    position: math::ndc_to_pixels(position, &viewport.canvas_bounds()),
                    elements: elements.clone(),
                });
                Some(
                    ToolResult::success(format!("Context menu on {count} element(s)"))
                        .with_elements(elements),
                )
            }
            None => {
                self.context_menu = None;
                None
            }
        }
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - Neutral: publishes hover feedback
    /// - Pressed: promotes to a drag once the pixel threshold is exceeded
    /// - Dragging: applies a grid-snapped delta to the unlocked selection
    /// - Box-selecting: stretches the rubber band
    pub(super) fn on_pointer_move(
        &mut self,
        position: Vec2,
        store: &mut dyn SceneStore,
    ) -> Option<ToolResult> {
        let viewport = self.viewport.clone()?;

        match self.interaction {
            Interaction::Neutral => {
                let point = viewport.intersection_point(position)?;
                let hovered = self.hit_test(store, point).map(|element| element.id);
                store.set_hovered(hovered.as_deref());
                None
            }
            Interaction::Pressed { anchor, press } => {
                let moved_px =
                    math::pixel_distance(press, position, &viewport.canvas_bounds());
                if moved_px < self.drag_threshold_px {
                    // Pointer jitter below the threshold stays a click.
                    return None;
                }
                self.interaction = Interaction::Dragging { anchor };
                self.apply_drag(position, store)
            }
            Interaction::Dragging { .. } => self.apply_drag(position, store),
            Interaction::BoxSelecting { mut band } => {
                if let Some(point) = viewport.intersection_point(position) {
                    band.end = point;
                    self.interaction = Interaction::BoxSelecting { band };
                }
                None
            }
        }
    }

    /// Applies one incremental drag step.
    ///
    /// The delta is the difference between the current and previous
    /// ground-plane intersections, snapped per-axis when the project asks
    /// for it. The anchor always advances to the current intersection, so
    /// each move is judged locally rather than against the original press
    /// point. Locked members of the selection are skipped.
    fn apply_drag(&mut self, position: Vec2, store: &mut dyn SceneStore) -> Option<ToolResult> {
        let viewport = self.viewport.clone()?;
        let Interaction::Dragging { anchor } = self.interaction else {
            return None;
        };
        let point = viewport.intersection_point(position)?;

        let mut delta = point - anchor;
        let settings = store.settings();
        if settings.snap_to_grid {
            delta = math::snap_vec3(delta, settings.grid_size);
        }
        self.interaction = Interaction::Dragging { anchor: point };

        if delta == Vec3::ZERO {
            return None;
        }

        let ids: Vec<String> = store.selection().selected().to_vec();
        let mut moved = 0;
        for id in &ids {
            let Some(element) = store.element(id) else {
                continue;
            };
            if element.locked {
                continue;
            }
            let target = element.position + delta;
            if store.update_element(id, ElementPatch::position(target)) {
                moved += 1;
            }
        }

        if moved == 0 {
            return None;
        }
        Some(ToolResult::success(format!("Moved {moved} element(s)")))
    }

    /// Processes a pointer release.
    ///
    /// Finishes the gesture in progress: a rubber band selects the enclosed
    /// elements (replacing the selection, or adding to it when Ctrl is held
    /// on release), a drag reports its summary, a plain click needs no
    /// further work because selection was applied on press.
    pub(super) fn on_pointer_up(
        &mut self,
        position: Vec2,
        button: PointerButton,
        modifiers: Modifiers,
        store: &mut dyn SceneStore,
    ) -> Option<ToolResult> {
        if button != PointerButton::Primary {
            return None;
        }

        let interaction = std::mem::replace(&mut self.interaction, Interaction::Neutral);
        match interaction {
            Interaction::BoxSelecting { mut band } => {
                if let Some(viewport) = &self.viewport {
                    if let Some(point) = viewport.intersection_point(position) {
                        band.end = point;
                    }
                }
                let rect = math::GroundRect::from_corners(band.start, band.end);
                let ids: Vec<String> = store
                    .elements()
                    .iter()
                    .filter(|e| e.visible && rect.contains(e.position))
                    .map(|e| e.id.clone())
                    .collect();

                if modifiers.ctrl {
                    for id in &ids {
                        store.select_element(id, true);
                    }
                } else {
                    store.select_elements(&ids);
                }

                let elements: Vec<Element> = ids
                    .iter()
                    .filter_map(|id| store.element(id).cloned())
                    .collect();
                let count = elements.len();
                Some(
                    ToolResult::success(format!("Selected {count} element(s)"))
                        .with_elements(elements),
                )
            }
            Interaction::Dragging { .. } => {
                let moved = store
                    .selection()
                    .selected()
                    .iter()
                    .filter(|id| store.element(id).is_some_and(|e| !e.locked))
                    .count();
                Some(ToolResult::success(format!("Moved {moved} element(s)")))
            }
            Interaction::Pressed { .. } | Interaction::Neutral => None,
        }
    }
}
