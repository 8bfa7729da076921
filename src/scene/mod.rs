//! Scene data model and store boundary.
//!
//! This module defines the building elements the editor manipulates, the
//! selection state attached to them, project-level settings, and the store
//! trait through which the interaction tools read and mutate all of it.

pub mod element;
pub mod project;
pub mod selection;
pub mod store;

// Re-export commonly used types at module level
pub use element::{DEFAULT_PICK_RADIUS, Element, ElementKind, ElementPatch};
pub use project::{ProjectSettings, SettingsPatch};
pub use selection::{SelectionState, TransformMode};
pub use store::{MemoryStore, SceneStore};
