//! Interactive selection and transform engine for building-layout editing.
//!
//! The crate turns raw pointer/keyboard input into scene mutations: picking
//! elements under the cursor, disambiguating clicks from drags from
//! double-clicks, rubber-band multi-selection, grid-snapped dragging, and
//! keyboard-driven mode switching. It owns no window, render loop, or
//! persistence; the hosting UI supplies a [`viewport::ViewportContext`] and
//! a [`scene::SceneStore`] and forwards every input event to the active
//! tool.

pub mod config;
pub mod math;
pub mod scene;
pub mod tools;
pub mod viewport;

pub use config::Config;
