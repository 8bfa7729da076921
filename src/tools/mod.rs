//! Interaction tools and event dispatch.
//!
//! This module translates host pointer and keyboard events into scene
//! mutations. It defines the tool lifecycle contract, the event and result
//! protocols shared by every tool, the selection/transform tool, the wall
//! and floor drawing tools, and the registry that keeps exactly one tool
//! active.

pub mod event;
pub mod floor;
pub mod registry;
pub mod result;
pub mod select;
pub mod tool;
pub mod wall;

// Re-export commonly used types at module level
pub use event::{Key, Modifiers, PointerButton, ToolEvent};
pub use floor::FloorTool;
pub use registry::ToolRegistry;
pub use result::{ToolError, ToolResult};
pub use select::SelectTool;
pub use tool::{Tool, ToolState};
pub use wall::WallTool;
