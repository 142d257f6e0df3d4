// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Plain state types with no Iced dependencies, driven by the viewer
//! sub-components.

pub mod drag;
pub mod frame_cursor;
pub mod zoom;

// Re-export commonly used types for convenience
pub use drag::{DragSensitivity, DragState};
pub use frame_cursor::{Direction, FrameCursor};
pub use zoom::{ZoomScale, ZoomState, ZoomStep};
