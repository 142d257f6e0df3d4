// SPDX-License-Identifier: MPL-2.0
//! Nested TEA sub-components for the viewer.
//!
//! Each sub-component has its own State, Message, Effect, and handle() method.
//! The main component.rs orchestrates these sub-components.
//!
//! ## Architecture
//!
//! ```text
//! component.rs (orchestrator)
//!     ├── sequencer - Frame index, direction and autoplay
//!     ├── drag      - Pointer scrubbing
//!     ├── zoom      - Encapsulates ZoomState
//!     └── loading   - Which frames are decoded
//! ```

pub mod drag;
pub mod loading;
pub mod sequencer;
pub mod zoom;
