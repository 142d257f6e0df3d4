// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Converts horizontal pointer travel into whole frame steps. The anchor is
//! moved to the pointer every time at least one step is produced, so long
//! drags are measured incrementally rather than from the original press.

pub use crate::config::{
    DEFAULT_DRAG_SENSITIVITY_PX, MAX_DRAG_SENSITIVITY_PX, MIN_DRAG_SENSITIVITY_PX,
};

/// Pixels of horizontal travel needed to advance one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSensitivity(f32);

impl DragSensitivity {
    #[must_use]
    pub fn new(pixels: f32) -> Self {
        if !pixels.is_finite() {
            return Self::default();
        }
        Self(pixels.clamp(MIN_DRAG_SENSITIVITY_PX, MAX_DRAG_SENSITIVITY_PX))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for DragSensitivity {
    fn default() -> Self {
        Self(DEFAULT_DRAG_SENSITIVITY_PX)
    }
}

/// Manages the grab-and-drag anchor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    /// Whether a drag operation is currently active
    pub is_dragging: bool,

    /// Horizontal position the next delta is measured from
    pub anchor_x: Option<f32>,
}

impl DragState {
    /// Starts a drag operation anchored at `x`
    pub fn start(&mut self, x: f32) {
        self.is_dragging = true;
        self.anchor_x = Some(x);
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.anchor_x = None;
    }

    /// Returns the signed number of frames the pointer moved past since the
    /// anchor, re-anchoring at `current_x` when the result is non-zero.
    ///
    /// `frame_delta = sign(dx) * floor(|dx| / sensitivity)`
    pub fn take_frame_delta(&mut self, current_x: f32, sensitivity: DragSensitivity) -> i64 {
        if !self.is_dragging {
            return 0;
        }
        let Some(anchor) = self.anchor_x else {
            return 0;
        };

        let delta = current_x - anchor;
        let steps = (delta.abs() / sensitivity.value()).floor() as i64;
        if steps == 0 {
            return 0;
        }

        self.anchor_x = Some(current_x);
        if delta > 0.0 {
            steps
        } else {
            -steps
        }
    }
}
