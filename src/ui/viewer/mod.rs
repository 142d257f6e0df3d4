// SPDX-License-Identifier: MPL-2.0
//! Turntable viewer: a frame sequence shown as a rotatable product.
//!
//! [`component`] owns the state and update logic, [`pane`] draws the stage,
//! [`controls`] the button bar and [`empty_state`] the "no images" screen.

pub mod component;
pub mod controls;
pub mod empty_state;
pub mod pane;
pub mod subcomponents;

pub use subcomponents::sequencer::AutoplayCadence;

use crate::config::{DEFAULT_DRAG_SENSITIVITY_PX, DEFAULT_ZOOM_STEP};
use crate::ui::state::{DragSensitivity, ZoomStep};

/// User-tunable interaction parameters, resolved from the config file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerTuning {
    /// Horizontal pixels of drag per frame.
    pub drag_sensitivity: DragSensitivity,
    pub zoom_step: ZoomStep,
    pub cadence: AutoplayCadence,
}

impl Default for ViewerTuning {
    fn default() -> Self {
        Self {
            drag_sensitivity: DragSensitivity::new(DEFAULT_DRAG_SENSITIVITY_PX),
            zoom_step: ZoomStep::new(DEFAULT_ZOOM_STEP),
            cadence: AutoplayCadence::default(),
        }
    }
}
