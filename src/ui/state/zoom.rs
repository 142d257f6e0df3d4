// SPDX-License-Identifier: MPL-2.0
//! Zoom state management
//!
//! The viewer zooms by a multiplicative scale factor applied to the fitted frame.
//! Scale never depends on the frame index and survives frame changes untouched.

pub use crate::config::{
    DEFAULT_ZOOM_SCALE, DEFAULT_ZOOM_STEP, MAX_ZOOM_SCALE, MAX_ZOOM_STEP, MIN_ZOOM_SCALE,
    MIN_ZOOM_STEP,
};

/// Scale steps are rounded to this many subdivisions so repeated ±step
/// sequences land on the same values.
const SCALE_PRECISION: f32 = 100.0;

fn round_scale(value: f32) -> f32 {
    (value * SCALE_PRECISION).round() / SCALE_PRECISION
}

/// Zoom scale factor, guaranteed to be within the valid range (0.5–3.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomScale(f32);

impl ZoomScale {
    /// Creates a new scale, clamping the value to the valid range.
    ///
    /// Non-finite input falls back to the default scale.
    #[must_use]
    pub fn new(scale: f32) -> Self {
        if !scale.is_finite() {
            return Self::default();
        }
        Self(round_scale(scale.clamp(MIN_ZOOM_SCALE, MAX_ZOOM_SCALE)))
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_ZOOM_SCALE
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_ZOOM_SCALE
    }

    /// Returns the scale as a whole percentage for display (1.0 → 100).
    #[must_use]
    pub fn as_percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self(DEFAULT_ZOOM_SCALE)
    }
}

/// Zoom step, guaranteed to be within the valid range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomStep(f32);

impl ZoomStep {
    #[must_use]
    pub fn new(step: f32) -> Self {
        if !step.is_finite() {
            return Self::default();
        }
        Self(step.clamp(MIN_ZOOM_STEP, MAX_ZOOM_STEP))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for ZoomStep {
    fn default() -> Self {
        Self(DEFAULT_ZOOM_STEP)
    }
}

/// Current scale plus the configured step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoomState {
    pub scale: ZoomScale,
    pub step: ZoomStep,
}

impl ZoomState {
    #[must_use]
    pub fn with_step(step: ZoomStep) -> Self {
        Self {
            scale: ZoomScale::default(),
            step,
        }
    }

    /// `scale = min(scale + step, max)`
    pub fn zoom_in(&mut self) {
        self.scale = ZoomScale::new(self.scale.value() + self.step.value());
    }

    /// `scale = max(scale - step, min)`
    pub fn zoom_out(&mut self) {
        self.scale = ZoomScale::new(self.scale.value() - self.step.value());
    }

    pub fn reset(&mut self) {
        self.scale = ZoomScale::default();
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = ZoomScale::new(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scale_is_one() {
        let state = ZoomState::default();
        assert_eq!(state.scale.value(), 1.0);
        assert_eq!(state.step.value(), 0.2);
    }

    #[test]
    fn zoom_in_adds_one_step() {
        let mut state = ZoomState::default();
        state.zoom_in();
        assert_eq!(state.scale.value(), 1.2);
    }

    #[test]
    fn repeated_zoom_in_never_exceeds_max() {
        let mut state = ZoomState::default();
        for _ in 0..50 {
            state.zoom_in();
            assert!(state.scale.value() <= MAX_ZOOM_SCALE);
        }
        assert_eq!(state.scale.value(), MAX_ZOOM_SCALE);
        assert!(state.scale.is_max());
    }

    #[test]
    fn repeated_zoom_out_never_goes_below_min() {
        let mut state = ZoomState::default();
        for _ in 0..50 {
            state.zoom_out();
            assert!(state.scale.value() >= MIN_ZOOM_SCALE);
        }
        assert_eq!(state.scale.value(), MIN_ZOOM_SCALE);
        assert!(state.scale.is_min());
    }

    #[test]
    fn zoom_in_then_out_returns_to_start() {
        let mut state = ZoomState::default();
        for _ in 0..4 {
            state.zoom_in();
        }
        for _ in 0..4 {
            state.zoom_out();
        }
        assert_eq!(state.scale.value(), 1.0);
    }

    #[test]
    fn scale_clamps_and_rejects_nan() {
        assert_eq!(ZoomScale::new(10.0).value(), MAX_ZOOM_SCALE);
        assert_eq!(ZoomScale::new(0.0).value(), MIN_ZOOM_SCALE);
        assert_eq!(ZoomScale::new(f32::NAN), ZoomScale::default());
        assert_eq!(ZoomScale::new(1.5).as_percent(), 150);
    }

    #[test]
    fn reset_restores_default_scale() {
        let mut state = ZoomState::default();
        state.zoom_in();
        state.reset();
        assert_eq!(state.scale, ZoomScale::default());
    }
}
