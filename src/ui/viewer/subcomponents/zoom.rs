// SPDX-License-Identifier: MPL-2.0
//! Zoom sub-component encapsulating ZoomState and its handlers.

use crate::ui::state::{ZoomScale, ZoomState, ZoomStep};

/// Zoom sub-component state.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// The underlying zoom state (existing type).
    pub inner: ZoomState,
}

/// Messages for the zoom sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    ZoomIn,
    ZoomOut,
    /// Reset scale to 1.0.
    Reset,
    /// Restore a scale, e.g. from persisted state.
    SetScale(f32),
}

/// Effects produced by zoom changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    ZoomChanged(ZoomScale),
}

impl State {
    #[must_use]
    pub fn new(step: ZoomStep) -> Self {
        Self {
            inner: ZoomState::with_step(step),
        }
    }

    /// Handle a zoom message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        let before = self.inner.scale;
        match msg {
            Message::ZoomIn => self.inner.zoom_in(),
            Message::ZoomOut => self.inner.zoom_out(),
            Message::Reset => self.inner.reset(),
            Message::SetScale(scale) => self.inner.set_scale(scale),
        }

        if self.inner.scale == before {
            Effect::None
        } else {
            Effect::ZoomChanged(self.inner.scale)
        }
    }

    #[must_use]
    pub fn scale(&self) -> ZoomScale {
        self.inner.scale
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        !self.inner.scale.is_max()
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        !self.inner.scale.is_min()
    }
}
