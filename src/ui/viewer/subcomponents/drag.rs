// SPDX-License-Identifier: MPL-2.0
//! Drag-to-rotate sub-component.
//!
//! Iced's `mouse_area` reports presses without a position, so the last known
//! cursor position is tracked here and used as the drag anchor.

use crate::ui::state::{DragSensitivity, DragState};
use iced::Point;

/// Drag sub-component state.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// The underlying anchor arithmetic.
    pub inner: DragState,
    /// Pixels per frame step.
    sensitivity: DragSensitivity,
    /// Current cursor position within the viewer.
    cursor_position: Option<Point>,
}

/// Messages for the drag sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Left button went down over the frame.
    Pressed,
    /// Cursor moved over the frame.
    Moved(Point),
    /// Left button released.
    Released,
    /// Cursor left the frame; ends any drag.
    Exited,
}

/// Effects produced by drag operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// A drag began; autoplay must stop.
    Started,
    /// Advance by this many frames (signed).
    Step(i64),
    Ended,
}

impl State {
    #[must_use]
    pub fn new(sensitivity: DragSensitivity) -> Self {
        Self {
            sensitivity,
            ..Self::default()
        }
    }

    /// Handle a drag message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Pressed => match self.cursor_position {
                Some(position) => {
                    self.inner.start(position.x);
                    Effect::Started
                }
                None => Effect::None,
            },
            Message::Moved(position) => {
                self.cursor_position = Some(position);
                match self.inner.take_frame_delta(position.x, self.sensitivity) {
                    0 => Effect::None,
                    delta => Effect::Step(delta),
                }
            }
            Message::Released => self.end(),
            Message::Exited => {
                self.cursor_position = None;
                self.end()
            }
        }
    }

    fn end(&mut self) -> Effect {
        if self.inner.is_dragging {
            self.inner.stop();
            Effect::Ended
        } else {
            Effect::None
        }
    }

    /// Drops the anchor without reporting anything.
    pub fn cancel(&mut self) {
        self.inner.stop();
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging
    }

    #[must_use]
    pub fn cursor_position(&self) -> Option<Point> {
        self.cursor_position
    }

    #[must_use]
    pub fn sensitivity(&self) -> DragSensitivity {
        self.sensitivity
    }
}
