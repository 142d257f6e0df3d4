// SPDX-License-Identifier: MPL-2.0
//! Loading state sub-component.
//!
//! Tracks which frames of the current set are decoded. The first frame is
//! requested on its own so the viewer becomes interactive before the whole
//! batch settles; every other frame arrives with the batch.

use crate::media::{FrameImage, LoadedFrame};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// What the viewer can show for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameAvailability<'a> {
    Ready(&'a FrameImage),
    /// Still loading.
    Pending,
    /// The batch settled without this frame.
    Unavailable,
}

/// Loading state for one mount.
#[derive(Debug, Clone, Default)]
pub struct State {
    frames: HashMap<String, FrameImage>,
    first_ready: bool,
    settled: bool,
    started_at: Option<Instant>,
}

/// Messages for the loading sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A new set started loading.
    Start,
    /// The priority frame finished (or failed).
    FirstFrame {
        uri: String,
        image: Option<FrameImage>,
    },
    /// The batch settled with these frames.
    Settled(Vec<LoadedFrame>),
    /// Forget everything (unmount).
    Clear,
}

/// Effects produced by the loading state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// A frame is now available to draw; interaction can start.
    BecameReady,
    /// All frames settled.
    Settled { loaded: usize },
}

impl State {
    /// Handle a loading state message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Start => {
                *self = Self {
                    started_at: Some(Instant::now()),
                    ..Self::default()
                };
                Effect::None
            }
            Message::FirstFrame { uri, image } => {
                let Some(image) = image else {
                    return Effect::None;
                };
                self.frames.insert(uri, image);
                self.mark_ready()
            }
            Message::Settled(loaded) => {
                self.settled = true;
                for frame in loaded {
                    self.frames.insert(frame.uri, frame.image);
                }
                self.first_ready = self.first_ready || !self.frames.is_empty();
                if let Some(started) = self.started_at {
                    tracing::debug!(
                        frames = self.frames.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "frame set settled"
                    );
                }
                Effect::Settled {
                    loaded: self.frames.len(),
                }
            }
            Message::Clear => {
                *self = Self::default();
                Effect::None
            }
        }
    }

    fn mark_ready(&mut self) -> Effect {
        if self.first_ready || self.frames.is_empty() {
            return Effect::None;
        }
        self.first_ready = true;
        Effect::BecameReady
    }

    /// Availability of the frame at `uri`.
    #[must_use]
    pub fn frame(&self, uri: &str) -> FrameAvailability<'_> {
        match self.frames.get(uri) {
            Some(image) => FrameAvailability::Ready(image),
            None if self.settled => FrameAvailability::Unavailable,
            None => FrameAvailability::Pending,
        }
    }

    /// True once any frame is decoded, or the batch settled with none.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.first_ready || self.settled
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.started_at.is_some() && !self.settled
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.frames.len()
    }

    /// Time since loading started, while it is still running.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at
            .filter(|_| !self.settled)
            .map(|started| started.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::tiny_frame;

    fn loaded(uri: &str) -> LoadedFrame {
        LoadedFrame {
            uri: uri.to_string(),
            image: tiny_frame(),
        }
    }

    #[test]
    fn frames_are_pending_until_settled() {
        let mut state = State::default();
        state.handle(Message::Start);
        assert!(state.is_loading());
        assert_eq!(state.frame("a.png"), FrameAvailability::Pending);
        assert!(!state.is_interactive());
    }

    #[test]
    fn first_frame_makes_viewer_interactive() {
        let mut state = State::default();
        state.handle(Message::Start);
        let effect = state.handle(Message::FirstFrame {
            uri: "a.png".into(),
            image: Some(tiny_frame()),
        });
        assert_eq!(effect, Effect::BecameReady);
        assert!(state.is_interactive());
        assert!(matches!(state.frame("a.png"), FrameAvailability::Ready(_)));
        assert_eq!(state.frame("b.png"), FrameAvailability::Pending);
    }

    #[test]
    fn failed_first_frame_waits_for_batch() {
        let mut state = State::default();
        state.handle(Message::Start);
        let effect = state.handle(Message::FirstFrame {
            uri: "a.png".into(),
            image: None,
        });
        assert_eq!(effect, Effect::None);
        assert!(!state.is_interactive());
    }

    #[test]
    fn missing_frames_become_unavailable_after_settle() {
        let mut state = State::default();
        state.handle(Message::Start);
        let effect = state.handle(Message::Settled(vec![loaded("a.png"), loaded("c.png")]));

        assert_eq!(effect, Effect::Settled { loaded: 2 });
        assert!(!state.is_loading());
        assert_eq!(state.frame("b.png"), FrameAvailability::Unavailable);
        assert!(matches!(state.frame("c.png"), FrameAvailability::Ready(_)));
    }

    #[test]
    fn batch_with_no_frames_still_settles() {
        let mut state = State::default();
        state.handle(Message::Start);
        let effect = state.handle(Message::Settled(Vec::new()));
        assert_eq!(effect, Effect::Settled { loaded: 0 });
        assert!(state.is_interactive());
    }

    #[test]
    fn clear_forgets_frames() {
        let mut state = State::default();
        state.handle(Message::Start);
        state.handle(Message::Settled(vec![loaded("a.png")]));
        state.handle(Message::Clear);
        assert_eq!(state.loaded_count(), 0);
        assert!(!state.is_settled());
        assert!(!state.is_loading());
    }
}
