// SPDX-License-Identifier: MPL-2.0
//! Viewer component encapsulating state and update logic.
//!
//! The component is mounted with a product name and an image list, preloads
//! the frames through the shared cache, restores the product's last frame,
//! zoom and direction, and writes them back whenever they change.
//!
//! Every async result and autoplay tick is tagged with the mount generation
//! that produced it; anything from an older generation is dropped on arrival.

use crate::app::persisted_state::{storage_key, PersistedViewerState, SharedStateStore};
use crate::error::Error;
use crate::media::{FrameImage, FrameSet, LoadedFrame, Preloader};
use crate::ui::state::{Direction, ZoomScale};
use crate::ui::viewer::subcomponents::{drag, loading, sequencer, zoom};
use crate::ui::viewer::{controls, empty_state, pane, ViewerTuning};
use iced::widget::{progress_bar, Column, Container};
use iced::{event, keyboard, time, window, Element, Length, Subscription, Task};

/// Messages emitted by viewer-related widgets and async work.
#[derive(Debug, Clone)]
pub enum Message {
    /// The frame shown first finished loading.
    FirstFrameLoaded {
        generation: u64,
        uri: String,
        result: Result<FrameImage, Error>,
    },
    /// Every frame of the set settled.
    FramesPreloaded {
        generation: u64,
        frames: Vec<LoadedFrame>,
    },
    Pointer(drag::Message),
    Controls(controls::Message),
    AutoplayTick {
        generation: u64,
    },
    NextFrame,
    PreviousFrame,
    SetFrame(usize),
    RawEvent {
        window: window::Id,
        event: event::Event,
    },
}

/// What the viewer is currently able to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// The image list was empty after filtering.
    NoImages,
    /// No frame is decoded yet.
    Loading,
    Ready,
}

/// Services shared by every viewer instance.
#[derive(Debug, Clone)]
pub struct Services {
    pub preloader: Preloader,
    pub store: SharedStateStore,
    pub tuning: ViewerTuning,
    pub max_frames: usize,
}

/// Complete viewer state for one mounted product.
#[derive(Debug)]
pub struct State {
    services: Services,
    product_name: String,
    frames: FrameSet,
    generation: u64,
    mounted: bool,
    sequencer: sequencer::State,
    drag: drag::State,
    zoom: zoom::State,
    loading: loading::State,
    /// Last snapshot handed to the store; `None` until hydration finished.
    last_saved: Option<PersistedViewerState>,
}

impl State {
    #[must_use]
    pub fn new(services: Services) -> Self {
        let drag = drag::State::new(services.tuning.drag_sensitivity);
        let zoom = zoom::State::new(services.tuning.zoom_step);
        Self {
            services,
            product_name: String::new(),
            frames: FrameSet::default(),
            generation: 0,
            mounted: false,
            sequencer: sequencer::State::default(),
            drag,
            zoom,
            loading: loading::State::default(),
            last_saved: None,
        }
    }

    /// Mounts the viewer for `product_name`, replacing whatever was shown.
    ///
    /// Restores the product's saved state and returns the task that loads
    /// its frames. An empty list shows the "no images" state and neither
    /// loads nor persists anything.
    pub fn mount<I, S>(&mut self, product_name: &str, images: I) -> Task<Message>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.unmount();
        self.generation = self.generation.wrapping_add(1);
        self.mounted = true;
        self.product_name = product_name.trim().to_string();
        self.frames = FrameSet::from_uris(images, self.services.max_frames);

        tracing::info!(
            product = %self.product_name,
            key = %storage_key(&self.product_name),
            frames = self.frames.len(),
            generation = self.generation,
            "mounting viewer"
        );

        self.hydrate();
        self.start_loading()
    }

    /// Replaces the image list of the mounted product.
    ///
    /// An identical list is a no-op. Otherwise the frames are reloaded, the
    /// current index is clamped to the new length and autoplay stops.
    pub fn set_frames<I, S>(&mut self, images: I) -> Task<Message>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.mounted {
            return Task::none();
        }

        let frames = FrameSet::from_uris(images, self.services.max_frames);
        if frames.same_frames(&self.frames) {
            return Task::none();
        }

        self.generation = self.generation.wrapping_add(1);
        tracing::info!(
            product = %self.product_name,
            frames = frames.len(),
            generation = self.generation,
            "frame list replaced"
        );

        let was_empty = self.frames.is_empty();
        self.frames = frames;
        self.drag.cancel();
        self.loading.handle(loading::Message::Clear);

        if was_empty {
            // Nothing was hydrated for an empty set.
            self.hydrate();
        } else {
            self.sequencer = sequencer::State::new(
                self.frames.len(),
                self.sequencer.index(),
                self.sequencer.direction(),
            );
            if self.frames.is_empty() {
                self.last_saved = None;
            }
            self.persist_if_changed();
        }

        self.start_loading()
    }

    /// Tears the viewer down. Pending results and ticks are invalidated; the
    /// shared image cache is left untouched.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        tracing::debug!(product = %self.product_name, "unmounting viewer");

        self.generation = self.generation.wrapping_add(1);
        self.mounted = false;
        self.product_name.clear();
        self.frames = FrameSet::default();
        self.sequencer = sequencer::State::default();
        self.drag.cancel();
        self.zoom.handle(zoom::Message::Reset);
        self.loading.handle(loading::Message::Clear);
        self.last_saved = None;
    }

    fn hydrate(&mut self) {
        if self.frames.is_empty() {
            self.sequencer = sequencer::State::default();
            self.last_saved = None;
            return;
        }

        let restored = self.services.store.load(&self.product_name);
        let record = restored.unwrap_or_default();
        self.sequencer =
            sequencer::State::new(self.frames.len(), record.frame_index, record.direction);
        self.zoom.handle(zoom::Message::SetScale(record.scale));

        tracing::debug!(
            product = %self.product_name,
            restored = restored.is_some(),
            index = self.sequencer.index(),
            scale = self.zoom.scale().value(),
            "viewer state hydrated"
        );

        self.last_saved = Some(self.snapshot());
    }

    fn start_loading(&mut self) -> Task<Message> {
        if self.frames.is_empty() {
            tracing::info!(product = %self.product_name, "no images to show");
            return Task::none();
        }

        self.loading.handle(loading::Message::Start);
        let generation = self.generation;

        let first_task = match self.frames.get(self.sequencer.index()) {
            Some(uri) => {
                let preloader = self.services.preloader.clone();
                let uri = uri.to_string();
                let request = uri.clone();
                Task::perform(
                    async move { preloader.load_first(request).await },
                    move |result| Message::FirstFrameLoaded {
                        generation,
                        uri,
                        result,
                    },
                )
            }
            None => Task::none(),
        };

        let preloader = self.services.preloader.clone();
        let uris = self.frames.unique();
        let batch_task = Task::perform(
            async move { preloader.preload(uris).await },
            move |frames| Message::FramesPreloaded { generation, frames },
        );

        Task::batch([first_task, batch_task])
    }

    /// Handles a viewer message.
    pub fn handle_message(&mut self, message: Message) {
        match message {
            Message::FirstFrameLoaded {
                generation,
                uri,
                result,
            } => {
                if self.is_stale(generation) {
                    return;
                }
                let effect = self.loading.handle(loading::Message::FirstFrame {
                    uri,
                    image: result.ok(),
                });
                if effect == loading::Effect::BecameReady {
                    tracing::debug!(product = %self.product_name, "first frame ready");
                }
            }
            Message::FramesPreloaded { generation, frames } => {
                if self.is_stale(generation) {
                    return;
                }
                if let loading::Effect::Settled { loaded } =
                    self.loading.handle(loading::Message::Settled(frames))
                {
                    let distinct = self.frames.unique().len();
                    tracing::info!(
                        product = %self.product_name,
                        loaded,
                        failed = distinct.saturating_sub(loaded),
                        "frames ready"
                    );
                }
            }
            Message::Pointer(pointer) => self.handle_pointer(pointer),
            Message::Controls(control) => self.handle_control(control),
            Message::AutoplayTick { generation } => {
                if self.is_stale(generation) {
                    return;
                }
                self.sequencer.handle(sequencer::Message::Tick);
            }
            Message::NextFrame => self.step(1),
            Message::PreviousFrame => self.step(-1),
            Message::SetFrame(index) => {
                if self.is_interactive() {
                    self.sequencer.handle(sequencer::Message::SetFrame(index));
                }
            }
            Message::RawEvent { event, .. } => {
                if let Some(message) = keyboard_message(&event) {
                    self.handle_message(message);
                }
                return;
            }
        }

        self.persist_if_changed();
    }

    fn is_stale(&self, generation: u64) -> bool {
        let stale = !self.mounted || generation != self.generation;
        if stale {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding stale viewer result"
            );
        }
        stale
    }

    fn step(&mut self, delta: i64) {
        if self.is_interactive() {
            self.sequencer.handle(sequencer::Message::Step(delta));
        }
    }

    fn handle_pointer(&mut self, pointer: drag::Message) {
        // Single-frame sets ignore drag entirely.
        if self.frames.len() <= 1 {
            return;
        }
        if matches!(pointer, drag::Message::Pressed) && !self.is_interactive() {
            return;
        }

        match self.drag.handle(pointer) {
            drag::Effect::Started => {
                if self.sequencer.handle(sequencer::Message::Stop)
                    == sequencer::Effect::PlaybackChanged(false)
                {
                    tracing::debug!("drag stopped autoplay");
                }
            }
            drag::Effect::Step(delta) => {
                self.sequencer.handle(sequencer::Message::Step(delta));
            }
            drag::Effect::Ended | drag::Effect::None => {}
        }
    }

    fn handle_control(&mut self, control: controls::Message) {
        match control {
            controls::Message::ToggleAutoplay => {
                if !self.is_interactive() {
                    return;
                }
                if let sequencer::Effect::PlaybackChanged(playing) =
                    self.sequencer.handle(sequencer::Message::ToggleAutoplay)
                {
                    tracing::debug!(
                        playing,
                        interval_ms = self.autoplay_interval().as_millis() as u64,
                        "autoplay toggled"
                    );
                }
            }
            controls::Message::ToggleDirection => {
                self.sequencer.handle(sequencer::Message::ToggleDirection);
            }
            controls::Message::ZoomIn => {
                self.zoom.handle(zoom::Message::ZoomIn);
            }
            controls::Message::ZoomOut => {
                self.zoom.handle(zoom::Message::ZoomOut);
            }
            controls::Message::ResetView => self.reset_view(),
        }
    }

    /// Frame 0, scale 1.0, autoplay off. Direction is kept.
    pub fn reset_view(&mut self) {
        self.drag.cancel();
        self.sequencer.handle(sequencer::Message::Reset);
        self.zoom.handle(zoom::Message::Reset);
    }

    fn snapshot(&self) -> PersistedViewerState {
        PersistedViewerState {
            frame_index: self.sequencer.index(),
            scale: self.zoom.scale().value(),
            direction: self.sequencer.direction(),
        }
    }

    /// Writes the snapshot if it differs from the last one written. Write
    /// failures are logged and retried on the next change.
    fn persist_if_changed(&mut self) {
        let Some(last) = self.last_saved else {
            return;
        };
        if self.frames.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        if snapshot == last {
            return;
        }

        match self.services.store.save(&self.product_name, &snapshot) {
            Ok(()) => {
                tracing::debug!(
                    product = %self.product_name,
                    index = snapshot.frame_index,
                    scale = snapshot.scale,
                    "viewer state saved"
                );
                self.last_saved = Some(snapshot);
            }
            Err(err) => {
                tracing::warn!(product = %self.product_name, error = %err, "failed to save viewer state");
            }
        }
    }

    /// Autoplay timer; only present while playing a multi-frame set.
    ///
    /// The subscription identity includes the generation and frame count so a
    /// new set never receives ticks meant for the old one.
    pub fn subscription(&self) -> Subscription<Message> {
        if !self.mounted || !self.sequencer.is_playing() || self.frames.len() <= 1 {
            return Subscription::none();
        }

        time::every(self.autoplay_interval())
            .with((self.generation, self.frames.len()))
            .map(|((generation, _), _)| Message::AutoplayTick { generation })
    }

    #[must_use]
    pub fn display_state(&self) -> DisplayState {
        if self.frames.is_empty() {
            DisplayState::NoImages
        } else if self.loading.is_interactive() {
            DisplayState::Ready
        } else {
            DisplayState::Loading
        }
    }

    fn is_interactive(&self) -> bool {
        self.display_state() == DisplayState::Ready
    }

    pub fn view(&self) -> Element<'_, Message> {
        let state = self.display_state();
        if state == DisplayState::NoImages {
            return empty_state::view(&self.product_name);
        }

        let current = self
            .frames
            .get(self.index())
            .map_or(loading::FrameAvailability::Pending, |uri| {
                self.loading.frame(uri)
            });

        let stage = pane::view(pane::ViewModel {
            frame: current,
            scale: self.scale(),
            index: self.index(),
            frame_count: self.frame_count(),
            is_dragging: self.drag.is_dragging(),
            can_drag: state == DisplayState::Ready && self.frame_count() > 1,
            loaded: self.loading.loaded_count(),
        });

        let progress = progress_bar(0.0..=1.0, self.sequencer.progress());

        let bar = controls::view(controls::ViewModel {
            is_playing: self.is_playing(),
            direction: self.direction(),
            scale: self.scale(),
            can_autoplay: state == DisplayState::Ready && self.frame_count() > 1,
            can_zoom_in: self.zoom.can_zoom_in(),
            can_zoom_out: self.zoom.can_zoom_out(),
        })
        .map(Message::Controls);

        Container::new(Column::new().push(stage).push(progress).push(bar).spacing(8))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    #[must_use]
    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.sequencer.index()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.sequencer.is_playing()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.sequencer.direction()
    }

    #[must_use]
    pub fn scale(&self) -> ZoomScale {
        self.zoom.scale()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current mount generation, for tagging externally built messages.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn autoplay_interval(&self) -> std::time::Duration {
        self.services.tuning.cadence.interval_for(self.frames.len())
    }
}

/// Maps a keyboard shortcut to a viewer message.
///
/// ←/→ step, Space toggles autoplay, `+`/`-` zoom, `0` resets the view and
/// `d` flips direction. Shortcuts with Ctrl/Cmd or Alt held are ignored.
#[must_use]
pub fn keyboard_message(event: &event::Event) -> Option<Message> {
    let event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) = event else {
        return None;
    };
    if modifiers.command() || modifiers.alt() {
        return None;
    }

    match key.as_ref() {
        keyboard::Key::Named(keyboard::key::Named::ArrowRight) => Some(Message::NextFrame),
        keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => Some(Message::PreviousFrame),
        keyboard::Key::Named(keyboard::key::Named::Space) => {
            Some(Message::Controls(controls::Message::ToggleAutoplay))
        }
        keyboard::Key::Character("+" | "=") => Some(Message::Controls(controls::Message::ZoomIn)),
        keyboard::Key::Character("-") => Some(Message::Controls(controls::Message::ZoomOut)),
        keyboard::Key::Character("0") => Some(Message::Controls(controls::Message::ResetView)),
        keyboard::Key::Character("d" | "D") => {
            Some(Message::Controls(controls::Message::ToggleDirection))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::persisted_state::{MemoryStateStore, ViewerStateStore};
    use crate::media::ImageCache;
    use crate::test_utils::{tiny_frame, ScriptedSource, F32_EPSILON};
    use crate::ui::state::DragSensitivity;
    use iced::Point;
    use std::sync::Arc;
    use std::time::Duration;

    fn services(store: Arc<MemoryStateStore>) -> Services {
        let source = Arc::new(ScriptedSource::new());
        Services {
            preloader: Preloader::new(ImageCache::unbounded(), source, Duration::from_secs(1)),
            store,
            tuning: ViewerTuning {
                drag_sensitivity: DragSensitivity::new(3.0),
                ..ViewerTuning::default()
            },
            max_frames: 150,
        }
    }

    fn loaded(uris: &[&str]) -> Vec<LoadedFrame> {
        uris.iter()
            .map(|uri| LoadedFrame {
                uri: (*uri).to_string(),
                image: tiny_frame(),
            })
            .collect()
    }

    /// Mounts and feeds the settled batch directly, without running tasks.
    fn mounted(store: &Arc<MemoryStateStore>, name: &str, uris: &[&str]) -> State {
        let mut viewer = State::new(services(store.clone()));
        let _ = viewer.mount(name, uris.iter().copied());
        let generation = viewer.generation();
        viewer.handle_message(Message::FramesPreloaded {
            generation,
            frames: loaded(uris),
        });
        viewer
    }

    fn move_to(viewer: &mut State, x: f32) {
        viewer.handle_message(Message::Pointer(drag::Message::Moved(Point::new(x, 10.0))));
    }

    fn tick(viewer: &mut State) {
        let generation = viewer.generation();
        viewer.handle_message(Message::AutoplayTick { generation });
    }

    fn control(viewer: &mut State, message: controls::Message) {
        viewer.handle_message(Message::Controls(message));
    }

    #[test]
    fn mount_without_record_uses_defaults() {
        let store = Arc::new(MemoryStateStore::new());
        let viewer = mounted(&store, "Widget", &["a.png", "b.png", "c.png"]);

        assert_eq!(viewer.display_state(), DisplayState::Ready);
        assert_eq!(viewer.index(), 0);
        assert!((viewer.scale().value() - 1.0).abs() < F32_EPSILON);
        assert!(!viewer.is_playing());
        assert_eq!(viewer.direction(), Direction::Forward);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn widget_scenario() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = mounted(&store, "Widget", &["a.png", "b.png", "c.png"]);

        control(&mut viewer, controls::Message::ToggleAutoplay);
        assert!(viewer.is_playing());

        for _ in 0..3 {
            tick(&mut viewer);
        }
        assert_eq!(viewer.index(), 0);

        move_to(&mut viewer, 100.0);
        viewer.handle_message(Message::Pointer(drag::Message::Pressed));
        assert!(!viewer.is_playing());

        move_to(&mut viewer, 109.0);
        assert_eq!(viewer.index(), 0);
    }

    #[test]
    fn drag_of_thirty_pixels_over_eight_frames_lands_on_two() {
        let store = Arc::new(MemoryStateStore::new());
        let uris: Vec<String> = (0..8).map(|i| format!("f{i}.png")).collect();
        let refs: Vec<&str> = uris.iter().map(String::as_str).collect();
        let mut viewer = mounted(&store, "Spin", &refs);

        move_to(&mut viewer, 0.0);
        viewer.handle_message(Message::Pointer(drag::Message::Pressed));
        move_to(&mut viewer, 30.0);
        assert_eq!(viewer.index(), 2);

        viewer.handle_message(Message::Pointer(drag::Message::Released));
        assert!(!viewer.is_dragging());
        assert_eq!(viewer.index(), 2);
    }

    #[test]
    fn single_frame_ignores_drag_and_autoplay() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = mounted(&store, "Still", &["only.png"]);

        control(&mut viewer, controls::Message::ToggleAutoplay);
        assert!(!viewer.is_playing());

        move_to(&mut viewer, 0.0);
        viewer.handle_message(Message::Pointer(drag::Message::Pressed));
        assert!(!viewer.is_dragging());
        assert_eq!(viewer.index(), 0);
    }

    #[test]
    fn empty_list_shows_no_images_and_never_persists() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = State::new(services(store.clone()));
        let _ = viewer.mount("Ghost", ["", "   "]);

        assert_eq!(viewer.display_state(), DisplayState::NoImages);
        control(&mut viewer, controls::Message::ZoomIn);
        control(&mut viewer, controls::Message::ToggleDirection);
        assert!(store.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn changes_are_saved_once_per_distinct_snapshot() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = mounted(&store, "Widget", &["a.png", "b.png", "c.png"]);

        viewer.handle_message(Message::NextFrame);
        assert_eq!(store.save_count(), 1);

        // Playback is not persisted.
        control(&mut viewer, controls::Message::ToggleAutoplay);
        control(&mut viewer, controls::Message::ToggleAutoplay);
        assert_eq!(store.save_count(), 1);

        control(&mut viewer, controls::Message::ZoomIn);
        assert_eq!(store.save_count(), 2);

        let saved = store.load("Widget").expect("state saved");
        assert_eq!(saved.frame_index, 1);
        assert!((saved.scale - 1.2).abs() < F32_EPSILON);
    }

    #[test]
    fn remount_restores_saved_state() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = mounted(&store, "Widget", &["a.png", "b.png", "c.png"]);
        viewer.handle_message(Message::SetFrame(2));
        control(&mut viewer, controls::Message::ZoomOut);
        control(&mut viewer, controls::Message::ToggleDirection);
        control(&mut viewer, controls::Message::ToggleAutoplay);
        viewer.unmount();

        let restored = mounted(&store, "  widget ", &["a.png", "b.png", "c.png"]);
        assert_eq!(restored.index(), 2);
        assert!((restored.scale().value() - 0.8).abs() < F32_EPSILON);
        assert_eq!(restored.direction(), Direction::Backward);
        assert!(!restored.is_playing());
    }

    #[test]
    fn restored_index_is_clamped_to_shorter_set() {
        let store = Arc::new(MemoryStateStore::new());
        store
            .save(
                "Widget",
                &PersistedViewerState {
                    frame_index: 9,
                    scale: 2.0,
                    direction: Direction::Forward,
                },
            )
            .expect("seed record");

        let viewer = mounted(&store, "Widget", &["a.png", "b.png", "c.png"]);
        assert_eq!(viewer.index(), 2);
    }

    #[test]
    fn reset_view_twice_matches_once() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = mounted(&store, "Widget", &["a.png", "b.png", "c.png", "d.png"]);
        viewer.handle_message(Message::SetFrame(3));
        control(&mut viewer, controls::Message::ZoomIn);
        control(&mut viewer, controls::Message::ToggleAutoplay);

        control(&mut viewer, controls::Message::ResetView);
        let once = (viewer.index(), viewer.scale(), viewer.is_playing());
        let saves = store.save_count();

        control(&mut viewer, controls::Message::ResetView);
        assert_eq!((viewer.index(), viewer.scale(), viewer.is_playing()), once);
        assert_eq!(once.0, 0);
        assert!(!once.2);
        assert_eq!(store.save_count(), saves);
    }

    #[test]
    fn stale_results_are_discarded() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = State::new(services(store));
        let _ = viewer.mount("Old", ["a.png", "b.png"]);
        let old_generation = viewer.generation();
        let _ = viewer.mount("New", ["c.png", "d.png"]);

        viewer.handle_message(Message::FramesPreloaded {
            generation: old_generation,
            frames: loaded(&["a.png", "b.png"]),
        });
        assert_eq!(viewer.display_state(), DisplayState::Loading);
    }

    #[test]
    fn stale_tick_does_not_advance() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = mounted(&store, "Widget", &["a.png", "b.png", "c.png"]);
        control(&mut viewer, controls::Message::ToggleAutoplay);

        let old_generation = viewer.generation();
        let _ = viewer.set_frames(["x.png", "y.png", "z.png"]);
        viewer.handle_message(Message::AutoplayTick {
            generation: old_generation,
        });
        assert_eq!(viewer.index(), 0);
        assert!(!viewer.is_playing());
    }

    #[test]
    fn results_after_unmount_are_ignored() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = State::new(services(store));
        let _ = viewer.mount("Widget", ["a.png"]);
        let generation = viewer.generation();
        viewer.unmount();

        viewer.handle_message(Message::FirstFrameLoaded {
            generation,
            uri: "a.png".into(),
            result: Ok(tiny_frame()),
        });
        assert_eq!(viewer.display_state(), DisplayState::NoImages);
        assert!(!viewer.is_mounted());
    }

    #[test]
    fn identical_frame_list_is_a_no_op() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = mounted(&store, "Widget", &["a.png", "b.png"]);
        let generation = viewer.generation();
        let _ = viewer.set_frames([" a.png", "b.png "]);
        assert_eq!(viewer.generation(), generation);
        assert_eq!(viewer.display_state(), DisplayState::Ready);
    }

    #[test]
    fn shorter_frame_list_clamps_index() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = mounted(&store, "Widget", &["a.png", "b.png", "c.png", "d.png"]);
        viewer.handle_message(Message::SetFrame(3));

        let _ = viewer.set_frames(["a.png", "b.png"]);
        assert_eq!(viewer.index(), 1);
        assert_eq!(viewer.display_state(), DisplayState::Loading);
    }

    #[test]
    fn first_frame_makes_viewer_interactive_before_batch() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = State::new(services(store));
        let _ = viewer.mount("Widget", ["a.png", "b.png"]);
        assert_eq!(viewer.display_state(), DisplayState::Loading);

        let generation = viewer.generation();
        viewer.handle_message(Message::FirstFrameLoaded {
            generation,
            uri: "a.png".into(),
            result: Ok(tiny_frame()),
        });
        assert_eq!(viewer.display_state(), DisplayState::Ready);

        viewer.handle_message(Message::NextFrame);
        assert_eq!(viewer.index(), 1);
    }

    #[test]
    fn navigation_is_blocked_while_loading() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = State::new(services(store));
        let _ = viewer.mount("Widget", ["a.png", "b.png"]);

        viewer.handle_message(Message::NextFrame);
        control(&mut viewer, controls::Message::ToggleAutoplay);
        assert_eq!(viewer.index(), 0);
        assert!(!viewer.is_playing());
    }

    #[test]
    fn index_stays_in_range_under_mixed_input() {
        let store = Arc::new(MemoryStateStore::new());
        let mut viewer = mounted(&store, "Widget", &["a", "b", "c", "d", "e"]);
        control(&mut viewer, controls::Message::ToggleAutoplay);

        for i in 0..50 {
            match i % 4 {
                0 => viewer.handle_message(Message::NextFrame),
                1 => viewer.handle_message(Message::PreviousFrame),
                2 => tick(&mut viewer),
                _ => control(&mut viewer, controls::Message::ToggleDirection),
            }
            assert!(viewer.index() < 5);
        }
    }

    /// Store whose writes always fail, counting attempts.
    #[derive(Debug, Default)]
    struct ReadOnlyStore {
        attempts: std::sync::atomic::AtomicUsize,
    }

    impl ViewerStateStore for ReadOnlyStore {
        fn load(&self, _key: &str) -> Option<PersistedViewerState> {
            None
        }

        fn save(&self, _key: &str, _state: &PersistedViewerState) -> crate::error::Result<()> {
            self.attempts
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Err(crate::error::Error::State("read-only file system".into()))
        }
    }

    #[test]
    fn failed_save_keeps_viewer_usable_and_retries() {
        let store = Arc::new(ReadOnlyStore::default());
        let attempts = || store.attempts.load(std::sync::atomic::Ordering::SeqCst);
        let mut viewer = State::new(Services {
            store: store.clone(),
            ..services(Arc::new(MemoryStateStore::new()))
        });
        let uris = ["a.png", "b.png", "c.png"];
        let _ = viewer.mount("Widget", uris);
        let generation = viewer.generation();
        viewer.handle_message(Message::FramesPreloaded {
            generation,
            frames: loaded(&uris),
        });
        let hydrated = viewer.last_saved;
        assert_eq!(attempts(), 0);

        viewer.handle_message(Message::NextFrame);
        assert_eq!(viewer.index(), 1);
        assert_eq!(viewer.last_saved, hydrated);
        assert_eq!(attempts(), 1);

        viewer.handle_message(Message::NextFrame);
        assert_eq!(viewer.index(), 2);
        assert_eq!(viewer.last_saved, hydrated);
        assert_eq!(attempts(), 2);
    }

    #[test]
    fn keyboard_shortcuts_map_to_messages() {
        let press = |key: keyboard::Key| {
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: key.clone(),
                modified_key: key,
                physical_key: keyboard::key::Physical::Unidentified(
                    keyboard::key::NativeCode::Unidentified,
                ),
                location: keyboard::Location::Standard,
                modifiers: keyboard::Modifiers::empty(),
                text: None,
                repeat: false,
            })
        };

        assert!(matches!(
            keyboard_message(&press(keyboard::Key::Named(keyboard::key::Named::ArrowRight))),
            Some(Message::NextFrame)
        ));
        assert!(matches!(
            keyboard_message(&press(keyboard::Key::Character("0".into()))),
            Some(Message::Controls(controls::Message::ResetView))
        ));
        assert!(keyboard_message(&press(keyboard::Key::Character("q".into()))).is_none());
    }
}
