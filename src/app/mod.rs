// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration around the turntable viewer.
//!
//! The `App` struct wires the process-wide services (image cache, frame
//! source, state store, tuning from `settings.toml`) into a single viewer
//! and forwards window events to it.

mod message;
pub mod paths;
pub mod persisted_state;
mod subscription;

pub use message::{Flags, Message};

use crate::config;
use crate::media::{ImageCache, Preloader};
use crate::ui::design_tokens::spacing;
use crate::ui::viewer::component;
use iced::widget::Container;
use iced::{window, Element, Length, Subscription, Task, Theme};

pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 360;

/// Name shown in the window title.
pub const APP_TITLE: &str = "Iced Turntable";

/// Root Iced application state.
pub struct App {
    viewer: component::State,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("product", &self.viewer.product_name())
            .field("frames", &self.viewer.frame_count())
            .finish()
    }
}

fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    // iced 0.14 requires a `Fn` boot closure; flags are cheap to clone.
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds the services from `settings.toml` and mounts the viewer.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        if let Some(key) = config_warning {
            tracing::warn!(warning = %key, "using default settings");
        }

        let preload = config.preload_settings();
        let cache = ImageCache::with_capacity(preload.cache_capacity);
        let services = component::Services {
            preloader: Preloader::new(cache, flags.source.clone(), preload.timeout),
            store: persisted_state::default_store(None),
            tuning: config.viewer_tuning(),
            max_frames: preload.max_frames,
        };

        tracing::debug!(
            timeout_secs = preload.timeout.as_secs(),
            cache_capacity = ?preload.cache_capacity,
            max_frames = preload.max_frames,
            "services ready"
        );

        Self::with_services(services, &flags.product_name, &flags.uris)
    }

    /// Creates the app around prepared services and mounts `uris`.
    pub fn with_services(
        services: component::Services,
        product_name: &str,
        uris: &[String],
    ) -> (Self, Task<Message>) {
        let mut viewer = component::State::new(services);
        let task = viewer.mount(product_name, uris).map(Message::Viewer);
        (Self { viewer }, task)
    }

    fn title(&self) -> String {
        let name = self.viewer.product_name();
        if name.is_empty() {
            return APP_TITLE.to_string();
        }

        match self.viewer.frame_count() {
            0 => format!("{name} - {APP_TITLE}"),
            count => format!(
                "{name} ({}/{count}) - {APP_TITLE}",
                self.viewer.index() + 1
            ),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            self.viewer.subscription().map(Message::Viewer),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Viewer(message) => {
                self.viewer.handle_message(message);
                Task::none()
            }
            Message::WindowCloseRequested(id) => {
                self.viewer.unmount();
                window::close(id)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        Container::new(self.viewer.view().map(Message::Viewer))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(spacing::MD)
            .into()
    }

    /// The mounted viewer.
    #[must_use]
    pub fn viewer(&self) -> &component::State {
        &self.viewer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::persisted_state::MemoryStateStore;
    use crate::test_utils::{tiny_frame, ScriptedSource};
    use crate::ui::viewer::ViewerTuning;
    use std::sync::Arc;
    use std::time::Duration;

    fn app(name: &str, uris: &[&str]) -> App {
        let services = component::Services {
            preloader: Preloader::new(
                ImageCache::unbounded(),
                Arc::new(ScriptedSource::new()),
                Duration::from_secs(1),
            ),
            store: Arc::new(MemoryStateStore::new()),
            tuning: ViewerTuning::default(),
            max_frames: 150,
        };
        let uris: Vec<String> = uris.iter().map(|u| (*u).to_string()).collect();
        App::with_services(services, name, &uris).0
    }

    #[test]
    fn title_shows_app_name_without_product() {
        let app = app("", &["a.png"]);
        assert_eq!(app.title(), APP_TITLE);
    }

    #[test]
    fn title_shows_product_and_frame() {
        let mut app = app("Widget", &["a.png", "b.png", "c.png"]);
        let generation = app.viewer().generation();
        let _ = app.update(Message::Viewer(component::Message::FirstFrameLoaded {
            generation,
            uri: "a.png".into(),
            result: Ok(tiny_frame()),
        }));
        let _ = app.update(Message::Viewer(component::Message::NextFrame));
        assert_eq!(app.title(), "Widget (2/3) - Iced Turntable");
    }

    #[test]
    fn title_for_empty_set_has_no_counter() {
        let app = app("Widget", &[]);
        assert_eq!(app.title(), "Widget - Iced Turntable");
    }

    #[test]
    fn close_request_unmounts_viewer() {
        let mut app = app("Widget", &["a.png"]);
        let _ = app.update(Message::WindowCloseRequested(window::Id::unique()));
        assert!(!app.viewer().is_mounted());
    }
}
