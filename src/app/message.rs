// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::media::SharedFrameSource;
use crate::ui::viewer::component;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Viewer(component::Message),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(iced::window::Id),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Clone)]
pub struct Flags {
    /// Product shown in the title and used as the persistence key.
    pub product_name: String,
    /// Frame URIs in display order, unfiltered.
    pub uris: Vec<String>,
    /// Fetches and decodes frames.
    pub source: SharedFrameSource,
}
