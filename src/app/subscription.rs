// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard events nobody captured go to the viewer as raw events; window
//! close requests go to the app so the viewer can be torn down first.

use super::Message;
use crate::ui::viewer::component;
use iced::{event, keyboard, Subscription};

/// Routes native events to the viewer.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| {
        if let event::Event::Window(iced::window::Event::CloseRequested) = &event {
            return Some(Message::WindowCloseRequested(window_id));
        }

        match (&event, status) {
            (event::Event::Keyboard(keyboard::Event::KeyPressed { .. }), event::Status::Ignored) => {
                Some(Message::Viewer(component::Message::RawEvent {
                    window: window_id,
                    event: event.clone(),
                }))
            }
            _ => None,
        }
    })
}
