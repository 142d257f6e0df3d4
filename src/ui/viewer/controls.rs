// SPDX-License-Identifier: MPL-2.0
//! Viewer controls: autoplay, direction, zoom buttons and view reset.

use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::state::{Direction, ZoomScale};
use crate::ui::styles;
use iced::{
    alignment::{Horizontal, Vertical},
    widget::{button, Container, Row, Text},
    Element, Length,
};

/// Everything the control bar needs to render.
#[derive(Debug, Clone, Copy)]
pub struct ViewModel {
    pub is_playing: bool,
    pub direction: Direction,
    pub scale: ZoomScale,
    pub can_autoplay: bool,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    ToggleAutoplay,
    ToggleDirection,
    ZoomIn,
    ZoomOut,
    ResetView,
}

fn control<'a>(
    label: impl Into<String>,
    on_press: Option<Message>,
    active: bool,
) -> iced::widget::Button<'a, Message> {
    let label = Text::new(label.into()).size(typography::BODY);

    button(label)
        .padding([spacing::XXS, spacing::SM])
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .width(Length::Shrink)
        .style(styles::button::toggle(active))
        .on_press_maybe(on_press)
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Forward => "⟳ Forward",
        Direction::Backward => "⟲ Backward",
    }
}

pub fn view<'a>(model: ViewModel) -> Element<'a, Message> {
    let autoplay_label = if model.is_playing { "⏸ Pause" } else { "▶ Play" };
    let autoplay = control(
        autoplay_label,
        model.can_autoplay.then_some(Message::ToggleAutoplay),
        model.is_playing,
    );

    let direction = control(
        direction_label(model.direction),
        Some(Message::ToggleDirection),
        false,
    );

    let zoom_out = control("−", model.can_zoom_out.then_some(Message::ZoomOut), false);
    let zoom_label = Container::new(
        Text::new(format!("{}%", model.scale.as_percent())).size(typography::CAPTION),
    )
    .width(Length::Fixed(sizing::BUTTON_MIN_WIDTH))
    .align_x(Horizontal::Center);
    let zoom_in = control("+", model.can_zoom_in.then_some(Message::ZoomIn), false);

    let reset = control("Reset", Some(Message::ResetView), false);

    let row = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(autoplay)
        .push(direction)
        .push(zoom_out)
        .push(zoom_label)
        .push(zoom_in)
        .push(reset);

    Container::new(row)
        .width(Length::Fill)
        .padding(spacing::XS)
        .align_x(Horizontal::Center)
        .style(styles::container::panel)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_view_renders() {
        let _element = view(ViewModel {
            is_playing: true,
            direction: Direction::Backward,
            scale: ZoomScale::default(),
            can_autoplay: true,
            can_zoom_in: true,
            can_zoom_out: false,
        });
    }

    #[test]
    fn direction_labels_differ() {
        assert_ne!(
            direction_label(Direction::Forward),
            direction_label(Direction::Backward)
        );
    }
}
