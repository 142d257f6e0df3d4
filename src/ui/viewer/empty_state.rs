// SPDX-License-Identifier: MPL-2.0
//! Empty state view displayed when the image list has no usable entries.

use super::component::Message;
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::widget::{Column, Container, Text};
use iced::{alignment, Color, Element, Length};

/// Renders the "no images" state for `product_name`.
pub fn view<'a>(product_name: &str) -> Element<'a, Message> {
    let title = Text::new("No images")
        .size(typography::TITLE_LG)
        .color(palette::GRAY_400);

    let subtitle = if product_name.is_empty() {
        "There are no frames to show.".to_string()
    } else {
        format!("{product_name} has no frames to show.")
    };
    let subtitle = Text::new(subtitle)
        .size(typography::BODY)
        .color(palette::GRAY_400);

    let hint = Text::new("Pass image paths or URLs, or a directory with --dir.")
        .size(typography::CAPTION)
        .color(Color {
            a: 0.5,
            ..palette::GRAY_400
        });

    let content = Column::new()
        .spacing(spacing::LG)
        .align_x(alignment::Horizontal::Center)
        .push(title)
        .push(subtitle)
        .push(hint);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
