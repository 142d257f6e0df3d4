// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, palette, radius};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Control bar surface under the stage.
///
/// Derived from the active theme background so it reads in light and dark
/// modes alike.
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.base.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Neutral backdrop behind the frames.
pub fn stage(theme: &Theme) -> container::Style {
    let background = if matches!(theme, Theme::Light) {
        palette::GRAY_100
    } else {
        palette::GRAY_900
    };

    container::Style {
        background: Some(Background::Color(background)),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}
