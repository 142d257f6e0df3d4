// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

fn bordered(background: Color, text_color: Color, border: Color) -> button::Style {
    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: border,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

fn disabled(theme: &Theme) -> button::Style {
    let background = if matches!(theme, Theme::Light) {
        palette::GRAY_100
    } else {
        palette::GRAY_700
    };
    bordered(background, palette::GRAY_400, palette::GRAY_400)
}

/// Style for toggled-on controls (autoplay running).
/// Uses the brand color on both light and dark themes.
pub fn selected(theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            shadow: shadow::SM,
            ..bordered(palette::PRIMARY_500, WHITE, palette::PRIMARY_600)
        },
        button::Status::Hovered => button::Style {
            shadow: shadow::MD,
            ..bordered(palette::PRIMARY_400, WHITE, palette::PRIMARY_500)
        },
        button::Status::Disabled => disabled(theme),
    }
}

/// Style for regular control bar buttons.
pub fn unselected(theme: &Theme, status: button::Status) -> button::Style {
    let is_light = matches!(theme, Theme::Light);
    let (background, text_color) = if is_light {
        (palette::GRAY_100, palette::GRAY_900)
    } else {
        (palette::GRAY_700, WHITE)
    };

    match status {
        button::Status::Active | button::Status::Pressed => {
            bordered(background, text_color, palette::GRAY_400)
        }
        button::Status::Hovered => {
            let hover = if is_light {
                palette::GRAY_200
            } else {
                Color::from_rgb(0.35, 0.35, 0.35)
            };
            button::Style {
                shadow: shadow::SM,
                ..bordered(hover, text_color, palette::PRIMARY_500)
            }
        }
        button::Status::Disabled => disabled(theme),
    }
}

/// Picks [`selected`] or [`unselected`].
pub fn toggle(active: bool) -> fn(&Theme, button::Status) -> button::Style {
    if active {
        selected
    } else {
        unselected
    }
}
