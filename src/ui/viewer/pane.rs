// SPDX-License-Identifier: MPL-2.0
//! Viewer pane that renders the current frame fitted to the stage, with the
//! drag surface, cursor interaction, and frame indicator.

use crate::media::FrameImage;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::state::ZoomScale;
use crate::ui::styles;
use crate::ui::viewer::component::Message;
use crate::ui::viewer::subcomponents::{drag, loading::FrameAvailability};
use iced::mouse;
use iced::widget::{mouse_area, responsive, Container, Image, Stack, Text};
use iced::{
    alignment::{Horizontal, Vertical},
    Element, Length, Padding, Size,
};

pub struct ViewModel<'a> {
    pub frame: FrameAvailability<'a>,
    pub scale: ZoomScale,
    pub index: usize,
    pub frame_count: usize,
    pub is_dragging: bool,
    /// Whether pointer drags scrub frames (ready and more than one frame).
    pub can_drag: bool,
    /// Frames decoded so far, shown while the rest are loading.
    pub loaded: usize,
}

pub fn view(model: ViewModel<'_>) -> Element<'_, Message> {
    responsive(move |available_size: Size| view_inner(&model, available_size)).into()
}

/// Scale at which the frame fits entirely inside `available`.
///
/// Degenerate sizes fall back to 1.0 so a collapsed layout never produces
/// a zero or infinite frame.
#[must_use]
pub fn fit_scale(frame_width: u32, frame_height: u32, available: Size) -> f32 {
    if frame_width == 0 || frame_height == 0 || available.width <= 0.0 || available.height <= 0.0
    {
        return 1.0;
    }

    let scale_x = available.width / frame_width as f32;
    let scale_y = available.height / frame_height as f32;
    let scale = scale_x.min(scale_y);

    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// On-screen size of `frame` once fitted and zoomed.
#[must_use]
pub fn displayed_size(frame: &FrameImage, available: Size, zoom: ZoomScale) -> Size {
    let scale = fit_scale(frame.width, frame.height, available) * zoom.value();
    Size::new(
        (frame.width as f32 * scale).max(1.0),
        (frame.height as f32 * scale).max(1.0),
    )
}

fn view_inner<'a>(model: &ViewModel<'a>, available_size: Size) -> Element<'a, Message> {
    let content: Element<'a, Message> = match &model.frame {
        FrameAvailability::Ready(frame) => {
            let size = displayed_size(frame, available_size, model.scale);
            Image::new(frame.handle.clone())
                .width(Length::Fixed(size.width))
                .height(Length::Fixed(size.height))
                .into()
        }
        FrameAvailability::Pending => placeholder(loading_text(model)),
        FrameAvailability::Unavailable => Text::new("Frame unavailable")
            .size(typography::BODY)
            .color(palette::WARNING_500)
            .into(),
    };

    // Frames larger than the stage are cropped, never scrolled.
    let stage = Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .clip(true)
        .style(styles::container::stage);

    let surface: Element<'a, Message> = if model.can_drag {
        let interaction = if model.is_dragging {
            mouse::Interaction::Grabbing
        } else {
            mouse::Interaction::Grab
        };

        mouse_area(stage)
            .on_press(Message::Pointer(drag::Message::Pressed))
            .on_release(Message::Pointer(drag::Message::Released))
            .on_exit(Message::Pointer(drag::Message::Exited))
            .on_move(|position| Message::Pointer(drag::Message::Moved(position)))
            .interaction(interaction)
            .into()
    } else {
        stage.into()
    };

    let mut stack = Stack::new().push(surface);

    if model.frame_count > 0 {
        let position_text = format!("{} / {}", model.index + 1, model.frame_count);
        let indicator = Container::new(Text::new(position_text).size(typography::BODY))
            .padding(Padding {
                top: spacing::XXS,
                right: spacing::XS,
                bottom: spacing::XXS,
                left: spacing::XS,
            })
            .style(styles::overlay::indicator(12.0));

        stack = stack.push(
            Container::new(indicator)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(spacing::SM)
                .align_x(Horizontal::Center)
                .align_y(Vertical::Bottom),
        );
    }

    stack.into()
}

fn loading_text(model: &ViewModel<'_>) -> String {
    if model.loaded == 0 || model.frame_count <= 1 {
        "Loading…".to_string()
    } else {
        format!("Loading… {}/{}", model.loaded, model.frame_count)
    }
}

fn placeholder<'a>(label: String) -> Element<'a, Message> {
    Container::new(Text::new(label).size(typography::BODY))
        .padding(spacing::MD)
        .style(styles::overlay::indicator(8.0))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::F32_EPSILON;

    fn frame(width: u32, height: u32) -> FrameImage {
        FrameImage::from_rgba(width, height, vec![0; (width * height * 4) as usize])
    }

    #[test]
    fn fit_scale_uses_the_tighter_axis() {
        let scale = fit_scale(400, 200, Size::new(200.0, 200.0));
        assert!((scale - 0.5).abs() < F32_EPSILON);

        let scale = fit_scale(100, 400, Size::new(800.0, 200.0));
        assert!((scale - 0.5).abs() < F32_EPSILON);
    }

    #[test]
    fn fit_scale_falls_back_on_degenerate_sizes() {
        assert!((fit_scale(0, 10, Size::new(100.0, 100.0)) - 1.0).abs() < F32_EPSILON);
        assert!((fit_scale(10, 10, Size::new(0.0, 100.0)) - 1.0).abs() < F32_EPSILON);
    }

    #[test]
    fn displayed_size_applies_zoom_after_fit() {
        let size = displayed_size(&frame(4, 2), Size::new(100.0, 100.0), ZoomScale::new(2.0));
        assert!((size.width - 200.0).abs() < F32_EPSILON);
        assert!((size.height - 100.0).abs() < F32_EPSILON);
    }

    #[test]
    fn loading_text_reports_partial_progress() {
        let model = ViewModel {
            frame: FrameAvailability::Pending,
            scale: ZoomScale::default(),
            index: 0,
            frame_count: 8,
            is_dragging: false,
            can_drag: false,
            loaded: 3,
        };
        assert_eq!(loading_text(&model), "Loading… 3/8");
    }
}
