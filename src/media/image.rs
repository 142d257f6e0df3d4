// SPDX-License-Identifier: MPL-2.0
//! Decoded frame images.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;

/// A decoded frame ready for display.
///
/// The handle is reference-counted by Iced, so clones are cheap and every
/// viewer showing the same URI shares one GPU upload.
#[derive(Debug, Clone)]
pub struct FrameImage {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl FrameImage {
    /// Creates a frame from raw RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }

    /// Decodes encoded bytes (PNG, JPEG, WebP, ...) into a frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the bytes are not a supported image or
    /// have zero dimensions.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image_rs::load_from_memory(bytes)?;
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::Decode("image has empty dimensions".into()));
        }

        let pixels = img.to_rgba8().into_vec();
        Ok(Self::from_rgba(width, height, pixels))
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

// Two frames are equal when they share the same uploaded pixels.
impl PartialEq for FrameImage {
    fn eq(&self, other: &Self) -> bool {
        self.handle.id() == other.handle.id()
    }
}

impl Eq for FrameImage {}
