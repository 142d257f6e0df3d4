// SPDX-License-Identifier: MPL-2.0
//! Frame loading for the turntable viewer.
//!
//! URIs are filtered into a [`FrameSet`], fetched through a [`FrameSource`],
//! decoded into [`FrameImage`]s and kept in the process-wide [`ImageCache`].
//! The [`Preloader`] drives all of it for a whole set at once.

pub mod cache;
pub mod frame_set;
pub mod image;
pub mod preload;
pub mod source;

use std::path::Path;

// Re-export commonly used types
pub use cache::{CacheEntry, CacheStats, CacheStatus, ImageCache};
pub use extensions::IMAGE_EXTENSIONS;
pub use frame_set::{classify_uri, FrameLocation, FrameSet};
pub use image::FrameImage;
pub use preload::{LoadedFrame, PreloadReport, PreloadSettings, Preloader};
pub use source::{DefaultFrameSource, FrameSource, SharedFrameSource};

/// Supported file extensions
pub mod extensions {
    /// Image file extensions the decoder understands
    pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];
}

/// Returns true if the path has a decodable image extension (case-insensitive).
#[must_use]
pub fn is_image_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_image_extensions() {
        assert!(is_image_path("photo.jpg"));
        assert!(is_image_path("frame_01.PNG"));
        assert!(is_image_path("spin.WebP"));
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(!is_image_path("notes.txt"));
        assert!(!is_image_path("clip.mp4"));
        assert!(!is_image_path("no_extension"));
    }

    #[test]
    fn handles_nested_paths() {
        let path = PathBuf::from("/home/user/product/frames/01.jpeg");
        assert!(is_image_path(&path));
    }
}
