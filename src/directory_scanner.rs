// SPDX-License-Identifier: MPL-2.0
//! Directory scanner for captured turntable frames.
//!
//! A capture session usually writes one numbered file per angle into a single
//! directory. This module turns such a directory into the ordered URI list the
//! viewer expects.

use crate::error::{Error, Result};
use crate::media;
use std::path::{Path, PathBuf};

/// Name used when a directory has no usable file name.
pub const FALLBACK_PRODUCT_NAME: &str = "Product";

/// Frames found in one capture directory, sorted by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDirectory {
    directory: PathBuf,
    frames: Vec<PathBuf>,
}

impl FrameDirectory {
    /// Scans `directory` for decodable images.
    ///
    /// Subdirectories and files with other extensions are skipped. An empty
    /// result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory cannot be read.
    pub fn scan(directory: &Path) -> Result<Self> {
        if !directory.is_dir() {
            return Err(Error::Io(format!(
                "Not a directory: {}",
                directory.display()
            )));
        }

        let mut frames = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && media::is_image_path(&path) {
                frames.push(path);
            }
        }

        sort_frames(&mut frames);
        tracing::debug!(
            directory = %directory.display(),
            frames = frames.len(),
            "scanned frame directory"
        );

        Ok(Self {
            directory: directory.to_path_buf(),
            frames,
        })
    }

    pub fn frames(&self) -> &[PathBuf] {
        &self.frames
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame paths as URI strings, ready for [`media::FrameSet::from_uris`].
    #[must_use]
    pub fn uris(&self) -> Vec<String> {
        self.frames
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    /// Product name derived from the directory name.
    #[must_use]
    pub fn product_name(&self) -> String {
        product_name_for(&self.directory)
    }
}

/// Returns the final path component, or [`FALLBACK_PRODUCT_NAME`].
#[must_use]
pub fn product_name_for(directory: &Path) -> String {
    directory
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map_or_else(|| FALLBACK_PRODUCT_NAME.to_string(), str::to_string)
}

/// Plain lexical order on file names; `frame_2` sorts after `frame_10`.
fn sort_frames(frames: &mut [PathBuf]) {
    frames.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"fake image data").expect("failed to write test file");
        path
    }

    #[test]
    fn scan_finds_only_images() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let dir = temp_dir.path();
        create_file(dir, "01.jpg");
        create_file(dir, "02.png");
        create_file(dir, "notes.txt");
        create_file(dir, "preview.mp4");
        fs::create_dir(dir.join("nested.png")).expect("mkdir");

        let scanned = FrameDirectory::scan(dir).expect("scan succeeds");
        assert_eq!(scanned.len(), 2);
    }

    #[test]
    fn scan_sorts_by_file_name() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let dir = temp_dir.path();
        let c = create_file(dir, "frame_03.png");
        let a = create_file(dir, "frame_01.png");
        let b = create_file(dir, "frame_02.png");

        let scanned = FrameDirectory::scan(dir).expect("scan succeeds");
        assert_eq!(scanned.frames(), &[a, b, c]);
    }

    #[test]
    fn empty_directory_is_not_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let scanned = FrameDirectory::scan(temp_dir.path()).expect("scan succeeds");
        assert!(scanned.is_empty());
        assert!(scanned.uris().is_empty());
    }

    #[test]
    fn missing_directory_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let err = FrameDirectory::scan(&temp_dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn product_name_comes_from_directory() {
        assert_eq!(product_name_for(Path::new("/captures/Red Sneaker")), "Red Sneaker");
        assert_eq!(product_name_for(Path::new("/")), FALLBACK_PRODUCT_NAME);
    }
}
