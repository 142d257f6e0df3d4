// SPDX-License-Identifier: MPL-2.0
//! Ordered frame lists and URI classification.
//!
//! A [`FrameSet`] is built once per viewer mount from the collaborator's raw
//! image list. Entries are trimmed, blanks and unsupported schemes are dropped,
//! and the list is capped; repeats are kept since a capture may legitimately
//! reuse a frame.

use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Where a frame's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameLocation {
    /// `http://` or `https://` URL.
    Remote(String),
    /// Inline base64 `data:image/...` URI.
    Embedded(String),
    /// Root-relative reference such as `/assets/a.png`.
    RootRelative(String),
    /// Filesystem path (plain or `file://`).
    File(PathBuf),
}

/// Classifies a trimmed URI, returning `None` for schemes frames cannot be
/// loaded from (`blob:` object URLs, non-image `data:` URIs and any other
/// `scheme:`).
#[must_use]
pub fn classify_uri(uri: &str) -> Option<FrameLocation> {
    if uri.starts_with("//") {
        // Protocol-relative URLs need a page origin we don't have.
        return None;
    }
    if uri.starts_with('/') {
        return Some(FrameLocation::RootRelative(uri.to_string()));
    }

    let url = match Url::parse(uri) {
        Ok(url) => url,
        Err(_) => return Some(FrameLocation::File(PathBuf::from(uri))),
    };

    match url.scheme() {
        "http" | "https" => Some(FrameLocation::Remote(uri.to_string())),
        "data" => is_base64_image(url.path()).then(|| FrameLocation::Embedded(uri.to_string())),
        "file" => url.to_file_path().ok().map(FrameLocation::File),
        // Windows drive letter such as `C:\frames\a.png`.
        scheme if scheme.len() == 1 => Some(FrameLocation::File(PathBuf::from(uri))),
        _ => None,
    }
}

/// True for `image/<subtype>[;...];base64,<payload>`.
fn is_base64_image(data: &str) -> bool {
    let Some((meta, _)) = data.split_once(',') else {
        return false;
    };
    let mut parts = meta.split(';');
    let is_image = parts
        .next()
        .is_some_and(|media| media.trim().to_ascii_lowercase().starts_with("image/"));
    is_image && parts.any(|part| part.trim().eq_ignore_ascii_case("base64"))
}

/// Immutable, index-addressable list of frame URIs for one viewer mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSet {
    uris: Arc<[String]>,
}

impl FrameSet {
    /// Filters and caps a raw image list.
    ///
    /// Dropped entries are logged; they are never an error.
    pub fn from_uris<I, S>(raw: I, max_frames: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut uris = Vec::new();
        let mut rejected = 0usize;

        for entry in raw {
            let trimmed = entry.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            if classify_uri(trimmed).is_none() {
                tracing::debug!(uri = trimmed, "dropping frame with unsupported scheme");
                rejected += 1;
                continue;
            }
            uris.push(trimmed.to_string());
        }

        if uris.len() > max_frames {
            tracing::warn!(
                kept = max_frames,
                dropped = uris.len() - max_frames,
                "frame list exceeds the per-product limit"
            );
            uris.truncate(max_frames);
        }
        if rejected > 0 {
            tracing::info!(rejected, "ignored frames with unsupported URIs");
        }

        Self { uris: uris.into() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.uris.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.uris.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.uris.iter().map(String::as_str)
    }

    /// Returns the URIs as an owned list, e.g. for handing to the preloader.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.uris.to_vec()
    }

    /// Distinct URIs in first-seen order.
    #[must_use]
    pub fn unique(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.uris
            .iter()
            .filter(|uri| seen.insert(uri.as_str()))
            .cloned()
            .collect()
    }

    /// True if both sets hold the same URIs in the same order.
    #[must_use]
    pub fn same_frames(&self, other: &FrameSet) -> bool {
        Arc::ptr_eq(&self.uris, &other.uris) || self.uris == other.uris
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_entries_are_removed() {
        let set = FrameSet::from_uris(["a.png", "", "   ", "b.png"], 150);
        assert_eq!(set.to_vec(), vec!["a.png", "b.png"]);
    }

    #[test]
    fn entries_are_trimmed() {
        let set = FrameSet::from_uris(["  /img/a.png \n"], 150);
        assert_eq!(set.get(0), Some("/img/a.png"));
    }

    #[test]
    fn blob_urls_are_rejected() {
        let set = FrameSet::from_uris(["blob:http://localhost/1234", "a.png"], 150);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0), Some("a.png"));
    }

    #[test]
    fn repeats_are_kept() {
        let set = FrameSet::from_uris(["a.png", "a.png", "b.png"], 150);
        assert_eq!(set.len(), 3);
        assert_eq!(set.unique(), vec!["a.png", "b.png"]);
    }

    #[test]
    fn list_is_capped() {
        let raw: Vec<String> = (0..200).map(|i| format!("f{i}.png")).collect();
        let set = FrameSet::from_uris(&raw, 150);
        assert_eq!(set.len(), 150);
        assert_eq!(set.get(149), Some("f149.png"));
    }

    #[test]
    fn classify_known_schemes() {
        assert!(matches!(
            classify_uri("https://cdn.example.com/a.jpg"),
            Some(FrameLocation::Remote(_))
        ));
        assert!(matches!(
            classify_uri("data:image/png;base64,AAAA"),
            Some(FrameLocation::Embedded(_))
        ));
        assert!(matches!(
            classify_uri("DATA:Image/JPEG;BASE64,AAAA"),
            Some(FrameLocation::Embedded(_))
        ));
        assert!(matches!(
            classify_uri("/placeholder.svg"),
            Some(FrameLocation::RootRelative(_))
        ));
        assert_eq!(
            classify_uri("frames/a.png"),
            Some(FrameLocation::File(PathBuf::from("frames/a.png")))
        );
    }

    #[cfg(unix)]
    #[test]
    fn file_urls_become_paths() {
        assert_eq!(
            classify_uri("file:///tmp/a.png"),
            Some(FrameLocation::File(PathBuf::from("/tmp/a.png")))
        );
        assert_eq!(
            classify_uri("file:///tmp/my%20frame.png"),
            Some(FrameLocation::File(PathBuf::from("/tmp/my frame.png")))
        );
        assert_eq!(
            classify_uri("file://localhost/tmp/a.png"),
            Some(FrameLocation::File(PathBuf::from("/tmp/a.png")))
        );
    }

    #[cfg(unix)]
    #[test]
    fn file_urls_on_remote_hosts_are_rejected() {
        assert!(classify_uri("file://fileserver/share/a.png").is_none());
    }

    #[test]
    fn only_base64_image_data_uris_are_accepted() {
        assert!(classify_uri("data:text/plain,hi").is_none());
        assert!(classify_uri("data:text/plain;base64,aGk=").is_none());
        assert!(classify_uri("data:image/svg+xml,%3Csvg%3E").is_none());
        assert!(classify_uri("data:image/png;base64").is_none());

        let set = FrameSet::from_uris(["data:text/plain,hi", "a.png"], 150);
        assert_eq!(set.to_vec(), vec!["a.png"]);
    }

    #[test]
    fn classify_rejects_foreign_schemes_but_not_drive_letters() {
        assert!(classify_uri("blob:abc").is_none());
        assert!(classify_uri("ftp://host/a.png").is_none());
        assert!(classify_uri("//cdn.example.com/a.png").is_none());
        assert!(classify_uri("C:\\frames\\a.png").is_some());
    }

    #[test]
    fn same_frames_compares_contents() {
        let a = FrameSet::from_uris(["a.png", "b.png"], 150);
        let b = FrameSet::from_uris(["a.png", "b.png"], 150);
        let c = FrameSet::from_uris(["b.png", "a.png"], 150);
        assert!(a.same_frames(&b));
        assert!(!a.same_frames(&c));
    }

    #[test]
    fn empty_input_is_empty_set() {
        let set = FrameSet::from_uris(Vec::<String>::new(), 150);
        assert!(set.is_empty());
        assert_eq!(set.get(0), None);
    }
}
