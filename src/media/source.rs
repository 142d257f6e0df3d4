// SPDX-License-Identifier: MPL-2.0
//! Fetching and decoding a single frame.
//!
//! [`FrameSource`] is the seam between the preloader and the outside world:
//! the app uses [`DefaultFrameSource`], tests script their own.

use super::frame_set::{classify_uri, FrameLocation};
use super::image::FrameImage;
use crate::error::{Error, Result};
use base64::Engine as _;
use futures_util::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loads one frame URI into a decoded image.
pub trait FrameSource: Send + Sync + fmt::Debug {
    fn fetch(&self, uri: &str) -> BoxFuture<'static, Result<FrameImage>>;
}

/// Shared, type-erased frame source.
pub type SharedFrameSource = Arc<dyn FrameSource>;

/// Frame source for files, root-relative assets, `data:` URIs and HTTP(S).
#[derive(Debug, Clone)]
pub struct DefaultFrameSource {
    client: reqwest::Client,
    asset_root: Option<PathBuf>,
}

impl DefaultFrameSource {
    /// Creates a source. Root-relative URIs resolve against `asset_root` when
    /// set, otherwise they are read as absolute filesystem paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] if the HTTP client cannot be built.
    pub fn new(asset_root: Option<PathBuf>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("IcedTurntable/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, asset_root })
    }

    fn resolve_root_relative(&self, uri: &str) -> PathBuf {
        match &self.asset_root {
            Some(root) => root.join(uri.trim_start_matches('/')),
            None => PathBuf::from(uri),
        }
    }
}

impl FrameSource for DefaultFrameSource {
    fn fetch(&self, uri: &str) -> BoxFuture<'static, Result<FrameImage>> {
        match classify_uri(uri) {
            Some(FrameLocation::Remote(url)) => fetch_remote(self.client.clone(), url).boxed(),
            Some(FrameLocation::Embedded(data_uri)) => match decode_data_uri(&data_uri) {
                Ok(bytes) => decode_off_thread(bytes).boxed(),
                Err(err) => future::ready(Err(err)).boxed(),
            },
            Some(FrameLocation::RootRelative(path)) => {
                load_file(self.resolve_root_relative(&path)).boxed()
            }
            Some(FrameLocation::File(path)) => load_file(path).boxed(),
            None => future::ready(Err(Error::UnsupportedUri(uri.to_string()))).boxed(),
        }
    }
}

async fn fetch_remote(client: reqwest::Client, url: String) -> Result<FrameImage> {
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(Error::Fetch(format!("HTTP status: {}", response.status())));
    }
    let bytes = response.bytes().await?;
    decode_off_thread(bytes.to_vec()).await
}

async fn load_file(path: PathBuf) -> Result<FrameImage> {
    tokio::task::spawn_blocking(move || read_and_decode(&path))
        .await
        .unwrap_or_else(|e| Err(Error::Io(format!("Frame load task failed: {e}"))))
}

fn read_and_decode(path: &Path) -> Result<FrameImage> {
    let bytes = std::fs::read(path)?;
    FrameImage::decode(&bytes)
}

async fn decode_off_thread(bytes: Vec<u8>) -> Result<FrameImage> {
    tokio::task::spawn_blocking(move || FrameImage::decode(&bytes))
        .await
        .unwrap_or_else(|e| Err(Error::Decode(format!("Decode task failed: {e}"))))
}

/// Extracts the payload of a `data:image/<subtype>;base64,<data>` URI.
fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let rest = uri
        .get("data:".len()..)
        .ok_or_else(|| Error::UnsupportedUri(uri.to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::Decode("data URI has no payload separator".into()))?;

    if !meta
        .split(';')
        .any(|part| part.trim().eq_ignore_ascii_case("base64"))
    {
        return Err(Error::UnsupportedUri(uri.to_string()));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::Decode(format!("invalid base64 payload: {e}")))
}
