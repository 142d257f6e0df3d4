// SPDX-License-Identifier: MPL-2.0
//! Shared helpers for unit tests: tiny encoded images and a scripted frame
//! source whose failures, hangs and latency are chosen per test.

use crate::error::{Error, Result};
use crate::media::{FrameImage, FrameSource};
use futures_util::future::{BoxFuture, FutureExt};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::Mutex;
use std::time::Duration;

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-6;

/// Encodes a solid `width`×`height` PNG.
pub fn encoded_png(width: u32, height: u32) -> Vec<u8> {
    let img = image_rs::RgbaImage::from_pixel(width, height, image_rs::Rgba([200, 40, 40, 255]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image_rs::ImageFormat::Png)
        .expect("png encoding to memory");
    bytes.into_inner()
}

/// A 1×1 decoded frame.
pub fn tiny_frame() -> FrameImage {
    FrameImage::from_rgba(1, 1, vec![255, 255, 255, 255])
}

/// Frame source that answers from a script instead of the network.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    failing: HashSet<String>,
    hanging: HashSet<String>,
    delay: Option<Duration>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// These URIs resolve to a fetch error.
    pub fn failing<I, S>(mut self, uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failing.extend(uris.into_iter().map(Into::into));
        self
    }

    /// These URIs never resolve on their own.
    pub fn hanging<I, S>(mut self, uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hanging.extend(uris.into_iter().map(Into::into));
        self
    }

    /// Every fetch waits this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fetch_count(&self, uri: &str) -> usize {
        self.fetches
            .lock()
            .expect("fetch counter lock")
            .get(uri)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().expect("fetch counter lock").values().sum()
    }
}

impl FrameSource for ScriptedSource {
    fn fetch(&self, uri: &str) -> BoxFuture<'static, Result<FrameImage>> {
        *self
            .fetches
            .lock()
            .expect("fetch counter lock")
            .entry(uri.to_string())
            .or_default() += 1;

        let fails = self.failing.contains(uri);
        let hangs = self.hanging.contains(uri);
        let delay = self.delay;
        let uri = uri.to_string();

        async move {
            if hangs {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if fails {
                Err(Error::Fetch(format!("scripted failure for {uri}")))
            } else {
                Ok(tiny_frame())
            }
        }
        .boxed()
    }
}
