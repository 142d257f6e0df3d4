// SPDX-License-Identifier: MPL-2.0
//! Batch frame preloading.
//!
//! [`Preloader::preload`] fans out one load per distinct URI and waits for all
//! of them to settle. Individual failures and timeouts are recorded in the
//! [`ImageCache`] and simply leave that frame out of the result; the batch
//! itself never fails.

use super::cache::ImageCache;
use super::image::FrameImage;
use super::source::SharedFrameSource;
use crate::config::{DEFAULT_MAX_FRAMES, DEFAULT_PRELOAD_TIMEOUT_SECS};
use crate::error::{Error, Result};
use futures_util::future::{self, FutureExt};
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::time::Duration;

/// Resolved preload configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadSettings {
    /// Time allowed for one frame to fetch and decode.
    pub timeout: Duration,

    /// Capacity for the shared image cache (`None` = never evict).
    pub cache_capacity: Option<NonZeroUsize>,

    /// Maximum frames kept from one image list.
    pub max_frames: usize,
}

impl Default for PreloadSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_PRELOAD_TIMEOUT_SECS),
            cache_capacity: None,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

/// A successfully loaded frame.
#[derive(Debug, Clone)]
pub struct LoadedFrame {
    pub uri: String,
    pub image: FrameImage,
}

/// Summary of one preload batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadReport {
    /// Distinct URIs requested.
    pub requested: usize,
    /// URIs that ended up loaded.
    pub loaded: usize,
    /// URIs that failed or timed out.
    pub failed: usize,
    /// URIs served from the cache without a new fetch.
    pub cached: usize,
}

/// Loads frames through the shared cache.
#[derive(Debug, Clone)]
pub struct Preloader {
    cache: ImageCache,
    source: SharedFrameSource,
    timeout: Duration,
}

impl Preloader {
    #[must_use]
    pub fn new(cache: ImageCache, source: SharedFrameSource, timeout: Duration) -> Self {
        Self {
            cache,
            source,
            timeout,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Loads a single URI, reusing a cached frame or an in-flight load.
    ///
    /// A previously failed URI is fetched again.
    ///
    /// # Errors
    ///
    /// Returns the fetch/decode error, or [`Error::Timeout`] if the frame did
    /// not settle in time. The outcome is recorded in the cache either way.
    pub async fn load(&self, uri: String) -> Result<FrameImage> {
        if let Some(image) = self.cache.loaded(&uri) {
            return Ok(image);
        }

        let cache = self.cache.clone();
        let source = self.source.clone();
        let timeout = self.timeout;
        let key = uri.clone();

        let pending = self.cache.join_or_start(&uri, move || {
            async move {
                let fetch = source.fetch(&key);
                let result = match tokio::time::timeout(timeout, fetch).await {
                    Ok(result) => result,
                    Err(_) => Err(Error::Timeout(timeout)),
                };
                if let Err(err) = &result {
                    tracing::warn!(uri = %key, error = %err, "frame failed to load");
                }
                cache.complete(&key, &result);
                result
            }
            .boxed()
        });

        pending.await
    }

    /// Loads the frame shown first, ahead of the batch.
    ///
    /// The batch started alongside joins this load instead of fetching the
    /// URI again.
    ///
    /// # Errors
    ///
    /// Same as [`Preloader::load`].
    pub async fn load_first(&self, uri: String) -> Result<FrameImage> {
        let started = std::time::Instant::now();
        let result = self.load(uri.clone()).await;
        tracing::debug!(
            uri = %uri,
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "first frame settled"
        );
        result
    }

    /// Loads every URI and returns the frames that loaded.
    ///
    /// Repeated URIs are fetched once. Results are not guaranteed to follow
    /// input order; look frames up by URI.
    pub async fn preload(&self, uris: Vec<String>) -> Vec<LoadedFrame> {
        self.preload_with_report(uris).await.0
    }

    /// Like [`Preloader::preload`], also returning counts for logging.
    pub async fn preload_with_report(&self, uris: Vec<String>) -> (Vec<LoadedFrame>, PreloadReport) {
        let mut seen = HashSet::new();
        let unique: Vec<String> = uris.into_iter().filter(|u| seen.insert(u.clone())).collect();

        if unique.is_empty() {
            return (Vec::new(), PreloadReport::default());
        }

        let cached = unique
            .iter()
            .filter(|uri| self.cache.contains_loaded(uri))
            .count();

        let attempts = unique.into_iter().map(|uri| {
            self.load(uri.clone())
                .map(move |result| result.map(|image| LoadedFrame { uri, image }))
        });
        let settled = future::join_all(attempts).await;

        let requested = settled.len();
        let loaded: Vec<LoadedFrame> = settled.into_iter().filter_map(Result::ok).collect();
        let report = PreloadReport {
            requested,
            loaded: loaded.len(),
            failed: requested - loaded.len(),
            cached,
        };

        tracing::info!(
            requested = report.requested,
            loaded = report.loaded,
            failed = report.failed,
            cached = report.cached,
            "preload settled"
        );

        (loaded, report)
    }
}
