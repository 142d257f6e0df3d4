// SPDX-License-Identifier: MPL-2.0
//! Per-product viewer state persistence using CBOR format.
//!
//! Each product's last frame, zoom and direction are stored separately from
//! user preferences in `settings.toml`. The store is best effort: unreadable
//! or corrupt records load as absent, and write failures are reported to the
//! caller to log, never to the user.
//!
//! # Path Resolution
//!
//! Records live in `<data dir>/viewer-state/<key>.cbor`, where the data
//! directory follows [`paths::get_app_data_dir_with_override`].

use super::paths;
use crate::error::{Error, Result};
use crate::ui::state::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Directory under the app data dir holding one record per product.
const STATE_DIR: &str = "viewer-state";

const STATE_EXTENSION: &str = "cbor";

/// Key used when a product name normalizes to nothing.
pub const UNNAMED_KEY: &str = "unnamed";

/// The part of a viewer's state that survives remounts.
///
/// Playback is deliberately absent: a remounted viewer always starts paused.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PersistedViewerState {
    pub frame_index: usize,
    pub scale: f32,
    pub direction: Direction,
}

impl Default for PersistedViewerState {
    fn default() -> Self {
        Self {
            frame_index: 0,
            scale: crate::config::DEFAULT_ZOOM_SCALE,
            direction: Direction::Forward,
        }
    }
}

/// Durable key → viewer state mapping.
pub trait ViewerStateStore: Send + Sync + fmt::Debug {
    /// Returns the saved state for `key`, or `None` if absent or unreadable.
    fn load(&self, key: &str) -> Option<PersistedViewerState>;

    /// Saves `state` under `key`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be written.
    fn save(&self, key: &str, state: &PersistedViewerState) -> Result<()>;
}

pub type SharedStateStore = Arc<dyn ViewerStateStore>;

/// Derives a file-safe persistence key from a free-text product name.
///
/// Trims, lowercases, turns whitespace runs into `-` and path-unsafe
/// characters into `_`. Different names can map to the same key.
#[must_use]
pub fn storage_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.trim().chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if !in_whitespace {
                key.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
            key.push(c);
        } else {
            key.push('_');
        }
    }

    // No hidden files and no `.`/`..` path components.
    if key.starts_with('.') {
        key.replace_range(..1, "_");
    }

    if key.is_empty() {
        UNNAMED_KEY.to_string()
    } else {
        key
    }
}

/// File-backed store writing one CBOR record per key.
#[derive(Debug, Clone)]
pub struct CborStateStore {
    directory: PathBuf,
}

impl CborStateStore {
    /// Creates a store rooted at `directory` (created lazily on first save).
    #[must_use]
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    /// Creates a store under the resolved app data directory.
    ///
    /// Returns `None` if no data directory can be determined.
    #[must_use]
    pub fn in_data_dir(base_dir: Option<PathBuf>) -> Option<Self> {
        paths::get_app_data_dir_with_override(base_dir).map(|dir| Self::new(dir.join(STATE_DIR)))
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.directory
            .join(format!("{}.{STATE_EXTENSION}", storage_key(key)))
    }
}

impl ViewerStateStore for CborStateStore {
    fn load(&self, key: &str) -> Option<PersistedViewerState> {
        let path = self.record_path(key);
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot read viewer state");
                return None;
            }
        };

        match ciborium::from_reader(BufReader::new(file)) {
            Ok(state) => Some(state),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "discarding corrupt viewer state");
                None
            }
        }
    }

    fn save(&self, key: &str, state: &PersistedViewerState) -> Result<()> {
        fs::create_dir_all(&self.directory)?;
        let path = self.record_path(key);
        let file = fs::File::create(&path)?;
        let mut writer = BufWriter::new(file);
        ciborium::into_writer(state, &mut writer)
            .map_err(|e| Error::State(format!("{}: {e}", path.display())))?;
        writer.flush()?;
        Ok(())
    }
}

/// In-process store for tests and for hosts without a data directory.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    records: Mutex<HashMap<String, PersistedViewerState>>,
    saves: Mutex<usize>,
}

impl MemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl ViewerStateStore for MemoryStateStore {
    fn load(&self, key: &str) -> Option<PersistedViewerState> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&storage_key(key))
            .copied()
    }

    fn save(&self, key: &str, state: &PersistedViewerState) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(storage_key(key), *state);
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// Picks the file store when a data directory resolves, memory otherwise.
#[must_use]
pub fn default_store(base_dir: Option<PathBuf>) -> SharedStateStore {
    match CborStateStore::in_data_dir(base_dir) {
        Some(store) => {
            tracing::debug!(directory = %store.directory().display(), "persisting viewer state");
            Arc::new(store)
        }
        None => {
            tracing::warn!("no data directory; viewer state will not survive restarts");
            Arc::new(MemoryStateStore::new())
        }
    }
}
