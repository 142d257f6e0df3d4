// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Zoom**: Scale factor and step bounds
//! - **Drag**: Pointer sensitivity bounds
//! - **Autoplay**: Per-frame interval policy
//! - **Preload**: Timeout, cache and frame-count limits

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Scale factor when a viewer mounts or is reset.
pub const DEFAULT_ZOOM_SCALE: f32 = 1.0;

/// Minimum allowed scale factor.
pub const MIN_ZOOM_SCALE: f32 = 0.5;

/// Maximum allowed scale factor.
pub const MAX_ZOOM_SCALE: f32 = 3.0;

/// Scale added or removed by one zoom in/out.
pub const DEFAULT_ZOOM_STEP: f32 = 0.2;

pub const MIN_ZOOM_STEP: f32 = 0.05;

pub const MAX_ZOOM_STEP: f32 = 1.0;

// ==========================================================================
// Drag Defaults
// ==========================================================================

/// Pixels of horizontal drag per frame step.
pub const DEFAULT_DRAG_SENSITIVITY_PX: f32 = 3.0;

pub const MIN_DRAG_SENSITIVITY_PX: f32 = 1.0;

pub const MAX_DRAG_SENSITIVITY_PX: f32 = 20.0;

// ==========================================================================
// Autoplay Defaults
// ==========================================================================

/// Per-frame interval for sparse frame sets (≤ few-frames threshold).
pub const DEFAULT_SLOW_INTERVAL_MS: u64 = 200;

/// Per-frame interval for dense frame sets (≥ many-frames threshold).
pub const DEFAULT_FAST_INTERVAL_MS: u64 = 40;

/// Lower bound for either configured interval.
pub const MIN_INTERVAL_MS: u64 = 10;

/// Upper bound for either configured interval.
pub const MAX_INTERVAL_MS: u64 = 2_000;

/// Frame count at or below which the slow interval applies.
pub const DEFAULT_FEW_FRAMES_THRESHOLD: usize = 4;

/// Frame count at or above which the fast interval applies.
pub const DEFAULT_MANY_FRAMES_THRESHOLD: usize = 40;

// ==========================================================================
// Preload Defaults
// ==========================================================================

/// Time allowed for one frame to fetch and decode.
pub const DEFAULT_PRELOAD_TIMEOUT_SECS: u64 = 10;

pub const MIN_PRELOAD_TIMEOUT_SECS: u64 = 1;

pub const MAX_PRELOAD_TIMEOUT_SECS: u64 = 120;

/// Maximum number of frames accepted for one product.
pub const DEFAULT_MAX_FRAMES: usize = 150;

/// Smallest capacity accepted for a bounded image cache.
pub const MIN_CACHE_CAPACITY: usize = 1;
