// SPDX-License-Identifier: MPL-2.0
//! Tracing subscriber setup for the binary.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, checked before `RUST_LOG`.
pub const ENV_LOG: &str = "ICED_TURNTABLE_LOG";

/// Used when neither variable is set. Keeps the renderer stack quiet.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn,iced_wgpu=warn";

/// Builds the filter from `ICED_TURNTABLE_LOG`, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`]. An unparsable variable is skipped.
#[must_use]
pub fn env_filter() -> EnvFilter {
    filter_from(
        std::env::var(ENV_LOG).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    )
}

fn filter_from(primary: Option<String>, fallback: Option<String>) -> EnvFilter {
    [primary, fallback]
        .into_iter()
        .flatten()
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init() {
    let result = tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
