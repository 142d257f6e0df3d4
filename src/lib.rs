// SPDX-License-Identifier: MPL-2.0
//! `iced_turntable` shows a sequence of product photos as a drag-to-rotate
//! turntable, built with the Iced GUI framework.
//!
//! The library exposes every piece on its own: the shared image cache and
//! preloader in [`media`], the pure state types in [`ui::state`], and the
//! viewer component in [`ui::viewer`].

pub mod app;
pub mod config;
pub mod directory_scanner;
pub mod error;
pub mod logging;
pub mod media;
pub mod ui;

#[cfg(test)]
mod test_utils;
