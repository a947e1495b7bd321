//! Sharecard Engine
//!
//! A headless engine that composes themed "share card" summary images from
//! small tool results and exports them through the platform's share,
//! download, and clipboard surfaces.
//!
//! # Features
//!
//! - **Pure composition**: `compose_card` builds a tagged node tree from a
//!   `CardConfig`; no I/O, no renderer coupling
//! - **Deterministic rendering**: the same configuration always rasterizes
//!   to the same PNG bytes (fixed 540x540 canvas, 2x output scale)
//! - **Graceful export fallbacks**: native share, then file download, then
//!   clipboard text, with status callbacks throughout
//!
//! # Example
//!
//! ```
//! use sharecard::{compose, rendering, CardConfig, MainResult};
//!
//! # fn main() -> Result<(), sharecard::Error> {
//! let config = CardConfig {
//!     tool_name: "DECISION BATTLE".to_string(),
//!     icon: Some("X".to_string()),
//!     theme: "red".to_string(),
//!     main_result: Some(MainResult {
//!         label: "Victory!".to_string(),
//!         value: "Choice A".to_string(),
//!         sublabel: None,
//!     }),
//!     ..Default::default()
//! };
//!
//! let card = compose::compose_card(&config);
//! let shot = rendering::capture(&card)?;
//! assert!(!shot.png_data.is_empty());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod theme;

pub mod compose;

pub mod rendering;

pub mod export;

// Platform API surface (share, download, clipboard, asset caching)
pub mod platform;

pub use compose::{compose_card, RenderedCard};
pub use export::{export_card, ExportOptions};

/// The primary result shown in the themed result box.
///
/// An empty `label` or an empty/absent `sublabel` suppresses that line
/// entirely; no empty text node is emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainResult {
    #[serde(default)]
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub sublabel: Option<String>,
}

/// The secondary result rendered inline below the result box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubResult {
    pub label: String,
    pub value: String,
}

/// One entry of the stats row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub value: String,
    pub label: String,
}

/// Configuration describing what a share card should display.
///
/// Only `tool_name` is required. Every other field is optional, and an
/// absent field suppresses its visual region entirely. An unknown or empty
/// `theme` resolves to the `violet` default.
///
/// `extra_content` and `custom_main` carry free-form node trees and are
/// only reachable through the programmatic API, not JSON configs. When
/// `custom_main` is set it replaces the whole default main section; the
/// result and stat fields are ignored without merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Name displayed in the card header (e.g. "DECISION BATTLE")
    pub tool_name: String,
    /// Glyph shown above the result box
    #[serde(default)]
    pub icon: Option<String>,
    /// Theme name; one of `theme::THEME_NAMES`, anything else maps to violet
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub main_result: Option<MainResult>,
    #[serde(default)]
    pub sub_result: Option<SubResult>,
    /// Ordered stat entries; an empty sequence suppresses the stats row
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    /// Free-form content appended after the stats row
    #[serde(skip)]
    pub extra_content: Option<compose::Node>,
    /// Full override of the main section; wins unconditionally when present
    #[serde(skip)]
    pub custom_main: Option<compose::Node>,
}

/// Phase of a single export attempt, delivered through the status callback.
///
/// Every terminal status except a user cancellation is followed by an
/// `Idle` reset after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStatus {
    /// No export in flight (also the post-terminal reset value)
    Idle,
    Generating,
    Shared,
    Downloaded,
    Copied,
    Error,
}

impl std::fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExportStatus::Idle => "idle",
            ExportStatus::Generating => "generating",
            ExportStatus::Shared => "shared",
            ExportStatus::Downloaded => "downloaded",
            ExportStatus::Copied => "copied",
            ExportStatus::Error => "error",
        };
        f.write_str(s)
    }
}
