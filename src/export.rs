//! Export pipeline: capture the card and hand it to the platform.
//!
//! The fallback chain is share sheet, then file download, then clipboard
//! text, with a status callback fired at every transition. A user
//! cancellation is terminal: the status returns to idle immediately and no
//! fallback runs. Every other terminal status is followed by an automatic
//! idle reset after a fixed delay, delivered from a background task so the
//! export itself returns as soon as its outcome is known.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::time::sleep;

use crate::compose::RenderedCard;
use crate::platform::{ShareFailure, SharePayload, SharePlatform};
use crate::rendering;
use crate::ExportStatus;

pub const DEFAULT_FILENAME: &str = "result.png";
pub const DEFAULT_TITLE: &str = "Decision Result";

/// Appended to the share text before it is written to the clipboard.
pub const ATTRIBUTION_SUFFIX: &str = "\nMade with Marco's Decision Tools";

/// Delay before a terminal status resets back to idle.
pub const IDLE_RESET_DELAY: Duration = Duration::from_millis(2500);

/// Callback receiving every status transition of an export.
pub type StatusHandler = Arc<dyn Fn(ExportStatus) + Send + Sync>;

/// Options for a single export attempt. All fields have sensible defaults.
#[derive(Clone, Default)]
pub struct ExportOptions {
    pub filename: Option<String>,
    pub title: Option<String>,
    /// Share text; also the clipboard fallback content.
    pub text: Option<String>,
    pub on_status_change: Option<StatusHandler>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filename = Some(filename.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn on_status_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(ExportStatus) + Send + Sync + 'static,
    {
        self.on_status_change = Some(Arc::new(handler));
        self
    }

    fn emit(&self, status: ExportStatus) {
        if let Some(handler) = &self.on_status_change {
            handler(status);
        }
    }
}

impl std::fmt::Debug for ExportOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportOptions")
            .field("filename", &self.filename)
            .field("title", &self.title)
            .field("text", &self.text)
            .field("on_status_change", &self.on_status_change.is_some())
            .finish()
    }
}

/// Run the full export chain for a composed card.
///
/// The outcome is reported exclusively through the status callback; the
/// chain itself absorbs every failure.
pub async fn export_card<P: SharePlatform>(
    card: &RenderedCard,
    options: ExportOptions,
    platform: &P,
) {
    options.emit(ExportStatus::Generating);

    match attempt_share_or_download(card, &options, platform).await {
        Ok(status) => {
            debug!("export finished: {status}");
            options.emit(status);
            schedule_idle_reset(&options);
        }
        Err(ShareFailure::Cancelled) => {
            debug!("export cancelled by user");
            options.emit(ExportStatus::Idle);
        }
        Err(ShareFailure::Failed(reason)) => {
            warn!("share and download failed ({reason}); writing text to clipboard");
            let text = format!(
                "{}{}",
                options.text.as_deref().unwrap_or_default(),
                ATTRIBUTION_SUFFIX
            );
            let status = match platform.clipboard().write_text(&text) {
                Ok(()) => ExportStatus::Copied,
                Err(e) => {
                    warn!("clipboard fallback failed: {e}");
                    ExportStatus::Error
                }
            };
            options.emit(status);
            schedule_idle_reset(&options);
        }
    }
}

/// Capture the card and try share, then download. A capture or download
/// failure surfaces as `ShareFailure::Failed` so the caller routes it into
/// the clipboard fallback.
async fn attempt_share_or_download<P: SharePlatform>(
    card: &RenderedCard,
    options: &ExportOptions,
    platform: &P,
) -> std::result::Result<ExportStatus, ShareFailure> {
    let card = card.clone();
    let shot = tokio::task::spawn_blocking(move || rendering::capture(&card))
        .await
        .map_err(|e| ShareFailure::Failed(e.to_string()))?
        .map_err(|e| ShareFailure::Failed(e.to_string()))?;

    let payload = SharePayload {
        filename: options
            .filename
            .clone()
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
        mime: "image/png",
        bytes: shot.png_data,
        title: options
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        text: options.text.clone().unwrap_or_default(),
    };

    if let Some(provider) = platform.share_provider() {
        if provider.can_share(&payload) {
            provider.share(&payload)?;
            return Ok(ExportStatus::Shared);
        }
        debug!("share provider declined the payload, downloading instead");
    }

    platform
        .download_sink()
        .save(&payload.filename, &payload.bytes)
        .map_err(|e| ShareFailure::Failed(e.to_string()))?;
    Ok(ExportStatus::Downloaded)
}

/// Fire-and-forget idle reset after the terminal status.
fn schedule_idle_reset(options: &ExportOptions) {
    if let Some(handler) = options.on_status_change.clone() {
        tokio::spawn(async move {
            sleep(IDLE_RESET_DELAY).await;
            handler(ExportStatus::Idle);
        });
    }
}
