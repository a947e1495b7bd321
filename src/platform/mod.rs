//! Platform API surface: share sheet, downloads, clipboard, asset caching
//!
//! The export pipeline talks to the host platform only through these traits,
//! so environments without a share sheet or a writable filesystem can still
//! run the full fallback chain in tests.

pub mod clipboard;
pub mod download;
pub mod service_worker;
pub mod share;

pub use clipboard::{ClipboardAccess, MemoryClipboard};
#[cfg(feature = "clipboard")]
pub use clipboard::SystemClipboard;
pub use download::{DownloadSink, FsDownloadSink, NullDownloadSink};
#[cfg(feature = "http")]
pub use service_worker::HttpFetcher;
pub use service_worker::{
    AssetCacheWorker, CachePolicy, CacheStore, FetchEvent, FetchOutcome, FetchResponse,
    MemoryCacheStore, NetworkFetcher,
};
pub use share::{ShareFailure, SharePayload, ShareProvider};

/// The composite platform surface an export runs against.
///
/// A `None` share provider means the platform has no share sheet at all;
/// the export skips straight to the download fallback.
pub trait SharePlatform: Send + Sync {
    fn share_provider(&self) -> Option<&dyn ShareProvider>;
    fn download_sink(&self) -> &dyn DownloadSink;
    fn clipboard(&self) -> &dyn ClipboardAccess;
}

/// A platform with no share sheet, a discarding download sink, and an
/// in-memory clipboard. A safe default for tests and headless setups.
#[derive(Default)]
pub struct NoopPlatform {
    download: NullDownloadSink,
    clipboard: MemoryClipboard,
}

impl NoopPlatform {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SharePlatform for NoopPlatform {
    fn share_provider(&self) -> Option<&dyn ShareProvider> {
        None
    }

    fn download_sink(&self) -> &dyn DownloadSink {
        &self.download
    }

    fn clipboard(&self) -> &dyn ClipboardAccess {
        &self.clipboard
    }
}
