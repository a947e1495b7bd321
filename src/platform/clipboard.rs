//! Clipboard surface, the last export fallback.

use std::sync::Mutex;

use crate::error::Result;
#[cfg(feature = "clipboard")]
use crate::error::Error;

pub trait ClipboardAccess: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// In-memory clipboard for tests and headless setups.
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently written text, if any.
    pub fn contents(&self) -> Option<String> {
        match self.contents.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ClipboardAccess for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        match self.contents.lock() {
            Ok(mut guard) => *guard = Some(text.to_string()),
            Err(poisoned) => *poisoned.into_inner() = Some(text.to_string()),
        }
        Ok(())
    }
}

/// The operating system clipboard.
#[cfg(feature = "clipboard")]
#[derive(Default)]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "clipboard")]
impl ClipboardAccess for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| Error::ClipboardError(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| Error::ClipboardError(e.to_string()))
    }
}
