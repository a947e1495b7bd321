//! Native share surface.

use thiserror::Error;

/// The file-bearing payload handed to the native share sheet.
#[derive(Debug, Clone)]
pub struct SharePayload {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub title: String,
    pub text: String,
}

/// Why a share attempt did not complete.
///
/// Cancellation is the user backing out of the share sheet; it is not an
/// error and must not trigger any fallback.
#[derive(Debug, Clone, Error)]
pub enum ShareFailure {
    #[error("share cancelled by user")]
    Cancelled,
    #[error("share failed: {0}")]
    Failed(String),
}

/// A native share sheet, where the platform offers one.
pub trait ShareProvider: Send + Sync {
    /// Whether this provider can share the given payload at all. A `false`
    /// here routes the export to the download fallback without attempting
    /// the share.
    fn can_share(&self, payload: &SharePayload) -> bool;

    /// Present the payload to the share surface and block until the user
    /// completes or dismisses it.
    fn share(&self, payload: &SharePayload) -> Result<(), ShareFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages_name_the_cause() {
        assert_eq!(ShareFailure::Cancelled.to_string(), "share cancelled by user");
        assert_eq!(
            ShareFailure::Failed("no handler".to_string()).to_string(),
            "share failed: no handler"
        );
    }
}
