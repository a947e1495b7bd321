//! File download surface.

use std::path::PathBuf;

use log::debug;

use crate::error::{Error, Result};

/// Somewhere downloaded card images can be saved.
pub trait DownloadSink: Send + Sync {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<()>;
}

/// Saves downloads into a directory on the local filesystem.
pub struct FsDownloadSink {
    dir: PathBuf,
}

impl FsDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for FsDownloadSink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::DownloadError(format!("{}: {}", self.dir.display(), e)))?;
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes)
            .map_err(|e| Error::DownloadError(format!("{}: {}", path.display(), e)))?;
        debug!("saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Accepts and discards every download. Used by tests and headless setups
/// with no writable target.
#[derive(Default)]
pub struct NullDownloadSink;

impl DownloadSink for NullDownloadSink {
    fn save(&self, _filename: &str, _bytes: &[u8]) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_sink_writes_the_file() {
        let dir = std::env::temp_dir().join(format!("sharecard-dl-{}", std::process::id()));
        let sink = FsDownloadSink::new(&dir);
        sink.save("result.png", b"png-bytes").unwrap();
        let written = std::fs::read(dir.join("result.png")).unwrap();
        assert_eq!(written, b"png-bytes");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn null_sink_accepts_anything() {
        assert!(NullDownloadSink.save("x.png", &[]).is_ok());
    }
}
