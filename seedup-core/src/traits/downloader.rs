use std::path::{Path, PathBuf};

use async_trait::async_trait;
use crate::error::SeedUpError;

#[async_trait]
pub trait TorrentDownloader: Send + Sync {
    /// Where a `download` with these arguments would write, without changing
    /// any stored state. Engines that resume into a remembered location
    /// override this so callers can prepare that location first.
    async fn target_destination(
        &self,
        _source: &str,
        requested: &Path,
        _resume: bool,
    ) -> Result<PathBuf, SeedUpError> {
        Ok(requested.to_path_buf())
    }

    /// Download `source` into `destination`.
    ///
    /// `Ok(None)` means the download failed or was cancelled; `Err` is kept for
    /// local faults the engine could not report any other way.
    async fn download(
        &self,
        source: &str,
        destination: &Path,
        resume: bool,
    ) -> Result<Option<PathBuf>, SeedUpError>;
}
