//! Torrent downloads through librqbit.
//!
//! The engine does peer selection and piece verification; this adapter adds
//! the paused-session bookkeeping that `status` and `clear` report on.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use librqbit::{AddTorrent, AddTorrentOptions, Session};
use tracing::{error, info};

use seedup_core::error::SeedUpError;
use seedup_core::traits::downloader::TorrentDownloader;
use seedup_core::traits::session::PausedSession;

use crate::storage::SessionFile;

pub struct RqbitDownloader {
    sessions: Arc<SessionFile>,
}

impl RqbitDownloader {
    pub fn new(sessions: Arc<SessionFile>) -> Self {
        Self { sessions }
    }

    /// Decide where this download goes.
    ///
    /// A paused session for the same source wins when resuming; any other
    /// stored session is dropped.
    async fn resolve_destination(
        &self,
        source: &str,
        requested: &Path,
        resume: bool,
    ) -> Result<PathBuf, SeedUpError> {
        match self.sessions.load().await? {
            Some(paused) if resume && paused.source == source => {
                info!("Resuming paused download into {}", paused.destination.display());
                Ok(paused.destination)
            }
            Some(paused) => {
                info!("Discarding previous session for {}", paused.source);
                self.sessions.remove().await?;
                Ok(requested.to_path_buf())
            }
            None => Ok(requested.to_path_buf()),
        }
    }
}

#[async_trait]
impl TorrentDownloader for RqbitDownloader {
    async fn target_destination(
        &self,
        source: &str,
        requested: &Path,
        resume: bool,
    ) -> Result<PathBuf, SeedUpError> {
        match self.sessions.load().await? {
            Some(paused) if resume && paused.source == source => Ok(paused.destination),
            _ => Ok(requested.to_path_buf()),
        }
    }

    async fn download(
        &self,
        source: &str,
        destination: &Path,
        resume: bool,
    ) -> Result<Option<PathBuf>, SeedUpError> {
        let destination = self.resolve_destination(source, destination, resume).await?;

        tokio::fs::create_dir_all(&destination)
            .await
            .map_err(|e| SeedUpError::Io(format!("create {} failed: {e}", destination.display())))?;

        self.sessions
            .save(&PausedSession {
                source: source.to_string(),
                destination: destination.clone(),
                started_at: now_secs()?,
            })
            .await?;

        match fetch(source, &destination).await {
            Ok(path) => {
                self.sessions.remove().await?;
                Ok(Some(path))
            }
            Err(e) => {
                error!("{e}");
                Ok(None)
            }
        }
    }
}

async fn fetch(source: &str, destination: &Path) -> Result<PathBuf, SeedUpError> {
    let add = AddTorrent::from_cli_argument(source)
        .map_err(|e| SeedUpError::Download(format!("invalid torrent source {source}: {e:#}")))?;

    let session = Session::new(destination.to_path_buf())
        .await
        .map_err(|e| SeedUpError::Download(format!("failed to start torrent session: {e:#}")))?;

    // Existing files are kept and re-verified, which is what makes resume work.
    let opts = AddTorrentOptions {
        overwrite: true,
        output_folder: Some(destination.to_string_lossy().to_string()),
        ..Default::default()
    };

    let handle = session
        .add_torrent(add, Some(opts))
        .await
        .map_err(|e| SeedUpError::Download(format!("failed to add torrent: {e:#}")))?
        .into_handle()
        .ok_or_else(|| SeedUpError::Download("torrent engine returned no handle".to_string()))?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .map_err(|e| SeedUpError::Download(format!("progress bar template error: {e}")))?,
    );
    pb.set_message(format!("Downloading {source}"));
    pb.enable_steady_tick(Duration::from_millis(120));

    let finished = handle.wait_until_completed().await;
    pb.finish_and_clear();
    finished.map_err(|e| SeedUpError::Download(format!("download did not complete: {e:#}")))?;

    let path = match handle.name() {
        Some(name) => destination.join(name),
        None => destination.to_path_buf(),
    };
    info!("Torrent finished: {}", path.display());
    Ok(path)
}

fn now_secs() -> Result<u64, SeedUpError> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| SeedUpError::Io(format!("SystemTime error: {e}")))
}
