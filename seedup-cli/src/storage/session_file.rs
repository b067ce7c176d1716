use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use seedup_core::error::SeedUpError;
use seedup_core::traits::session::{PausedSession, SessionStore};

/// Paused-session record kept as a single JSON file.
///
/// The file exists exactly while a download is in flight or was interrupted.
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub async fn save(&self, session: &PausedSession) -> Result<(), SeedUpError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SeedUpError::Session(format!("create state dir failed: {e}")))?;
        }

        let data = serde_json::to_vec_pretty(session)
            .map_err(|e| SeedUpError::Serialization(format!("encode session failed: {e}")))?;

        fs::write(&self.path, data)
            .await
            .map_err(|e| SeedUpError::Session(format!("write session failed: {e}")))?;

        debug!("Saved session for {} at {}", session.source, self.path.display());
        Ok(())
    }

    /// The stored session, or `None` when there is none or it is unreadable.
    pub async fn load(&self) -> Result<Option<PausedSession>, SeedUpError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read(&self.path)
            .await
            .map_err(|e| SeedUpError::Session(format!("read session failed: {e}")))?;

        match serde_json::from_slice(&data) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!("Ignoring corrupt session file {}: {e}", self.path.display());
                Ok(None)
            }
        }
    }

    /// Remove the record. Returns whether a file was actually removed.
    pub async fn remove(&self) -> Result<bool, SeedUpError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Removed session file {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SeedUpError::Session(format!("remove session failed: {e}"))),
        }
    }
}

#[async_trait]
impl SessionStore for SessionFile {
    async fn has_paused_session(&self) -> Result<bool, SeedUpError> {
        Ok(self.load().await?.is_some())
    }

    async fn clear_session(&self) -> Result<bool, SeedUpError> {
        self.remove().await?;
        Ok(true)
    }
}
