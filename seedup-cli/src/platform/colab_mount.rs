use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use seedup_core::constants::DRIVE_MOUNT_MARKER;
use seedup_core::error::SeedUpError;
use seedup_core::traits::mount::MountProvider;

/// Mounts Google Drive through the Colab Python integration.
///
/// The notebook runtime owns the OAuth flow, so the mount is delegated to
/// `google.colab.drive.mount` and this call blocks until it returns.
pub struct ColabDriveMount {
    mount_root: PathBuf,
    python: String,
}

impl ColabDriveMount {
    pub fn new(mount_root: &Path) -> Self {
        Self {
            mount_root: mount_root.to_path_buf(),
            python: "python3".to_string(),
        }
    }

    fn is_mounted(&self) -> bool {
        self.mount_root.join(DRIVE_MOUNT_MARKER).exists()
    }

    fn mount_script(&self) -> String {
        format!(
            "from google.colab import drive; drive.mount({})",
            python_str(&self.mount_root.to_string_lossy())
        )
    }
}

#[async_trait]
impl MountProvider for ColabDriveMount {
    async fn ensure_mounted(&self) -> Result<(), SeedUpError> {
        if self.is_mounted() {
            debug!("Drive already mounted at {}", self.mount_root.display());
            return Ok(());
        }

        info!("Mounting Google Drive at {}", self.mount_root.display());

        let status = Command::new(&self.python)
            .arg("-c")
            .arg(self.mount_script())
            .status()
            .await
            .map_err(|e| SeedUpError::Mount(format!("failed to run {}: {e}", self.python)))?;

        if !status.success() {
            return Err(SeedUpError::Mount(format!("drive.mount exited with {status}")));
        }

        info!("Google Drive mounted");
        Ok(())
    }
}

/// Single-quoted Python string literal.
fn python_str(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}
