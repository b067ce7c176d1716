use std::env;
use std::path::PathBuf;

use seedup_core::constants::{
    DEFAULT_DOWNLOAD_DIR, DEFAULT_DRIVE_ROOT, DEFAULT_STATE_DIR, SESSION_FILE_NAME,
};

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where `download` writes when `--destination` is not given.
    pub download_dir: PathBuf,
    /// Directory holding the paused-session record.
    pub state_dir: PathBuf,
    /// Mount point of Google Drive.
    pub drive_root: PathBuf,
    /// OAuth access token for the Drive API. No token, no uploader.
    pub drive_token: Option<String>,
    /// Set when running inside a Colab runtime.
    pub colab: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `SEEDUP_DOWNLOAD_DIR` (optional, default `/content/downloads`)
    /// - `SEEDUP_STATE_DIR` (optional, default `.seedup`)
    /// - `SEEDUP_DRIVE_ROOT` (optional, default `/content/drive`)
    /// - `SEEDUP_DRIVE_TOKEN` (optional): Drive API access token.
    /// - `COLAB_RELEASE_TAG`: exported by every Colab runtime.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let download_dir = non_empty("SEEDUP_DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR));

        let state_dir = non_empty("SEEDUP_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));

        let drive_root = non_empty("SEEDUP_DRIVE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DRIVE_ROOT));

        Self {
            download_dir,
            state_dir,
            drive_root,
            drive_token: non_empty("SEEDUP_DRIVE_TOKEN"),
            colab: lookup("COLAB_RELEASE_TAG").is_some(),
        }
    }

    pub fn session_path(&self) -> PathBuf {
        self.state_dir.join(SESSION_FILE_NAME)
    }
}
