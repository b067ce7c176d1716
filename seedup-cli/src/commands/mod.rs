//! Command handlers (download, upload, status, clear) and the wiring they share.

pub mod download;
pub mod upload;
pub mod status;
pub mod clear;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use seedup_core::outcome::Outcome;
use seedup_core::traits::downloader::TorrentDownloader;
use seedup_core::traits::mount::MountProvider;
use seedup_core::traits::session::SessionStore;
use seedup_core::traits::uploader::UploaderSlot;

use crate::config::Config;
use crate::console::Console;
use crate::engine::RqbitDownloader;
use crate::platform;
use crate::storage::SessionFile;
use crate::transport::DriveUploader;

/// Everything a handler may call, built once at startup.
pub struct Context {
    pub drive_root: PathBuf,
    pub downloader: Arc<dyn TorrentDownloader>,
    pub sessions: Arc<dyn SessionStore>,
    pub uploader: UploaderSlot,
    pub mount: Arc<dyn MountProvider>,
    pub console: Console,
}

impl Context {
    /// Wire the real collaborators from configuration.
    pub fn from_config(config: &Config) -> Self {
        let sessions = Arc::new(SessionFile::new(&config.session_path()));

        let uploader = match config.drive_token.as_deref() {
            Some(token) => UploaderSlot::Available(Arc::new(DriveUploader::new(token))),
            None => UploaderSlot::unavailable("SEEDUP_DRIVE_TOKEN is not set"),
        };
        debug!("Drive uploader available: {}", uploader.is_available());

        Self {
            drive_root: config.drive_root.clone(),
            downloader: Arc::new(RqbitDownloader::new(sessions.clone())),
            sessions,
            uploader,
            mount: platform::select(config),
            console: Console::stdout(),
        }
    }
}

/// Upload `path` and reduce the result to an outcome.
///
/// Uploader errors stop here: they are logged and become `Failure`.
pub async fn upload_and_report(
    ctx: &Context,
    path: &Path,
    folder_id: &str,
    skip_existing: bool,
) -> Outcome {
    let uploader = match ctx.uploader.get() {
        Ok(uploader) => uploader,
        Err(e) => {
            error!("Uploader unavailable: {e}");
            ctx.console.banner("ERROR: Google Drive uploader is not configured");
            ctx.console.line("Export a Drive API access token before uploading:");
            ctx.console.line("  export SEEDUP_DRIVE_TOKEN=<oauth access token>");
            return Outcome::Failure;
        }
    };

    match uploader.upload(path, folder_id, skip_existing).await {
        Ok(report) if report.has_failures() => {
            for item in &report.failed {
                warn!("Failed: {} ({})", item.path, item.reason);
            }
            warn!("Some files failed ({})", report.failed.len());
            Outcome::Failure
        }
        Ok(_) => {
            info!("Upload completed successfully!");
            Outcome::Success
        }
        Err(e) => {
            error!("Upload failed: {e}");
            Outcome::Failure
        }
    }
}

#[cfg(test)]
pub mod testing {
    //! Recording fakes for the collaborator traits.

    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use seedup_core::error::SeedUpError;
    use seedup_core::report::UploadReport;
    use seedup_core::traits::downloader::TorrentDownloader;
    use seedup_core::traits::mount::MountProvider;
    use seedup_core::traits::session::SessionStore;
    use seedup_core::traits::uploader::{CloudUploader, UploaderSlot};

    use super::Context;
    use crate::console::Console;
    use crate::logging::capture::Captured;

    pub struct FakeDownloader {
        pub result: Option<PathBuf>,
        pub calls: Mutex<Vec<(String, PathBuf, bool)>>,
    }

    impl FakeDownloader {
        pub fn returning(result: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                result: result.map(PathBuf::from),
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TorrentDownloader for FakeDownloader {
        async fn download(
            &self,
            source: &str,
            destination: &Path,
            resume: bool,
        ) -> Result<Option<PathBuf>, SeedUpError> {
            self.calls
                .lock()
                .unwrap()
                .push((source.to_string(), destination.to_path_buf(), resume));
            Ok(self.result.clone())
        }
    }

    pub enum UploadBehavior {
        Report(UploadReport),
        Error,
        Panic,
    }

    pub struct FakeUploader {
        pub behavior: UploadBehavior,
        pub calls: Mutex<Vec<(PathBuf, String, bool)>>,
    }

    impl FakeUploader {
        pub fn new(behavior: UploadBehavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn succeeding() -> Arc<Self> {
            let mut report = UploadReport::default();
            report.record_uploaded("file.iso");
            Self::new(UploadBehavior::Report(report))
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CloudUploader for FakeUploader {
        async fn upload(
            &self,
            path: &Path,
            folder_id: &str,
            skip_existing: bool,
        ) -> Result<UploadReport, SeedUpError> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_path_buf(), folder_id.to_string(), skip_existing));
            match &self.behavior {
                UploadBehavior::Report(report) => Ok(report.clone()),
                UploadBehavior::Error => Err(SeedUpError::Transport("connection reset".to_string())),
                UploadBehavior::Panic => panic!("uploader exploded"),
            }
        }
    }

    pub struct FakeSessions {
        pub paused: bool,
        pub clear_result: Result<bool, String>,
    }

    #[async_trait]
    impl SessionStore for FakeSessions {
        async fn has_paused_session(&self) -> Result<bool, SeedUpError> {
            Ok(self.paused)
        }

        async fn clear_session(&self) -> Result<bool, SeedUpError> {
            self.clear_result.clone().map_err(SeedUpError::Session)
        }
    }

    #[derive(Default)]
    pub struct CountingMount {
        pub calls: AtomicUsize,
    }

    impl CountingMount {
        pub fn count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MountProvider for CountingMount {
        async fn ensure_mounted(&self) -> Result<(), SeedUpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    pub struct Harness {
        pub ctx: Context,
        pub downloader: Arc<FakeDownloader>,
        pub uploader: Option<Arc<FakeUploader>>,
        pub mount: Arc<CountingMount>,
        pub stdout: Captured,
    }

    pub fn harness(
        downloader: Arc<FakeDownloader>,
        uploader: Option<Arc<FakeUploader>>,
        sessions: FakeSessions,
    ) -> Harness {
        let mount = Arc::new(CountingMount::default());
        let stdout = Captured::default();
        let slot = match &uploader {
            Some(u) => UploaderSlot::Available(u.clone()),
            None => UploaderSlot::unavailable("SEEDUP_DRIVE_TOKEN is not set"),
        };

        let ctx = Context {
            drive_root: PathBuf::from("/content/drive"),
            downloader: downloader.clone(),
            sessions: Arc::new(sessions),
            uploader: slot,
            mount: mount.clone(),
            console: Console::new(Box::new(stdout.clone())),
        };

        Harness {
            ctx,
            downloader,
            uploader,
            mount,
            stdout,
        }
    }

    pub fn no_sessions() -> FakeSessions {
        FakeSessions {
            paused: false,
            clear_result: Ok(true),
        }
    }
}
