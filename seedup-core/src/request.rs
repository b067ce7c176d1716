//! Parsed command requests, one variant per subcommand.

use std::path::{Path, PathBuf};

/// A fully parsed invocation. Built once from the command line and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Download(DownloadRequest),
    Upload(UploadRequest),
    Status,
    Clear,
}

impl Request {
    /// Subcommand name, used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Request::Download(_) => "download",
            Request::Upload(_) => "upload",
            Request::Status => "status",
            Request::Clear => "clear",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Magnet link, URL or path to a `.torrent` file.
    pub source: String,
    pub destination: PathBuf,
    /// Continue a paused session instead of starting over.
    pub resume: bool,
    /// Upload the result once the download finishes.
    pub upload_after: bool,
    pub folder_id: Option<String>,
    pub skip_existing: bool,
}

impl DownloadRequest {
    /// Folder to upload into when upload-after-download was requested.
    ///
    /// Returns `None` both when no upload was asked for and when the folder id
    /// is missing; use [`DownloadRequest::missing_folder_id`] to tell them apart.
    pub fn upload_folder(&self) -> Option<&str> {
        if !self.upload_after {
            return None;
        }
        self.folder_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Upload-after-download was requested without a usable folder id.
    pub fn missing_folder_id(&self) -> bool {
        self.upload_after && self.upload_folder().is_none()
    }

    /// Whether the destination lives under the given mount root.
    pub fn writes_under(&self, root: &Path) -> bool {
        self.destination.starts_with(root)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub folder_id: String,
    pub skip_existing: bool,
}
