//! Google Drive uploader over the Drive v3 REST API.
//!
//! Directories are mirrored as Drive folders under the target folder; files
//! go up through a resumable session with the whole body streamed in one PUT.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{CONTENT_LENGTH, LOCATION};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use seedup_core::constants::DRIVE_FOLDER_MIME;
use seedup_core::error::SeedUpError;
use seedup_core::report::UploadReport;
use seedup_core::traits::uploader::CloudUploader;

const DRIVE_API: &str = "https://www.googleapis.com/drive/v3";
const DRIVE_UPLOAD_API: &str = "https://www.googleapis.com/upload/drive/v3";

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// A local file and the Drive folder it belongs in.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedFile {
    local: PathBuf,
    /// Path relative to the uploaded root, for reporting.
    display: String,
    parent_id: String,
}

pub struct DriveUploader {
    client: Client,
    token: String,
    api_base: String,
    upload_base: String,
}

impl DriveUploader {
    pub fn new(token: &str) -> Self {
        Self {
            client: Client::new(),
            token: token.to_string(),
            api_base: DRIVE_API.to_string(),
            upload_base: DRIVE_UPLOAD_API.to_string(),
        }
    }

    /// Id of the first non-trashed item called `name` directly under `parent_id`.
    async fn find_child(
        &self,
        name: &str,
        parent_id: &str,
        folders_only: bool,
    ) -> Result<Option<String>, SeedUpError> {
        let query = child_query(name, parent_id, folders_only);

        let resp = self
            .client
            .get(format!("{}/files", self.api_base))
            .bearer_auth(&self.token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id)"),
                ("pageSize", "1"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await
            .map_err(|e| SeedUpError::Transport(format!("Drive list request failed: {e}")))?;

        let list: FileList = check(resp, "list files")
            .await?
            .json()
            .await
            .map_err(|e| SeedUpError::Serialization(format!("invalid Drive list response: {e}")))?;

        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    /// Find or create the folder `name` under `parent_id`.
    async fn ensure_folder(&self, name: &str, parent_id: &str) -> Result<String, SeedUpError> {
        if let Some(id) = self.find_child(name, parent_id, true).await? {
            debug!("Using existing Drive folder '{name}' ({id})");
            return Ok(id);
        }

        let resp = self
            .client
            .post(format!("{}/files", self.api_base))
            .bearer_auth(&self.token)
            .query(&[("supportsAllDrives", "true"), ("fields", "id")])
            .json(&json!({
                "name": name,
                "mimeType": DRIVE_FOLDER_MIME,
                "parents": [parent_id],
            }))
            .send()
            .await
            .map_err(|e| SeedUpError::Transport(format!("Drive folder request failed: {e}")))?;

        let folder: DriveFile = check(resp, "create folder")
            .await?
            .json()
            .await
            .map_err(|e| SeedUpError::Serialization(format!("invalid Drive folder response: {e}")))?;

        info!("Created Drive folder '{name}' ({})", folder.id);
        Ok(folder.id)
    }

    /// Walk a local directory, mirroring every sub-directory on Drive, and
    /// return the files to upload with their target folder.
    async fn plan_directory(
        &self,
        root: &Path,
        root_folder_id: &str,
        report: &mut UploadReport,
    ) -> Result<Vec<PlannedFile>, SeedUpError> {
        let mut planned = Vec::new();
        let mut pending = vec![(root.to_path_buf(), root_folder_id.to_string())];

        while let Some((dir, folder_id)) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .map_err(|e| SeedUpError::Io(format!("read {} failed: {e}", dir.display())))?;

            let mut children = Vec::new();
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| SeedUpError::Io(format!("read dir entry failed: {e}")))?
            {
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| SeedUpError::Io(format!("read file type failed: {e}")))?;
                children.push((entry.path(), file_type));
            }
            children.sort_by(|a, b| a.0.cmp(&b.0));

            for (child, file_type) in children {
                let display = relative_display(root, &child);
                // Linked directories can point back up the tree.
                if file_type.is_symlink() && child.is_dir() {
                    let shown = &display;
                    warn!("Skipping symlinked directory: {shown}");
                    continue;
                }
                if file_type.is_dir() {
                    match self.ensure_folder(&file_name(&child), &folder_id).await {
                        Ok(id) => pending.push((child, id)),
                        Err(e) => report.record_failed(display, e.to_string()),
                    }
                } else {
                    planned.push(PlannedFile {
                        local: child,
                        display,
                        parent_id: folder_id.clone(),
                    });
                }
            }
        }

        Ok(planned)
    }

    async fn upload_file(&self, local: &Path, parent_id: &str) -> Result<String, SeedUpError> {
        let name = file_name(local);
        let file = tokio::fs::File::open(local)
            .await
            .map_err(|e| SeedUpError::Io(format!("open {} failed: {e}", local.display())))?;
        let size = file
            .metadata()
            .await
            .map_err(|e| SeedUpError::Io(format!("stat {} failed: {e}", local.display())))?
            .len();

        let resp = self
            .client
            .post(format!("{}/files", self.upload_base))
            .bearer_auth(&self.token)
            .query(&[("uploadType", "resumable"), ("supportsAllDrives", "true")])
            .header("X-Upload-Content-Length", size.to_string())
            .json(&json!({ "name": name, "parents": [parent_id] }))
            .send()
            .await
            .map_err(|e| SeedUpError::Transport(format!("Drive upload session request failed: {e}")))?;

        let resp = check(resp, "start upload session").await?;
        let session_url = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| SeedUpError::Upload("Drive returned no upload session URL".to_string()))?
            .to_string();

        let resp = self
            .client
            .put(session_url)
            .bearer_auth(&self.token)
            .header(CONTENT_LENGTH, size.to_string())
            .body(file)
            .send()
            .await
            .map_err(|e| SeedUpError::Transport(format!("Drive upload failed: {e}")))?;

        let uploaded: DriveFile = check(resp, "upload file")
            .await?
            .json()
            .await
            .map_err(|e| SeedUpError::Serialization(format!("invalid Drive upload response: {e}")))?;

        debug!("Uploaded {} ({size} bytes) as {}", local.display(), uploaded.id);
        Ok(uploaded.id)
    }
}

#[async_trait]
impl CloudUploader for DriveUploader {
    async fn upload(
        &self,
        path: &Path,
        folder_id: &str,
        skip_existing: bool,
    ) -> Result<UploadReport, SeedUpError> {
        if !path.exists() {
            return Err(SeedUpError::NotFound(format!("{}", path.display())));
        }

        let mut report = UploadReport::default();

        let files = if path.is_dir() {
            let root_id = self.ensure_folder(&file_name(path), folder_id).await?;
            self.plan_directory(path, &root_id, &mut report).await?
        } else {
            vec![PlannedFile {
                local: path.to_path_buf(),
                display: file_name(path),
                parent_id: folder_id.to_string(),
            }]
        };

        info!("Uploading {} file(s) to Drive folder {folder_id}", files.len());

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
                .map_err(|e| SeedUpError::Upload(format!("progress bar template error: {e}")))?
                .progress_chars("#>-"),
        );

        for file in &files {
            pb.set_message(file.display.clone());

            if skip_existing {
                match self.find_child(&file_name(&file.local), &file.parent_id, false).await {
                    Ok(Some(_)) => {
                        info!("Skipping existing file: {}", file.display);
                        report.record_skipped(&file.display);
                        pb.inc(1);
                        continue;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!("Failed: {} ({e})", file.display);
                        report.record_failed(&file.display, e.to_string());
                        pb.inc(1);
                        continue;
                    }
                }
            }

            match self.upload_file(&file.local, &file.parent_id).await {
                Ok(_) => report.record_uploaded(&file.display),
                Err(e) => {
                    warn!("Failed: {} ({e})", file.display);
                    report.record_failed(&file.display, e.to_string());
                }
            }
            pb.inc(1);
        }

        pb.finish_with_message("Upload finished");

        info!(
            "Uploaded {}, skipped {}, failed {} of {} item(s)",
            report.uploaded.len(),
            report.skipped.len(),
            report.failed.len(),
            report.total()
        );
        Ok(report)
    }
}

/// Turn a non-2xx response into an error carrying Drive's message.
async fn check(resp: Response, action: &str) -> Result<Response, SeedUpError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SeedUpError::Transport(format!("Drive {action} failed ({status}): {}", body.trim())))
}

/// Drive search query for a direct child called `name`.
fn child_query(name: &str, parent_id: &str, folders_only: bool) -> String {
    let mut query = format!(
        "name = '{}' and '{}' in parents and trashed = false",
        escape_query(name),
        escape_query(parent_id)
    );
    if folders_only {
        query.push_str(&format!(" and mimeType = '{DRIVE_FOLDER_MIME}'"));
    }
    query
}

fn escape_query(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn relative_display(root: &Path, path: &Path) -> String {
    let base = root.parent().unwrap_or(root);
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_query() {
        assert_eq!(
            child_query("movie.mkv", "abc123", false),
            "name = 'movie.mkv' and 'abc123' in parents and trashed = false"
        );
        assert_eq!(
            child_query("Season 1", "abc123", true),
            "name = 'Season 1' and 'abc123' in parents and trashed = false \
             and mimeType = 'application/vnd.google-apps.folder'"
        );
    }

    #[test]
    fn test_query_escaping() {
        assert_eq!(escape_query("it's"), r"it\'s");
        assert_eq!(escape_query(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_relative_display_keeps_root_name() {
        let root = Path::new("/content/downloads/Show");
        assert_eq!(
            relative_display(root, Path::new("/content/downloads/Show/S01/e01.mkv")),
            "Show/S01/e01.mkv"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_plan_skips_symlinked_directories() {
        let root = std::env::temp_dir().join(format!("seedup-plan-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("a.txt"), b"hello").unwrap();
        std::os::unix::fs::symlink(&root, root.join("loop")).unwrap();

        // No sub-directories to mirror, so nothing reaches the network.
        let uploader = DriveUploader::new("token");
        let mut report = UploadReport::default();
        let planned = uploader.plan_directory(&root, "root-id", &mut report).await.unwrap();

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].local, root.join("a.txt"));
        assert_eq!(planned[0].parent_id, "root-id");
        assert_eq!(report.total(), 0);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn test_missing_path_is_an_error() {
        let uploader = DriveUploader::new("token");
        let result = uploader
            .upload(Path::new("/missing/seedup/path"), "abc123", true)
            .await;
        assert!(matches!(result, Err(SeedUpError::NotFound(_))));
    }
}
