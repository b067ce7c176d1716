//! What the upload collaborator hands back.

/// An item the uploader could not transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    pub path: String,
    pub reason: String,
}

/// Per-item results of one upload run.
///
/// Only `failed` drives the exit code: a single failure fails the command
/// no matter how many items went through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub uploaded: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<FailedItem>,
}

impl UploadReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn record_uploaded(&mut self, path: impl Into<String>) {
        self.uploaded.push(path.into());
    }

    pub fn record_skipped(&mut self, path: impl Into<String>) {
        self.skipped.push(path.into());
    }

    pub fn record_failed(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.failed.push(FailedItem {
            path: path.into(),
            reason: reason.into(),
        });
    }

    /// Total number of items the uploader looked at.
    pub fn total(&self) -> usize {
        self.uploaded.len() + self.skipped.len() + self.failed.len()
    }
}
