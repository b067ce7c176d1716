use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use crate::error::SeedUpError;
use crate::report::UploadReport;

#[async_trait]
pub trait CloudUploader: Send + Sync {
    /// Upload the file or directory at `path` into the folder `folder_id`.
    ///
    /// With `skip_existing`, items already present in the target folder are
    /// reported as skipped rather than transferred again.
    async fn upload(
        &self,
        path: &Path,
        folder_id: &str,
        skip_existing: bool,
    ) -> Result<UploadReport, SeedUpError>;
}

/// The uploader as wired at startup: either ready to use or explicitly
/// missing, with the reason kept for the error message.
#[derive(Clone)]
pub enum UploaderSlot {
    Available(Arc<dyn CloudUploader>),
    Unavailable { reason: String },
}

impl UploaderSlot {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        UploaderSlot::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn get(&self) -> Result<&Arc<dyn CloudUploader>, SeedUpError> {
        match self {
            UploaderSlot::Available(uploader) => Ok(uploader),
            UploaderSlot::Unavailable { reason } => Err(SeedUpError::Config(reason.clone())),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, UploaderSlot::Available(_))
    }
}
