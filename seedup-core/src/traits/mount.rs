use async_trait::async_trait;
use crate::error::SeedUpError;

/// Makes cloud storage reachable as a local path, where the host supports it.
#[async_trait]
pub trait MountProvider: Send + Sync {
    /// Mount if needed and block until the mount is usable. Must be safe to
    /// call repeatedly.
    async fn ensure_mounted(&self) -> Result<(), SeedUpError>;
}
