use async_trait::async_trait;
use tracing::debug;

use seedup_core::error::SeedUpError;
use seedup_core::traits::mount::MountProvider;

/// Mount provider for hosts without a notebook integration: does nothing.
pub struct NoMount;

#[async_trait]
impl MountProvider for NoMount {
    async fn ensure_mounted(&self) -> Result<(), SeedUpError> {
        debug!("Not a Colab runtime, skipping Drive mount");
        Ok(())
    }
}
