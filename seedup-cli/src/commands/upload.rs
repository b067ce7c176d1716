use tracing::error;

use seedup_core::error::SeedUpError;
use seedup_core::outcome::Outcome;
use seedup_core::request::UploadRequest;

use super::{upload_and_report, Context};

/// Upload an existing local file or directory to a Drive folder.
pub async fn run_upload(ctx: &Context, req: &UploadRequest) -> Result<Outcome, SeedUpError> {
    ctx.console.banner("GOOGLE DRIVE UPLOADER");

    // The path may live on Drive itself, so mount before looking at it.
    ctx.mount.ensure_mounted().await?;

    if !req.path.exists() {
        error!("Path does not exist: {}", req.path.display());
        return Ok(Outcome::Failure);
    }

    Ok(upload_and_report(ctx, &req.path, &req.folder_id, req.skip_existing).await)
}
