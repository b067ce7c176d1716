use tracing::{error, info};

use seedup_core::error::SeedUpError;
use seedup_core::outcome::Outcome;
use seedup_core::request::DownloadRequest;

use super::{upload_and_report, Context};

/// Download a torrent and, when asked, upload the result to Drive.
///
/// Precondition and collaborator failures come back as `Outcome::Failure`;
/// only mount and local engine faults surface as `Err`.
pub async fn run_download(ctx: &Context, req: &DownloadRequest) -> Result<Outcome, SeedUpError> {
    ctx.console.banner("TORRENT DOWNLOADER");

    // A resumed download may go somewhere other than the requested path.
    let target = ctx
        .downloader
        .target_destination(&req.source, &req.destination, req.resume)
        .await?;

    if req.writes_under(&ctx.drive_root) || target.starts_with(&ctx.drive_root) {
        ctx.mount.ensure_mounted().await?;
    }

    if req.missing_folder_id() {
        error!("--folder-id is required when using --upload");
        return Ok(Outcome::Failure);
    }

    info!("Starting download: {}", req.source);

    let downloaded = ctx
        .downloader
        .download(&req.source, &req.destination, req.resume)
        .await?;

    let Some(downloaded) = downloaded else {
        error!("Download failed or cancelled");
        return Ok(Outcome::Failure);
    };

    info!("Download completed: {}", downloaded.display());

    let Some(folder_id) = req.upload_folder() else {
        return Ok(Outcome::Success);
    };

    ctx.mount.ensure_mounted().await?;

    ctx.console.line("");
    ctx.console.banner("UPLOADING TO GOOGLE DRIVE");

    Ok(upload_and_report(ctx, &downloaded, folder_id, req.skip_existing).await)
}
