mod commands;
mod config;
mod console;
mod engine;
mod logging;
mod platform;
mod storage;
mod transport;

use std::any::Any;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use tracing::instrument::WithSubscriber;
use tracing::{debug, error};

use seedup_core::constants::EXIT_FAILURE;
use seedup_core::error::SeedUpError;
use seedup_core::outcome::Outcome;
use seedup_core::request::{DownloadRequest, Request, UploadRequest};

use crate::commands::Context;
use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "seedup",
    about = "Download torrents and upload them to Google Drive (Colab-optimized)"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a torrent
    Download {
        /// Magnet link, torrent URL or path to a .torrent file
        #[arg(short = 't', long)]
        torrent: String,

        /// Destination directory. Defaults to SEEDUP_DOWNLOAD_DIR.
        #[arg(short = 'd', long)]
        destination: Option<PathBuf>,

        /// Start over instead of resuming a paused download
        #[arg(long)]
        no_resume: bool,

        /// Upload the downloaded files to Google Drive
        #[arg(long)]
        upload: bool,

        /// Drive folder ID to upload into (required with --upload)
        #[arg(short = 'f', long)]
        folder_id: Option<String>,

        /// Re-upload files that already exist in the folder
        #[arg(long)]
        no_skip: bool,
    },

    /// Upload files to Google Drive
    Upload {
        /// File or directory to upload
        #[arg(short = 'p', long)]
        path: PathBuf,

        /// Drive folder ID to upload into
        #[arg(short = 'f', long)]
        folder_id: String,

        /// Re-upload files that already exist in the folder
        #[arg(long)]
        no_skip: bool,
    },

    /// Show whether a paused download session exists
    Status,

    /// Discard the paused download session
    Clear,
}

impl Commands {
    fn into_request(self, default_download_dir: &Path) -> Request {
        match self {
            Commands::Download {
                torrent,
                destination,
                no_resume,
                upload,
                folder_id,
                no_skip,
            } => Request::Download(DownloadRequest {
                source: torrent,
                destination: destination.unwrap_or_else(|| default_download_dir.to_path_buf()),
                resume: !no_resume,
                upload_after: upload,
                folder_id,
                skip_existing: !no_skip,
            }),
            Commands::Upload {
                path,
                folder_id,
                no_skip,
            } => Request::Upload(UploadRequest {
                path,
                folder_id,
                skip_existing: !no_skip,
            }),
            Commands::Status => Request::Status,
            Commands::Clear => Request::Clear,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        eprintln!("Error: No command specified\n");
        let _ = Cli::command().print_help();
        std::process::exit(EXIT_FAILURE);
    };

    install_panic_hook();

    let config = Config::from_env();
    let request = command.into_request(&config.download_dir);
    let ctx = Arc::new(Context::from_config(&config));

    let interrupt = async {
        // Without a signal handler there is nothing to wait for.
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let outcome = run(request, ctx, interrupt)
        .with_subscriber(logging::console_dispatch())
        .await;

    std::process::exit(outcome.exit_code());
}

/// Run one request to completion, or until `interrupt` resolves.
///
/// Every way a handler can end is reduced to an `Outcome` here: returned
/// errors and panics are logged as failures, an interrupt aborts the handler.
async fn run<F>(request: Request, ctx: Arc<Context>, interrupt: F) -> Outcome
where
    F: Future<Output = ()>,
{
    let name = request.name();
    debug!("Dispatching {name}");

    let mut task = tokio::spawn(dispatch(request, ctx.clone()).with_current_subscriber());

    tokio::select! {
        joined = &mut task => match joined {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                error!("Operation failed: {e}");
                debug!("{name} error detail: {e:?}");
                Outcome::Failure
            }
            Err(e) if e.is_panic() => {
                error!("Operation failed: {name} panicked: {}", panic_message(e.into_panic()));
                Outcome::Failure
            }
            Err(e) => {
                error!("Operation failed: {e}");
                Outcome::Failure
            }
        },
        _ = interrupt => {
            task.abort();
            ctx.console.line("\nOperation cancelled by user");
            Outcome::Interrupted
        }
    }
}

async fn dispatch(request: Request, ctx: Arc<Context>) -> Result<Outcome, SeedUpError> {
    match &request {
        Request::Download(req) => commands::download::run_download(&ctx, req).await,
        Request::Upload(req) => commands::upload::run_upload(&ctx, req).await,
        Request::Status => Ok(commands::status::run_status(&ctx).await),
        Request::Clear => Ok(commands::clear::run_clear(&ctx).await),
    }
}

/// Route panic reports through the active log handle instead of raw stderr.
///
/// `run` reports the failure itself once the handler task is joined; the hook
/// only keeps the location for diagnosis.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        debug!("Panic at {location}: {}", payload_message(info.payload()));
    }));
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload_message(&*payload)
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
