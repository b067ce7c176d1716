//! Log handle construction.
//!
//! The dispatcher receives its `Dispatch` explicitly and attaches it to the
//! command future, so nothing installs a process-wide subscriber.

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

/// Build the console log handle (controlled by `RUST_LOG`, default `info`).
pub fn console_dispatch() -> Dispatch {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    Dispatch::new(subscriber)
}
