//! Mount providers: the Colab Drive mount and the no-op used everywhere else.

pub mod colab_mount;
pub mod no_mount;

use std::sync::Arc;

use seedup_core::traits::mount::MountProvider;

pub use colab_mount::ColabDriveMount;
pub use no_mount::NoMount;

use crate::config::Config;

/// Pick the mount provider once, from the detected host.
pub fn select(config: &Config) -> Arc<dyn MountProvider> {
    if config.colab {
        Arc::new(ColabDriveMount::new(&config.drive_root))
    } else {
        Arc::new(NoMount)
    }
}
