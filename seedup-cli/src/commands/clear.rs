use tracing::error;

use seedup_core::outcome::Outcome;

use super::Context;

/// Discard any paused download session.
pub async fn run_clear(ctx: &Context) -> Outcome {
    let cleared = match ctx.sessions.clear_session().await {
        Ok(cleared) => cleared,
        Err(e) => {
            error!("Failed to clear session: {e}");
            false
        }
    };

    if cleared {
        ctx.console.line("✓ Download session cleared");
    } else {
        ctx.console.line("✗ Failed to clear session");
    }

    Outcome::from_bool(cleared)
}
