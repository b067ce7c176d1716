use tracing::warn;

use seedup_core::outcome::Outcome;

use super::Context;

/// Report whether a paused download session exists. Never fails.
pub async fn run_status(ctx: &Context) -> Outcome {
    let paused = match ctx.sessions.has_paused_session().await {
        Ok(paused) => paused,
        Err(e) => {
            warn!("Could not read session state: {e}");
            false
        }
    };

    if paused {
        ctx.console.line("✓ Found paused download session");
    } else {
        ctx.console.line("✗ No paused download session found");
    }

    Outcome::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::*;

    #[tokio::test]
    async fn test_paused_session_found() {
        let h = harness(
            FakeDownloader::returning(None),
            None,
            FakeSessions { paused: true, clear_result: Ok(true) },
        );

        assert_eq!(run_status(&h.ctx).await, Outcome::Success);
        assert_eq!(h.stdout.contents(), "✓ Found paused download session\n");
    }

    #[tokio::test]
    async fn test_no_paused_session() {
        let h = harness(FakeDownloader::returning(None), None, no_sessions());

        assert_eq!(run_status(&h.ctx).await, Outcome::Success);
        assert_eq!(h.stdout.contents(), "✗ No paused download session found\n");
        assert_eq!(h.downloader.call_count(), 0);
    }
}
