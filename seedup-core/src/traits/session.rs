use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::SeedUpError;

/// A download that was started but has not finished yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PausedSession {
    pub source: String,
    pub destination: PathBuf,
    /// Unix seconds.
    pub started_at: u64,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn has_paused_session(&self) -> Result<bool, SeedUpError>;

    /// Discard any paused session. `Ok(true)` once nothing is stored.
    async fn clear_session(&self) -> Result<bool, SeedUpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_session_json_shape() {
        let session = PausedSession {
            source: "magnet:?xt=abc".to_string(),
            destination: PathBuf::from("/content/downloads"),
            started_at: 1700000000,
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["source"], "magnet:?xt=abc");
        assert_eq!(json["destination"], "/content/downloads");
        assert_eq!(json["started_at"], 1700000000);
    }
}
