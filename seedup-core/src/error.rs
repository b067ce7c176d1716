use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedUpError {
    #[error("Download error: {0}")]
    Download(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Mount error: {0}")]
    Mount(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, SeedUpError>;
