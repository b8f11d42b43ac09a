use thiserror::Error;

/// Terminal failures of a single `compress_image` call.
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("File read failed: {0}")]
    Read(#[from] std::io::Error),

    #[error("Image load failed: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Canvas compression failed: {0}")]
    Encode(String),

    #[error("Image task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] toml_edit::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
