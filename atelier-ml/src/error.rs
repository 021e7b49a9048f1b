use std::path::PathBuf;

/// Failure taxonomy of the style-transfer core.
///
/// Every pipeline stage fails fast with exactly one of these; nothing is
/// retried and nothing is recovered internally. The calling layer decides
/// what to show the user.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown style {0:?}")]
    UnknownStyle(String),

    #[error("missing model artifact at {}", .path.display())]
    ArtifactMissing { path: PathBuf },

    #[error("failed to load model from {}: {source}", .path.display())]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("inference failed: {0}")]
    Inference(#[source] anyhow::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("transfer cancelled before the forward pass")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
