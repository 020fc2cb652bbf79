// File: crates/progress-core/src/error.rs
// Summary: Library error type; every failure is terminal for the render pass.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ChartError>;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Per-user arrays do not line up with the shared date axis.
    #[error("data shape mismatch: {0}")]
    DataShape(String),

    /// The drawing target (window surface, raster surface, output location) is unavailable.
    #[error("no mount point: {0}")]
    MountPoint(String),

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl ChartError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        ChartError::DataShape(msg.into())
    }
}
