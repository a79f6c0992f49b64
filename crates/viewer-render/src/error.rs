use thiserror::Error;

/// Errors surfaced by the viewer
#[derive(Debug, Error)]
pub enum ViewerError {
    /// An operation needed a camera before one was assigned
    #[error("no camera is set on the viewer")]
    CameraNotSet,

    #[error("invalid viewer configuration: {0}")]
    Config(#[from] serde_json::Error),
}
