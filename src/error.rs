//! Error type shared by the editor modules

use thiserror::Error;

/// Failures surfaced to callers of the editor
///
/// Degenerate markings are not errors; the model drops them quietly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// The source image could not be read or decoded
    #[error("failed to load image: {0}")]
    ImageLoad(String),
    /// The export raster could not be allocated
    #[error("failed to export markings: {0}")]
    Export(String),
    /// The display surface could not be allocated
    #[error("failed to render: {0}")]
    Render(String),
    /// The source image has not finished loading
    #[error("image is still loading")]
    NotReady,
    /// The session was saved, cancelled, or its task has stopped
    #[error("editor session is closed")]
    SessionClosed,
    /// Config file could not be read, parsed or written
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EditorError>;
