//! Asynchronous acquisition of the source image

use std::path::PathBuf;

use super::image::SourceImage;
use crate::error::{EditorError, Result};

/// Where the source image comes from
#[derive(Clone, Debug)]
pub enum ImageRef {
    /// Encoded image file on disk
    Path(PathBuf),
    /// Encoded image bytes already in memory
    Bytes(Vec<u8>),
}

/// Image reference plus the intrinsic size the caller expects, if known
#[derive(Clone, Debug)]
pub struct ImageSource {
    pub reference: ImageRef,
    pub declared_size: Option<(u32, u32)>,
}

impl ImageSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self {
            reference: ImageRef::Path(path.into()),
            declared_size: None,
        }
    }

    pub fn bytes(bytes: Vec<u8>) -> Self {
        Self {
            reference: ImageRef::Bytes(bytes),
            declared_size: None,
        }
    }

    /// Require the decoded image to have this size
    pub fn with_declared_size(mut self, width: u32, height: u32) -> Self {
        self.declared_size = Some((width, height));
        self
    }
}

/// Read and decode the source image on a blocking thread
pub async fn load(source: ImageSource) -> Result<SourceImage> {
    let ImageSource {
        reference,
        declared_size,
    } = source;

    let image = tokio::task::spawn_blocking(move || -> Result<SourceImage> {
        let bytes = match reference {
            ImageRef::Path(path) => std::fs::read(&path)
                .map_err(|e| EditorError::ImageLoad(format!("{}: {}", path.display(), e)))?,
            ImageRef::Bytes(bytes) => bytes,
        };
        SourceImage::decode(&bytes)
    })
    .await
    .map_err(|e| EditorError::ImageLoad(format!("decoder task failed: {}", e)))??;

    if let Some((width, height)) = declared_size
        && (image.width(), image.height()) != (width, height)
    {
        return Err(EditorError::ImageLoad(format!(
            "declared size {}x{} does not match decoded {}x{}",
            width,
            height,
            image.width(),
            image.height()
        )));
    }

    Ok(image)
}
