//! Source image acquisition
//!
//! This module consolidates:
//! - Source image type (image.rs)
//! - Async loading from a path or bytes (loader.rs)

pub mod image;
pub mod loader;

pub use self::image::SourceImage;
pub use loader::{ImageRef, ImageSource, load};
