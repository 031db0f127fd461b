//! Marking rendering module
//!
//! This module contains:
//! - Geometry shared between screen and export rendering
//! - Display rendering using tiny-skia (interactive view, viewport applied)
//! - Image rendering using tiny-skia (export at native resolution)

pub mod display;
pub mod geometry;
pub mod image;

pub use display::Renderer;
pub use self::image::{ExportedImage, export};
