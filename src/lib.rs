//! Interactive region marking on raster images
//!
//! A session shows a source image under a pan/zoom viewport, records
//! brush strokes and rectangles in image coordinates, and exports them
//! onto a copy of the source at its native resolution.

pub mod annotations;
pub mod capture;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod session;

pub use error::{EditorError, Result};
