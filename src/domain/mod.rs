//! Pure domain types with minimal dependencies
//!
//! This module contains the coordinate math and marking data shared by the
//! model, the controller and both renderers. Nothing here depends on the
//! session or on how pixels are produced.

pub mod annotation;
pub mod geometry;
pub mod viewport;

pub use annotation::*;
pub use geometry::*;
pub use viewport::*;
