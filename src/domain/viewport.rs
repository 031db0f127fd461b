//! Viewport transform between image space and screen space
//!
//! `screen = image * scale + offset`. The transform is a plain value owned
//! by the editor session; changing it never touches stored markings.

use super::geometry::{Point, Size};

/// Smallest allowed display scale
pub const MIN_SCALE: f32 = 0.1;
/// Largest allowed display scale
pub const MAX_SCALE: f32 = 10.0;

/// Scale and offset of the displayed image
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    scale: f32,
    offset: Point,
    min_scale: f32,
    max_scale: f32,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::default(),
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

impl ViewportTransform {
    /// Identity transform with the default scale limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity transform with custom scale limits
    ///
    /// Invalid limits (non-positive, non-finite or inverted) fall back to the defaults.
    pub fn with_limits(min_scale: f32, max_scale: f32) -> Self {
        let valid = min_scale.is_finite()
            && max_scale.is_finite()
            && min_scale > 0.0
            && min_scale <= max_scale;
        if !valid {
            log::warn!(
                "Ignoring invalid scale limits [{}, {}], using defaults",
                min_scale,
                max_scale
            );
            return Self::default();
        }
        Self {
            scale: 1.0_f32.clamp(min_scale, max_scale),
            offset: Point::default(),
            min_scale,
            max_scale,
        }
    }

    /// Current scale (screen pixels per image pixel)
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Current offset of the image origin in screen space
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Scale limits as (min, max)
    pub fn limits(&self) -> (f32, f32) {
        (self.min_scale, self.max_scale)
    }

    /// Scale as a rounded percentage for display
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    /// Map an image-space point to screen space
    pub fn to_screen(&self, image: Point) -> Point {
        image * self.scale + self.offset
    }

    /// Map a screen-space point to image space
    pub fn to_image(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    /// Zoom by `factor` keeping the image point under `anchor` in place
    pub fn zoom_at(&mut self, anchor: Point, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        let ratio = new_scale / self.scale;
        self.offset = anchor - (anchor - self.offset) * ratio;
        self.scale = new_scale;
    }

    /// Translate the image by a screen-space delta
    pub fn pan_by(&mut self, delta: Point) {
        if delta.x.is_finite() && delta.y.is_finite() {
            self.offset = self.offset + delta;
        }
    }

    /// Fit the image inside the container without upscaling, centered
    pub fn fit_to_container(&mut self, image: Size, container: Size) {
        if !image.is_drawable() || !container.is_drawable() {
            return;
        }
        let scale = (container.width / image.width)
            .min(container.height / image.height)
            .min(1.0)
            .clamp(self.min_scale, self.max_scale);
        self.scale = scale;
        self.offset = Point::new(
            (container.width - image.width * scale) / 2.0,
            (container.height - image.height * scale) / 2.0,
        );
    }

    /// Transform for tiny-skia drawing of image-space geometry
    pub fn to_skia(&self) -> tiny_skia::Transform {
        tiny_skia::Transform::from_row(self.scale, 0.0, 0.0, self.scale, self.offset.x, self.offset.y)
    }
}
