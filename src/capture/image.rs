//! Source image type for an editor session

use image::RgbaImage;

use crate::domain::Size;
use crate::error::{EditorError, Result};

/// The decoded image being marked, kept at its native resolution
#[derive(Clone, Debug, PartialEq)]
pub struct SourceImage {
    pub rgba: RgbaImage,
}

impl SourceImage {
    /// Wrap an already decoded image
    pub fn new(rgba: RgbaImage) -> Self {
        log::debug!(
            "SourceImage ready: {}x{} pixels",
            rgba.width(),
            rgba.height()
        );
        Self { rgba }
    }

    /// Decode an encoded image (PNG, JPEG, ...) from memory
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| EditorError::ImageLoad(e.to_string()))?;
        Ok(Self::new(decoded.to_rgba8()))
    }

    /// Get the width of the image
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Get the height of the image
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Native size as floating point extents
    pub fn size(&self) -> Size {
        Size::from_pixels(self.width(), self.height())
    }

    /// Premultiplied copy for drawing onto a tiny-skia surface
    pub(crate) fn to_pixmap(&self) -> Option<tiny_skia::Pixmap> {
        let mut pixmap = tiny_skia::Pixmap::new(self.width(), self.height())?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(self.rgba.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Some(pixmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_garbage() {
        let err = SourceImage::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, EditorError::ImageLoad(_)));
    }

    #[test]
    fn test_decode_png() {
        let img = RgbaImage::from_pixel(7, 3, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let source = SourceImage::decode(&bytes).unwrap();
        assert_eq!((source.width(), source.height()), (7, 3));
        assert_eq!(source.rgba, img);
    }

    #[test]
    fn test_to_pixmap_premultiplies() {
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([200, 100, 50, 128]));
        let pixmap = SourceImage::new(img).to_pixmap().unwrap();
        let px = pixmap.pixels()[0];
        assert_eq!(px.alpha(), 128);
        assert!(px.red() <= 128);
    }
}
