//! Export rendering using tiny-skia
//!
//! Rasterizes committed markings onto a native-resolution copy of the source
//! image. The viewport plays no part here.

use std::io;

use image::RgbaImage;
use tiny_skia::{IntSize, Paint, Pixmap, Transform};

use super::geometry::{self, MARKER_RGBA};
use crate::capture::SourceImage;
use crate::domain::Marking;
use crate::error::{EditorError, Result};

/// Rasterized export at source resolution
#[derive(Clone, Debug, PartialEq)]
pub struct ExportedImage {
    pub rgba: RgbaImage,
}

impl ExportedImage {
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Encode as 8-bit RGBA PNG
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        write_png(&mut bytes, &self.rgba).map_err(|e| EditorError::Export(e.to_string()))?;
        Ok(bytes)
    }

    pub fn into_inner(self) -> RgbaImage {
        self.rgba
    }
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> std::result::Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

/// Copy the source bytes, reporting allocation failure instead of aborting
fn copy_raster(source: &SourceImage) -> Result<Vec<u8>> {
    let raw = source.rgba.as_raw();
    let mut data = Vec::new();
    data.try_reserve_exact(raw.len()).map_err(|e| {
        EditorError::Export(format!(
            "cannot allocate {}x{} raster: {}",
            source.width(),
            source.height(),
            e
        ))
    })?;
    data.extend_from_slice(raw);
    Ok(data)
}

fn marker_paint() -> Paint<'static> {
    let [r, g, b, a] = MARKER_RGBA;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    // Hard edges keep every marked pixel exactly the marker colour
    paint.anti_alias = false;
    paint
}

/// Draw markings in order with the marker colour, in image coordinates
///
/// Pixels no marking covers keep their exact bytes.
pub fn draw_markings(pixmap: &mut Pixmap, markings: &[Marking]) {
    let paint = marker_paint();
    for marking in markings {
        match marking {
            Marking::Stroke(stroke) => {
                if let Some(path) = geometry::stroke_path(&stroke.points) {
                    pixmap.stroke_path(
                        &path,
                        &paint,
                        &geometry::stroke_style(stroke),
                        Transform::identity(),
                        None,
                    );
                }
            }
            Marking::Rect(rect) => {
                if let Some(bounds) = geometry::rect_bounds(rect) {
                    pixmap.fill_rect(bounds, &paint, Transform::identity(), None);
                }
            }
        }
    }
}

/// Export committed markings over an untouched copy of the source image
///
/// The source raster is copied exactly once.
pub fn export(source: &SourceImage, committed: &[Marking]) -> Result<ExportedImage> {
    let (width, height) = (source.width(), source.height());
    let size = IntSize::from_wh(width, height).ok_or_else(|| {
        EditorError::Export(format!("invalid raster size {}x{}", width, height))
    })?;

    let data = copy_raster(source)?;
    let data = if committed.is_empty() {
        data
    } else {
        let mut pixmap = Pixmap::from_vec(data, size).ok_or_else(|| {
            EditorError::Export(format!("cannot allocate {}x{} raster", width, height))
        })?;
        draw_markings(&mut pixmap, committed);
        pixmap.take()
    };
    let rgba = RgbaImage::from_raw(width, height, data).ok_or_else(|| {
        EditorError::Export(format!("raster does not match {}x{}", width, height))
    })?;

    log::debug!(
        "Exported {} markings at {}x{}",
        committed.len(),
        width,
        height
    );
    Ok(ExportedImage { rgba })
}
