//! Shared geometry for markings
//!
//! Path construction used by both the display renderer and the exporter,
//! so a marking covers the same image pixels on screen and in the export.

use tiny_skia::{LineCap, LineJoin, Path, PathBuilder, Stroke as SkStroke};

use crate::domain::{Point, RectMark, Stroke};

/// Marker colour understood downstream as "region to replace" (opaque)
pub const MARKER_RGBA: [u8; 4] = [239, 68, 68, 255];

/// Build the polyline for a brush stroke
///
/// Returns None for strokes with fewer than two points.
pub fn stroke_path(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.finish()
}

/// Round-capped stroke style of the given width
pub fn brush_style(width: f32) -> SkStroke {
    SkStroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

/// Style for a stroke in image units
pub fn stroke_style(stroke: &Stroke) -> SkStroke {
    brush_style(stroke.width())
}

/// Normalized rectangle for filling, None if it covers no area
pub fn rect_bounds(rect: &RectMark) -> Option<tiny_skia::Rect> {
    let bounds = rect.bounds();
    if bounds.is_empty() {
        return None;
    }
    tiny_skia::Rect::from_xywh(bounds.x, bounds.y, bounds.width, bounds.height)
}
