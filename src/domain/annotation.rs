//! Marking types for region annotations
//!
//! All marking types store coordinates in image space (the source image's
//! native pixel grid). Nothing here knows about zoom or pan.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect};

/// Which kind of marking a drawing gesture produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    /// Freehand brush stroke
    #[default]
    Brush,
    /// Axis-aligned rectangle
    Rect,
}

/// Freehand stroke: a polyline with a round brush
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Points in insertion order
    pub points: Vec<Point>,
    /// Brush radius in image pixels
    pub radius: f32,
}

impl Stroke {
    /// Line width used when rasterizing the polyline
    pub fn width(&self) -> f32 {
        self.radius * 2.0
    }
}

/// Rectangle anchored where the drag started
///
/// `width` and `height` keep the sign of the drag delta. They are only
/// normalized by [`RectMark::bounds`] when the mark is rasterized.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    pub anchor: Point,
    pub width: f32,
    pub height: f32,
}

impl RectMark {
    /// Normalized bounds with positive extents
    pub fn bounds(&self) -> Rect {
        Rect::from_anchor_size(self.anchor, self.width, self.height)
    }
}

/// A user-drawn region of interest
#[derive(Clone, Debug, PartialEq)]
pub enum Marking {
    Stroke(Stroke),
    Rect(RectMark),
}

impl Marking {
    /// Open a new marking of `kind` at `point`
    ///
    /// `radius` only applies to strokes.
    pub fn start(kind: MarkKind, point: Point, radius: f32) -> Self {
        match kind {
            MarkKind::Brush => Marking::Stroke(Stroke {
                points: vec![point],
                radius,
            }),
            MarkKind::Rect => Marking::Rect(RectMark {
                anchor: point,
                width: 0.0,
                height: 0.0,
            }),
        }
    }

    /// Kind of this marking
    pub fn kind(&self) -> MarkKind {
        match self {
            Marking::Stroke(_) => MarkKind::Brush,
            Marking::Rect(_) => MarkKind::Rect,
        }
    }

    /// Whether committing this marking would add nothing
    ///
    /// A stroke needs at least two points and a rectangle needs area.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Marking::Stroke(stroke) => stroke.points.len() < 2,
            Marking::Rect(rect) => rect.width == 0.0 || rect.height == 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_stroke() {
        let mut marking = Marking::start(MarkKind::Brush, Point::new(1.0, 1.0), 5.0);
        assert!(marking.is_degenerate());
        if let Marking::Stroke(stroke) = &mut marking {
            stroke.points.push(Point::new(2.0, 2.0));
        }
        assert!(!marking.is_degenerate());
    }

    #[test]
    fn test_degenerate_rect_needs_both_extents() {
        let flat = Marking::Rect(RectMark {
            anchor: Point::new(0.0, 0.0),
            width: 20.0,
            height: 0.0,
        });
        assert!(flat.is_degenerate());

        let negative = Marking::Rect(RectMark {
            anchor: Point::new(0.0, 0.0),
            width: -20.0,
            height: -5.0,
        });
        assert!(!negative.is_degenerate());
    }

    #[test]
    fn test_rect_bounds_normalized_only_on_request() {
        let rect = RectMark {
            anchor: Point::new(30.0, 30.0),
            width: -20.0,
            height: 10.0,
        };
        assert_eq!(rect.width, -20.0);
        let bounds = rect.bounds();
        assert_eq!((bounds.x, bounds.y, bounds.width, bounds.height), (10.0, 30.0, 20.0, 10.0));
    }
}
