//! Display rendering for the interactive view
//!
//! Draws the source image and all markings onto a container-sized surface
//! under the current viewport transform. Colours here are cosmetic only.

use tiny_skia::{Color, FilterQuality, Paint, Pixmap, PixmapPaint};

use super::geometry;
use crate::annotations::MarkingModel;
use crate::capture::SourceImage;
use crate::config::{EditorConfig, MarkColor};
use crate::domain::{Marking, Size, ViewportTransform};
use crate::error::{EditorError, Result};

/// Owns the display surface and redraws it on demand
pub struct Renderer {
    surface: Pixmap,
    source: Pixmap,
    highlight: MarkColor,
    background: MarkColor,
    frames: u64,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("surface", &(self.surface.width(), self.surface.height()))
            .field("source", &(self.source.width(), self.source.height()))
            .field("frames", &self.frames)
            .finish()
    }
}

fn allocate_surface(container: Size) -> Result<Pixmap> {
    if !container.is_drawable() {
        return Err(EditorError::Render(format!(
            "invalid container size {}x{}",
            container.width, container.height
        )));
    }
    let width = container.width.ceil() as u32;
    let height = container.height.ceil() as u32;
    Pixmap::new(width, height).ok_or_else(|| {
        EditorError::Render(format!("cannot allocate {}x{} surface", width, height))
    })
}

fn to_skia_color(color: MarkColor) -> Color {
    let [r, g, b, a] = color.to_rgba_u8();
    Color::from_rgba8(r, g, b, a)
}

impl Renderer {
    /// Create a renderer for `source` shown in a container of the given size
    pub fn new(source: &SourceImage, container: Size, config: &EditorConfig) -> Result<Self> {
        let surface = allocate_surface(container)?;
        let source = source.to_pixmap().ok_or_else(|| {
            EditorError::Render(format!(
                "cannot allocate {}x{} source copy",
                source.width(),
                source.height()
            ))
        })?;
        Ok(Self {
            surface,
            source,
            highlight: config.highlight_color,
            background: config.background_color,
            frames: 0,
        })
    }

    /// Reallocate the surface for a new container size
    pub fn resize(&mut self, container: Size) -> Result<()> {
        self.surface = allocate_surface(container)?;
        Ok(())
    }

    /// The last rendered frame
    pub fn surface(&self) -> &Pixmap {
        &self.surface
    }

    /// Number of completed render passes
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Redraw everything from the current viewport and markings
    pub fn render(&mut self, viewport: &ViewportTransform, model: &MarkingModel) {
        let transform = viewport.to_skia();

        self.surface.fill(to_skia_color(self.background));

        let quality = if viewport.scale() >= 1.0 {
            FilterQuality::Nearest
        } else {
            FilterQuality::Bilinear
        };
        self.surface.draw_pixmap(
            0,
            0,
            self.source.as_ref(),
            &PixmapPaint {
                quality,
                ..Default::default()
            },
            transform,
            None,
        );

        let mut paint = Paint::default();
        paint.set_color(to_skia_color(self.highlight));
        paint.anti_alias = true;

        for marking in model.committed().iter().chain(model.in_progress()) {
            match marking {
                Marking::Stroke(stroke) => {
                    // The transform scales line width too; undo it so the
                    // brush keeps its on-screen size at every zoom level
                    if let Some(path) = geometry::stroke_path(&stroke.points) {
                        self.surface.stroke_path(
                            &path,
                            &paint,
                            &geometry::brush_style(stroke.width() / viewport.scale()),
                            transform,
                            None,
                        );
                    }
                }
                Marking::Rect(rect) => {
                    if let Some(bounds) = geometry::rect_bounds(rect) {
                        self.surface.fill_rect(bounds, &paint, transform, None);
                    }
                }
            }
        }

        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarkKind, Point};
    use image::{Rgba, RgbaImage};

    fn white_source(width: u32, height: u32) -> SourceImage {
        SourceImage::new(RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])))
    }

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    fn highlighted_rows(pixmap: &Pixmap, x: u32) -> usize {
        (0..pixmap.height())
            .filter(|&y| {
                let [r, g, b, _] = pixel(pixmap, x, y);
                r > 200 && g < 230 && b < 230
            })
            .count()
    }

    #[test]
    fn test_draws_source_under_transform() {
        let config = EditorConfig::default();
        let mut renderer =
            Renderer::new(&white_source(10, 10), Size::new(100.0, 100.0), &config).unwrap();
        let mut viewport = ViewportTransform::new();
        viewport.zoom_at(Point::new(0.0, 0.0), 2.0);
        viewport.pan_by(Point::new(30.0, 40.0));

        renderer.render(&viewport, &MarkingModel::new());

        assert_eq!(pixel(renderer.surface(), 35, 45), [255, 255, 255, 255]);
        assert_eq!(pixel(renderer.surface(), 49, 59), [255, 255, 255, 255]);
        let bg = config.background_color.to_rgba_u8();
        assert_eq!(pixel(renderer.surface(), 10, 10), bg);
        assert_eq!(pixel(renderer.surface(), 51, 61), bg);
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_markings_follow_the_viewport() {
        let config = EditorConfig::default();
        let mut renderer =
            Renderer::new(&white_source(100, 100), Size::new(200.0, 200.0), &config).unwrap();
        let mut model = MarkingModel::new();
        model.begin(MarkKind::Rect, Point::new(10.0, 10.0), 0.0);
        model.extend(Point::new(20.0, 20.0));
        model.commit();

        let mut viewport = ViewportTransform::new();
        viewport.pan_by(Point::new(50.0, 50.0));
        renderer.render(&viewport, &model);

        // image (15, 15) sits at screen (65, 65)
        let [r, g, b, a] = pixel(renderer.surface(), 65, 65);
        assert_eq!(a, 255);
        assert!(r > g && r > b, "expected a red tint, got {:?}", [r, g, b]);
        assert_eq!(pixel(renderer.surface(), 15, 15), config.background_color.to_rgba_u8());
        assert_eq!(pixel(renderer.surface(), 80, 80), [255, 255, 255, 255]);
    }

    #[test]
    fn test_in_progress_marking_is_drawn() {
        let config = EditorConfig::default();
        let mut renderer =
            Renderer::new(&white_source(50, 50), Size::new(50.0, 50.0), &config).unwrap();
        let mut model = MarkingModel::new();
        model.begin(MarkKind::Rect, Point::new(5.0, 5.0), 0.0);
        model.extend(Point::new(25.0, 25.0));
        renderer.render(&ViewportTransform::new(), &model);
        assert_ne!(pixel(renderer.surface(), 15, 15), [255, 255, 255, 255]);
    }

    #[test]
    fn test_stroke_thickness_constant_on_screen() {
        let config = EditorConfig::default();
        let mut renderer =
            Renderer::new(&white_source(100, 100), Size::new(200.0, 200.0), &config).unwrap();
        let mut model = MarkingModel::new();
        model.begin(MarkKind::Brush, Point::new(10.0, 50.0), 5.0);
        model.extend(Point::new(90.0, 50.0));
        model.commit();

        let mut viewport = ViewportTransform::new();
        renderer.render(&viewport, &model);
        let at_one = highlighted_rows(renderer.surface(), 50);

        viewport.zoom_at(Point::new(0.0, 0.0), 2.0);
        renderer.render(&viewport, &model);
        let at_two = highlighted_rows(renderer.surface(), 100);

        assert!((9..=11).contains(&at_one), "scale 1 thickness {}", at_one);
        assert!(at_one.abs_diff(at_two) <= 1, "thickness {} vs {}", at_one, at_two);
    }

    #[test]
    fn test_zero_container_is_render_error() {
        let result = Renderer::new(
            &white_source(4, 4),
            Size::new(0.0, 300.0),
            &EditorConfig::default(),
        );
        assert!(matches!(result, Err(EditorError::Render(_))));
    }

    #[test]
    fn test_resize_changes_surface() {
        let mut renderer = Renderer::new(
            &white_source(4, 4),
            Size::new(10.0, 10.0),
            &EditorConfig::default(),
        )
        .unwrap();
        renderer.resize(Size::new(33.5, 20.0)).unwrap();
        assert_eq!((renderer.surface().width(), renderer.surface().height()), (34, 20));
        assert!(renderer.resize(Size::new(-1.0, 20.0)).is_err());
    }
}
