//! Marking store: committed markings plus the one being drawn

use crate::domain::{MarkKind, Marking, Point};

/// Append-only list of committed markings and an optional in-progress one
///
/// Committed markings are never edited or reordered once pushed. Only the
/// in-progress marking changes while the pointer moves.
#[derive(Clone, Debug, Default)]
pub struct MarkingModel {
    committed: Vec<Marking>,
    in_progress: Option<Marking>,
}

impl MarkingModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a marking of `kind` at `point`; ignored while another is open
    pub fn begin(&mut self, kind: MarkKind, point: Point, radius: f32) {
        if self.in_progress.is_some() {
            log::debug!("begin({:?}) ignored: a marking is already open", kind);
            return;
        }
        self.in_progress = Some(Marking::start(kind, point, radius));
    }

    /// Feed a pointer position into the open marking
    pub fn extend(&mut self, point: Point) {
        match self.in_progress.as_mut() {
            Some(Marking::Stroke(stroke)) => stroke.points.push(point),
            Some(Marking::Rect(rect)) => {
                rect.width = point.x - rect.anchor.x;
                rect.height = point.y - rect.anchor.y;
            }
            None => {}
        }
    }

    /// Close the open marking
    ///
    /// Returns true if it was appended. Degenerate markings are dropped.
    pub fn commit(&mut self) -> bool {
        let Some(marking) = self.in_progress.take() else {
            return false;
        };
        if marking.is_degenerate() {
            log::debug!("Discarding degenerate {:?} marking", marking.kind());
            return false;
        }
        self.committed.push(marking);
        true
    }

    /// Drop the open marking without committing it
    pub fn cancel_in_progress(&mut self) -> bool {
        self.in_progress.take().is_some()
    }

    pub fn clear_all(&mut self) {
        self.committed.clear();
        self.in_progress = None;
    }

    pub fn committed(&self) -> &[Marking] {
        &self.committed
    }

    pub fn in_progress(&self) -> Option<&Marking> {
        self.in_progress.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.in_progress.is_some()
    }

    /// Number of committed markings
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RectMark;

    #[test]
    fn test_stroke_points_keep_order() {
        let mut model = MarkingModel::new();
        model.begin(MarkKind::Brush, Point::new(1.0, 1.0), 4.0);
        model.extend(Point::new(2.0, 3.0));
        model.extend(Point::new(5.0, 8.0));
        assert!(model.commit());

        let Marking::Stroke(stroke) = &model.committed()[0] else {
            panic!("expected stroke");
        };
        assert_eq!(
            stroke.points,
            vec![Point::new(1.0, 1.0), Point::new(2.0, 3.0), Point::new(5.0, 8.0)]
        );
        assert_eq!(stroke.radius, 4.0);
    }

    #[test]
    fn test_rect_extend_keeps_sign() {
        let mut model = MarkingModel::new();
        model.begin(MarkKind::Rect, Point::new(50.0, 40.0), 0.0);
        model.extend(Point::new(70.0, 90.0));
        model.extend(Point::new(10.0, 10.0));
        assert_eq!(
            model.in_progress(),
            Some(&Marking::Rect(RectMark {
                anchor: Point::new(50.0, 40.0),
                width: -40.0,
                height: -30.0,
            }))
        );
    }

    #[test]
    fn test_begin_while_open_is_ignored() {
        let mut model = MarkingModel::new();
        model.begin(MarkKind::Rect, Point::new(0.0, 0.0), 0.0);
        model.begin(MarkKind::Brush, Point::new(9.0, 9.0), 3.0);
        assert_eq!(model.in_progress().map(Marking::kind), Some(MarkKind::Rect));
    }

    #[test]
    fn test_degenerate_commits_are_discarded() {
        let mut model = MarkingModel::new();

        model.begin(MarkKind::Brush, Point::new(3.0, 3.0), 2.0);
        assert!(!model.commit());
        assert_eq!(model.len(), 0);

        model.begin(MarkKind::Rect, Point::new(3.0, 3.0), 0.0);
        model.extend(Point::new(3.0, 3.0));
        assert!(!model.commit());
        assert_eq!(model.len(), 0);

        model.begin(MarkKind::Rect, Point::new(3.0, 3.0), 0.0);
        model.extend(Point::new(30.0, 3.0));
        assert!(!model.commit());
        assert_eq!(model.len(), 0);
        assert!(!model.is_drawing());
    }

    #[test]
    fn test_commit_without_open_marking() {
        let mut model = MarkingModel::new();
        assert!(!model.commit());
        model.extend(Point::new(1.0, 1.0));
        assert!(model.is_empty());
    }

    #[test]
    fn test_clear_all_empties_everything() {
        let mut model = MarkingModel::new();
        model.begin(MarkKind::Rect, Point::new(0.0, 0.0), 0.0);
        model.extend(Point::new(5.0, 5.0));
        model.commit();
        model.begin(MarkKind::Brush, Point::new(0.0, 0.0), 1.0);
        model.clear_all();
        assert!(model.is_empty());
        assert!(model.in_progress().is_none());
    }

    #[test]
    fn test_committed_entries_are_untouched_by_later_drawing() {
        let mut model = MarkingModel::new();
        model.begin(MarkKind::Rect, Point::new(0.0, 0.0), 0.0);
        model.extend(Point::new(5.0, 5.0));
        model.commit();
        let first = model.committed()[0].clone();

        model.begin(MarkKind::Rect, Point::new(1.0, 1.0), 0.0);
        model.extend(Point::new(99.0, 99.0));
        assert_eq!(model.committed()[0], first);
        assert!(model.cancel_in_progress());
        assert_eq!(model.committed(), &[first]);
    }
}
