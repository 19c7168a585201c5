//! Drag gesture state for drawing rectangles and panning.

use crate::constants::MIN_DRAG_DISTANCE;
use crate::model::RectCoords;

/// The drag gesture currently in progress, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    /// No button held.
    #[default]
    Idle,
    /// Drawing a rectangle - stores the anchor and latest pointer position.
    Drawing {
        anchor: (i32, i32),
        current: (i32, i32),
    },
    /// Panning the view - stores the anchor and the last reported position.
    Panning { anchor: (i32, i32), last: (i32, i32) },
}

/// How a finished draw gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The drag was large enough; display-space corners of the new rectangle.
    Commit(RectCoords),
    /// The drag was below the minimum size and is discarded.
    Cancelled,
}

impl Gesture {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Gesture::Drawing { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Gesture::Panning { .. })
    }

    /// Start drawing at a display position.
    pub fn start_drawing(x: i32, y: i32) -> Self {
        Gesture::Drawing {
            anchor: (x, y),
            current: (x, y),
        }
    }

    /// Start panning at a display position.
    pub fn start_panning(x: i32, y: i32) -> Self {
        Gesture::Panning {
            anchor: (x, y),
            last: (x, y),
        }
    }

    /// Move the pointer while drawing. Returns the live preview rectangle.
    pub fn update_drawing(&mut self, x: i32, y: i32) -> Option<RectCoords> {
        match self {
            Gesture::Drawing { anchor, current } => {
                *current = (x, y);
                Some(RectCoords::from_corners(*anchor, *current))
            }
            _ => None,
        }
    }

    /// Move the pointer while panning. Returns the delta since the last move.
    pub fn update_panning(&mut self, x: i32, y: i32) -> Option<(i32, i32)> {
        match self {
            Gesture::Panning { last, .. } => {
                let delta = (x - last.0, y - last.1);
                *last = (x, y);
                Some(delta)
            }
            _ => None,
        }
    }

    /// Finish a draw at a display position. The gesture returns to idle.
    ///
    /// Returns None if no draw was in progress.
    pub fn finish_drawing(&mut self, x: i32, y: i32) -> Option<DrawOutcome> {
        let Gesture::Drawing { anchor, .. } = *self else {
            return None;
        };
        *self = Gesture::Idle;

        let coords = RectCoords::from_corners(anchor, (x, y));
        if coords.width() < MIN_DRAG_DISTANCE || coords.height() < MIN_DRAG_DISTANCE {
            Some(DrawOutcome::Cancelled)
        } else {
            Some(DrawOutcome::Commit(coords))
        }
    }

    /// Finish a pan. Returns true if a pan was in progress.
    pub fn finish_panning(&mut self) -> bool {
        let was_panning = self.is_panning();
        if was_panning {
            *self = Gesture::Idle;
        }
        was_panning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_commit() {
        let mut gesture = Gesture::start_drawing(10, 10);
        assert_eq!(
            gesture.update_drawing(30, 40),
            Some(RectCoords::new(10, 10, 30, 40))
        );
        assert_eq!(
            gesture.finish_drawing(50, 60),
            Some(DrawOutcome::Commit(RectCoords::new(10, 10, 50, 60)))
        );
        assert_eq!(gesture, Gesture::Idle);
    }

    #[test]
    fn test_draw_below_threshold_cancels() {
        let mut gesture = Gesture::start_drawing(10, 10);
        assert_eq!(gesture.finish_drawing(14, 100), Some(DrawOutcome::Cancelled));

        let mut gesture = Gesture::start_drawing(10, 10);
        assert_eq!(
            gesture.finish_drawing(5, 5),
            Some(DrawOutcome::Commit(RectCoords::new(10, 10, 5, 5)))
        );
    }

    #[test]
    fn test_finish_without_draw() {
        let mut gesture = Gesture::Idle;
        assert_eq!(gesture.finish_drawing(1, 1), None);
        assert_eq!(gesture.update_drawing(1, 1), None);
    }

    #[test]
    fn test_panning_deltas() {
        let mut gesture = Gesture::start_panning(100, 100);
        assert!(gesture.is_panning());
        assert_eq!(gesture.update_panning(110, 95), Some((10, -5)));
        assert_eq!(gesture.update_panning(110, 100), Some((0, 5)));
        assert_eq!(gesture.update_drawing(0, 0), None);
        assert!(gesture.finish_panning());
        assert!(!gesture.finish_panning());
    }
}
