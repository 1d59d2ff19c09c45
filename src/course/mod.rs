//! Course model: two border polylines, a finish segment and the initial
//! vehicle pose, loaded once and immutable afterwards.

pub mod loader;

use crate::error::{RacelineError, Result};
use crate::geometry::{Segment, Vec2};
use crate::types::VehicleState;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_COURSE_ID: AtomicU64 = AtomicU64::new(0);

/// Identity assigned at construction, used as the course component of
/// structural cache keys. Two courses with identical geometry are still
/// distinct cache domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CourseId(u64);

#[derive(Debug)]
pub struct Course {
    id: CourseId,
    pub left_borders: Vec<Segment>,
    /// Precomputed lengths, parallel to `left_borders`.
    pub left_border_lengths: Vec<f64>,
    pub right_borders: Vec<Segment>,
    pub initial_state: VehicleState,
    pub finish_line: Segment,
}

impl Course {
    pub fn new(
        left_borders: Vec<Segment>,
        right_borders: Vec<Segment>,
        initial_state: VehicleState,
        finish_line: Segment,
    ) -> Result<Self> {
        if left_borders.is_empty() || right_borders.is_empty() {
            return Err(RacelineError::CourseFormat(
                "each border needs at least one segment".to_string(),
            ));
        }
        // Progress projects onto left-border segments, which divides by
        // their squared length.
        if let Some(i) = left_borders.iter().position(|s| s.start == s.end) {
            return Err(RacelineError::CourseFormat(format!(
                "left border segment {} has zero length",
                i
            )));
        }
        let left_border_lengths = left_borders.iter().map(|s| s.length()).collect();
        Ok(Self {
            id: CourseId(NEXT_COURSE_ID.fetch_add(1, Ordering::Relaxed)),
            left_borders,
            left_border_lengths,
            right_borders,
            initial_state,
            finish_line,
        })
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Left borders followed by right borders, the order sensor casting
    /// scans them in.
    pub fn borders(&self) -> impl Iterator<Item = &Segment> {
        self.left_borders.iter().chain(self.right_borders.iter())
    }

    /// Piecewise-linear odometer along the left border: pick the left
    /// segment whose infinite line is closest to `position` (first minimum
    /// wins), then add the lengths of all earlier segments to the norm of
    /// the projection onto the picked one.
    ///
    /// Not monotonic under backward or lateral motion; it is a fitness
    /// proxy, not a physical odometer.
    pub fn progress_at(&self, position: Vec2) -> f64 {
        let mut nearest = 0;
        let mut nearest_distance = f64::INFINITY;
        for (i, segment) in self.left_borders.iter().enumerate() {
            let d = segment.squared_distance_to_line(position);
            if d < nearest_distance {
                nearest = i;
                nearest_distance = d;
            }
        }
        let behind: f64 = self.left_border_lengths[..nearest].iter().sum();
        behind + self.left_borders[nearest].projection_of(position).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Course {
        // Straight corridor along +y: left wall x=0, right wall x=50.
        Course::new(
            vec![Segment::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 100.0))],
            vec![Segment::new(Vec2::new(50.0, 0.0), Vec2::new(50.0, 100.0))],
            VehicleState::new(Vec2::new(25.0, 0.0), 90.0),
            Segment::new(Vec2::new(0.0, 100.0), Vec2::new(50.0, 100.0)),
        )
        .unwrap()
    }

    #[test]
    fn progress_tracks_distance_down_the_corridor() {
        let course = corridor();
        assert!((course.progress_at(Vec2::new(25.0, 0.0)) - 0.0).abs() < 1e-12);
        assert!((course.progress_at(Vec2::new(25.0, 40.0)) - 40.0).abs() < 1e-12);
        assert!((course.progress_at(Vec2::new(10.0, 99.0)) - 99.0).abs() < 1e-12);
    }

    #[test]
    fn progress_accumulates_earlier_segment_lengths() {
        let course = Course::new(
            vec![
                Segment::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 60.0)),
                Segment::new(Vec2::new(0.0, 60.0), Vec2::new(40.0, 60.0)),
            ],
            vec![Segment::new(Vec2::new(30.0, 0.0), Vec2::new(30.0, 30.0))],
            VehicleState::new(Vec2::new(15.0, 0.0), 90.0),
            Segment::new(Vec2::new(40.0, 30.0), Vec2::new(40.0, 60.0)),
        )
        .unwrap();
        // Past the corner: nearest infinite line is the second segment,
        // projection measures the x offset from its start.
        let p = course.progress_at(Vec2::new(10.0, 59.0));
        assert!((p - 70.0).abs() < 1e-9);
    }

    #[test]
    fn empty_border_is_rejected() {
        let result = Course::new(
            vec![],
            vec![Segment::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0))],
            VehicleState::new(Vec2::ZERO, 0.0),
            Segment::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)),
        );
        assert!(matches!(result, Err(RacelineError::CourseFormat(_))));
    }

    #[test]
    fn zero_length_left_segment_is_rejected() {
        let result = Course::new(
            vec![Segment::new(Vec2::new(2.0, 2.0), Vec2::new(2.0, 2.0))],
            vec![Segment::new(Vec2::new(5.0, 0.0), Vec2::new(5.0, 9.0))],
            VehicleState::new(Vec2::ZERO, 0.0),
            Segment::new(Vec2::new(0.0, 9.0), Vec2::new(5.0, 9.0)),
        );
        assert!(matches!(result, Err(RacelineError::CourseFormat(_))));
    }

    #[test]
    fn course_ids_are_unique() {
        let a = corridor();
        let b = corridor();
        assert_ne!(a.id(), b.id());
    }
}
