//! Plane geometry for course borders, movement segments and sensor rays.
//!
//! Parallelism and collinearity use exact `== 0.0` comparisons on the
//! orientation determinants. Touching endpoints therefore count as
//! intersections. Changing this to a tolerance-based comparison changes
//! which runs are scored as crashes, so it is a semantic decision, not a
//! numeric cleanup.

use crate::error::{RacelineError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z-component of the 3D cross product).
    pub fn cross(self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Rotation by the standard 2D matrix; positive angles turn
    /// counter-clockwise in a y-up frame. Preserves length.
    pub fn rotated_degrees(self, angle: f64) -> Vec2 {
        let theta = angle.to_radians();
        let (s, c) = theta.sin_cos();
        Vec2::new(c * self.x - s * self.y, s * self.x + c * self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Directed segment. Degenerate segments (start == end) are legal and show
/// up in practice: the initial movement segment and the "nothing detected"
/// sensor reading are both zero-length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn direction(self) -> Vec2 {
        self.end - self.start
    }

    pub fn length(self) -> f64 {
        self.direction().norm()
    }

    /// Squared perpendicular distance from `point` to the infinite line
    /// through this segment, not clamped to the segment. Requires a
    /// non-degenerate segment: the divisor is the squared segment length.
    pub fn squared_distance_to_line(self, point: Vec2) -> f64 {
        let x_diff = self.end.x - self.start.x;
        let y_diff = self.end.y - self.start.y;
        let det = self.start.x * self.end.y - self.start.y * self.end.x;
        let signed = y_diff * point.x - x_diff * point.y - det;
        signed * signed / (x_diff * x_diff + y_diff * y_diff)
    }

    /// Scalar projection of `point - start` onto the segment direction,
    /// returned as a vector along the segment. Its norm measures how far
    /// along the segment the perpendicular foot of `point` falls.
    pub fn projection_of(self, point: Vec2) -> Vec2 {
        let v1 = point - self.start;
        let v2 = self.direction();
        v2 * (v1.dot(v2) / v2.dot(v2))
    }

    /// One-sided test: does the infinite directed line through `self`
    /// separate (or touch) the endpoints of `other`? True when the two
    /// endpoints lie strictly on opposite sides, or either orientation
    /// determinant is exactly zero.
    pub fn line_crosses(self, other: Segment) -> bool {
        let v1 = self.direction();
        let det1 = v1.cross(other.start - self.start);
        let det2 = v1.cross(other.end - self.start);
        (det1 < 0.0 && 0.0 < det2) || (det1 > 0.0 && 0.0 > det2) || det1 == 0.0 || det2 == 0.0
    }

    /// Bounded segment intersection via the symmetric double orientation
    /// test. Collinear and touching configurations count as intersecting.
    pub fn intersects(self, other: Segment) -> bool {
        self.line_crosses(other) && other.line_crosses(self)
    }

    /// Intersection point of the two infinite lines. Callers pre-filter
    /// parallel pairs with [`Segment::is_parallel_to`]; a parallel input
    /// fails fast instead of producing NaN coordinates.
    pub fn line_intersection(self, other: Segment) -> Result<Vec2> {
        let (x1, y1) = (self.start.x, self.start.y);
        let (x2, y2) = (self.end.x, self.end.y);
        let (x3, y3) = (other.start.x, other.start.y);
        let (x4, y4) = (other.end.x, other.end.y);
        let det3 = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        if det3 == 0.0 {
            return Err(RacelineError::DegenerateIntersection);
        }
        let det1 = x1 * y2 - y1 * x2;
        let det2 = x3 * y4 - y3 * x4;
        let x = (det1 * (x3 - x4) - (x1 - x2) * det2) / det3;
        let y = (det1 * (y3 - y4) - (y1 - y2) * det2) / det3;
        Ok(Vec2::new(x, y))
    }

    pub fn is_parallel_to(self, other: Segment) -> bool {
        self.direction().cross(other.direction()) == 0.0
    }

    /// Strictly-positive dot product of the two directions. Disambiguates a
    /// ray's forward direction from its backward extension.
    pub fn same_direction_as(self, other: Segment) -> bool {
        self.direction().dot(other.direction()) > 0.0
    }
}
