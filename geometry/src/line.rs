use std::fmt;

use log::{debug, warn};

use crate::{
    AxisRotation, Contains, Point, Vector, Vector3,
    permutation::{ALL_AXIS_ORDERS, first_finite, permute},
};

/// A parametric line `origin + t * support`.
///
/// A null `support` leaves the direction undefined. This is not checked.
#[derive(Copy, Clone, Debug, Default)]
pub struct Line {
    pub origin: Point,
    pub support: Vector,
}

impl Line {
    pub fn new(origin: Point, support: Vector) -> Self {
        Self { origin, support }
    }

    /// The line through `p1` (at `t = 0`) and `p2` (at `t = 1`).
    pub fn from_points(p1: Point, p2: Point) -> Self {
        Self::new(p1, p2 - p1)
    }

    pub fn point_at(&self, t: f64) -> Point {
        self.origin + self.support * t
    }

    /// The point where the two lines meet.
    ///
    /// Solves for the parameter on `self` in the x/y projection. If that divides by a vanishing
    /// component, the coordinates of both lines are permuted and the solve is repeated, up to all
    /// six axis orders. `None` if no order gives a finite parameter, which is the normal outcome
    /// for parallel lines.
    ///
    /// The third axis is not checked, so for skew lines this returns the point on `self` that
    /// meets `other` in the projection first solved.
    pub fn intersect_line(&self, other: &Line) -> Option<Point> {
        let p = self.origin.to_vector3();
        let v = self.support.to_vector3();
        let q = other.origin.to_vector3();
        let w = other.support.to_vector3();

        let Some(t) = first_finite(&ALL_AXIS_ORDERS, |order| {
            solve_line_line(
                permute(p, order),
                permute(v, order),
                permute(q, order),
                permute(w, order),
            )
        }) else {
            debug!("No intersection between {self} and {other}");
            return None;
        };

        let r = self.point_at(t);
        if !r.is_valid() {
            warn!("Invalid intersection {r} at t = {t} of {self} and {other}");
            return None;
        }
        Some(r)
    }

    /// Rotates `point` around this line by `angle` degrees.
    ///
    /// Looking along the support vector, positive angles rotate clockwise. The sine term is
    /// scaled by the support's length, see [`AxisRotation::Support`]. `None` if the support is
    /// null or the result is not a valid point.
    pub fn rotate_along(&self, point: Point, angle: f64) -> Option<Point> {
        self.rotate_along_with(point, angle, AxisRotation::Support)
    }

    /// [`Line::rotate_along`] with the sine term chosen by `mode`.
    pub fn rotate_along_with(
        &self,
        point: Point,
        angle: f64,
        mode: AxisRotation,
    ) -> Option<Point> {
        let o = Vector::from_point(self.origin);
        let s = self.support;
        let d = Vector::from_point(point) - o;

        let ss = s.dot(s);
        if ss == 0.0 {
            warn!("Failed to rotate {point}: {self} has no direction");
            return None;
        }

        let l = s.dot(d) / ss;
        let axial = s * l;
        let v = d - axial;
        let theta = angle.to_radians();

        let perpendicular = match mode {
            AxisRotation::Support => v.cross(s),
            AxisRotation::Rigid => v.cross(s.normalized()),
        };

        let rotated = o + axial + perpendicular * theta.sin() + v * theta.cos();
        let rotated = Point::from(rotated.to_vector3());
        if !rotated.is_valid() {
            warn!("Failed to rotate {point} by {angle} degrees around {self}");
            return None;
        }
        Some(rotated)
    }

    pub fn is_parallel(&self, other: &Line) -> bool {
        self.support.equals_ignore_scale(other.support)
    }
}

/// Parameter `l` of `p + l * v` where it meets `q + k * w`, solved in x and y.
fn solve_line_line(p: Vector3, v: Vector3, q: Vector3, w: Vector3) -> f64 {
    let a = (q.x - p.x) / v.x;
    let k = (p.y - q.y + a * v.y) / (w.y - w.x * v.y / v.x);
    k * w.x / v.x + a
}

/// Collinearity of `origin -> p` with the support, up to sign. The origin itself is contained.
impl Contains<Point> for Line {
    fn contains(&self, p: Point) -> bool {
        let d = p - self.origin;
        d.is_null() || self.support.equals_ignore_scale(d)
    }
}

/// Same line: parallel and `other`'s origin lies on `self`.
impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.is_parallel(other) && self.contains(other.origin)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g: x = {} + k * {}", self.origin, self.support)
    }
}

impl From<Line> for (Point, Vector) {
    fn from(l: Line) -> Self {
        (l.origin, l.support)
    }
}

impl From<(Point, Vector)> for Line {
    fn from((origin, support): (Point, Vector)) -> Self {
        Self::new(origin, support)
    }
}
