use std::{
    fmt,
    ops::{Add, Sub},
};

use anyhow::{Context, Result};
use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Bounds3, DEFAULT_CLOSE_EPSILON, Vector, Vector3};

/// A position in 3-space.
///
/// Validity (no NaN or infinite coordinate) is not enforced, see [`Point::is_valid`].
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The eye position of an entity standing at `(x, y, z)`.
    pub fn eye_location(x: f64, y: f64, z: f64, eye_height: f64) -> Self {
        Self::new(x, y + eye_height, z)
    }

    #[must_use]
    pub fn applied(self, v: Vector) -> Self {
        self.applied_components(v.dx(), v.dy(), v.dz())
    }

    #[must_use]
    pub fn applied_components(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        Vector::from_points(*self, other).magnitude()
    }

    pub fn distance_squared_to(&self, other: Point) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        dx * dx + dy * dy + dz * dz
    }

    /// `true` if none of the coordinates is NaN or infinite.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn is_close_to(&self, other: Point) -> bool {
        self.is_close_to_within(other, DEFAULT_CLOSE_EPSILON)
    }

    pub fn is_close_to_within(&self, other: Point, epsilon: f64) -> bool {
        self.distance_squared_to(other) <= epsilon * epsilon
    }

    /// Rounds every coordinate to `digits` decimals, halfway cases away from zero.
    #[must_use]
    pub fn force_rounded(self, digits: u32) -> Self {
        let f = 10f64.powi(digits as i32);
        let round = |v: f64| (v * f).round() / f;
        Self::new(round(self.x), round(self.y), round(self.z))
    }

    #[must_use]
    pub fn with_x(self, x: f64) -> Self {
        Self::new(x, self.y, self.z)
    }

    #[must_use]
    pub fn with_y(self, y: f64) -> Self {
        Self::new(self.x, y, self.z)
    }

    #[must_use]
    pub fn with_z(self, z: f64) -> Self {
        Self::new(self.x, self.y, z)
    }

    /// The axis aligned box spanned by this point and `other`.
    pub fn bounding_box(&self, other: Point) -> Bounds3 {
        Bounds3::new(
            Self::new(
                self.x.min(other.x),
                self.y.min(other.y),
                self.z.min(other.z),
            ),
            Self::new(
                self.x.max(other.x),
                self.y.max(other.y),
                self.z.max(other.z),
            ),
        )
    }

    pub fn bounding_box_to(&self, v: Vector) -> Bounds3 {
        self.bounding_box(self.applied(v))
    }

    pub fn to_vector3(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// A flat record with the numeric fields `x`, `y` and `z`.
    pub fn to_record(&self) -> Value {
        let mut record = Map::new();
        record.insert("x".into(), self.x.into());
        record.insert("y".into(), self.y.into());
        record.insert("z".into(), self.z.into());
        Value::Object(record)
    }

    pub fn from_record(record: &Value) -> Result<Self> {
        let field = |name: &str| {
            record
                .get(name)
                .and_then(Value::as_f64)
                .with_context(|| format!("Point record: missing or non-numeric field `{name}`"))
        };
        Ok(Self::new(field("x")?, field("y")?, field("z")?))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P({:.3}/{:.3}/{:.3})", self.x, self.y, self.z)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Self::Output {
        self.applied(rhs)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Self::Output {
        self.applied(-rhs)
    }
}

/// The displacement from `rhs` to `self`.
impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Self::Output {
        Vector::from_points(rhs, self)
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point> for (f64, f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y, p.z)
    }
}

impl From<Vector3> for Point {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point> for Vector3 {
    fn from(p: Point) -> Self {
        p.to_vector3()
    }
}

impl AbsDiffEq for Point {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn apply_translates_without_touching_the_source() {
        let p = Point::new(1.0, 2.0, 3.0);
        let moved = p.applied(Vector::new(0.5, -2.0, 1.0));
        assert_eq!(p, Point::new(1.0, 2.0, 3.0));
        assert_eq!(moved, Point::new(1.5, 0.0, 4.0));
        assert_eq!(p + Vector::new(0.5, -2.0, 1.0), moved);
        assert_eq!(moved - p, Vector::new(0.5, -2.0, 1.0));
    }

    #[test]
    fn distances_include_all_three_axes() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(4.0, 6.0, 15.0);
        assert_eq!(a.distance_to(b), 13.0);
        assert_eq!(a.distance_squared_to(b), 169.0);
    }

    #[test]
    fn validity_rejects_nan_and_infinity() {
        assert!(Point::new(1.0, -2.0, 1e300).is_valid());
        assert!(!Point::new(f64::NAN, 0.0, 0.0).is_valid());
        assert!(!Point::new(0.0, f64::INFINITY, 0.0).is_valid());
        assert!(!Point::new(0.0, 0.0, f64::NEG_INFINITY).is_valid());
    }

    #[test]
    fn closeness_uses_squared_distance_threshold() {
        let p = Point::ORIGIN;
        assert!(p.is_close_to(Point::new(0.05, 0.05, 0.05)));
        assert!(!p.is_close_to(Point::new(0.1, 0.1, 0.0)));
        assert!(p.is_close_to_within(Point::new(1.0, 0.0, 0.0), 1.0));
    }

    #[test]
    fn force_rounding() {
        let p = Point::new(1.23456, -0.0005, 2.5).force_rounded(3);
        assert_abs_diff_eq!(p, Point::new(1.235, -0.001, 2.5), epsilon = 1e-12);
    }

    #[test]
    fn bounding_box_orders_corners() {
        let b = Point::new(2.0, -1.0, 5.0).bounding_box(Point::new(-3.0, 4.0, 5.0));
        assert_eq!(b.min, Point::new(-3.0, -1.0, 5.0));
        assert_eq!(b.max, Point::new(2.0, 4.0, 5.0));

        let b = Point::ORIGIN.bounding_box_to(Vector::new(-1.0, 1.0, 2.0));
        assert_eq!(b.min, Point::new(-1.0, 0.0, 0.0));
        assert_eq!(b.max, Point::new(0.0, 1.0, 2.0));
    }

    #[test]
    fn eye_location_offsets_y() {
        assert_abs_diff_eq!(
            Point::eye_location(10.0, 64.0, -3.0, 1.62),
            Point::new(10.0, 65.62, -3.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn record_has_named_fields() {
        let p = Point::new(1.5, -2.0, 3.25);
        let record = p.to_record();
        assert_eq!(record, json!({"x": 1.5, "y": -2.0, "z": 3.25}));
        assert_eq!(Point::from_record(&record).unwrap(), p);
        assert_eq!(serde_json::to_value(p).unwrap(), record);
    }

    #[test]
    fn record_accepts_integer_fields_and_rejects_missing_ones() {
        let p = Point::from_record(&json!({"x": 1, "y": 2, "z": 3})).unwrap();
        assert_eq!(p, Point::new(1.0, 2.0, 3.0));

        let err = Point::from_record(&json!({"x": 1.0, "y": 2.0})).unwrap_err();
        assert!(err.to_string().contains("`z`"));
        assert!(Point::from_record(&json!({"x": "1", "y": 2, "z": 3})).is_err());
    }

    #[test]
    fn display_uses_three_decimals() {
        assert_eq!(
            Point::new(1.0, -0.5, 2.12345).to_string(),
            "P(1.000/-0.500/2.123)"
        );
    }
}
