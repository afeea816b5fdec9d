use std::{
    f64::consts::PI,
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

use approx::AbsDiffEq;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_tuple::{Deserialize_tuple, Serialize_tuple};

use crate::{Face, Point, Vector3, permutation};

/// A free direction or displacement in 3-space.
///
/// The magnitude is computed once on construction and is always consistent with the components.
/// A magnitude of exactly `0.0` denotes the null vector.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Components", into = "Components")]
pub struct Vector {
    dx: f64,
    dy: f64,
    dz: f64,
    magnitude: f64,
}

/// Serialized form, the magnitude is recomputed on the way in.
#[derive(Serialize_tuple, Deserialize_tuple)]
struct Components {
    dx: f64,
    dy: f64,
    dz: f64,
}

impl Vector {
    pub const NULL: Self = Self::axis(0.0, 0.0, 0.0, 0.0);
    pub const E_X: Self = Self::axis(1.0, 0.0, 0.0, 1.0);
    pub const E_Y: Self = Self::axis(0.0, 1.0, 0.0, 1.0);
    pub const E_Z: Self = Self::axis(0.0, 0.0, 1.0, 1.0);

    const fn axis(dx: f64, dy: f64, dz: f64, magnitude: f64) -> Self {
        Self {
            dx,
            dy,
            dz,
            magnitude,
        }
    }

    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        let magnitude = (dx * dx + dy * dy + dz * dz).sqrt();
        if magnitude.is_nan() {
            warn!("NaN whilst calculating magnitude of v({dx}|{dy}|{dz})");
        }
        Self {
            dx,
            dy,
            dz,
            magnitude,
        }
    }

    /// The displacement from `(x1, y1, z1)` to `(x2, y2, z2)`.
    pub fn from_deltas(x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> Self {
        Self::new(x2 - x1, y2 - y1, z2 - z1)
    }

    /// The displacement from `p1` to `p2`.
    pub fn from_points(p1: Point, p2: Point) -> Self {
        Self::from_deltas(p1.x, p1.y, p1.z, p2.x, p2.y, p2.z)
    }

    /// The anchor vector from the space origin to `p`.
    pub fn from_point(p: Point) -> Self {
        Self::new(p.x, p.y, p.z)
    }

    /// Look direction for a pitch and a yaw in degrees. Pitch is positive looking down, yaw is
    /// measured from the positive z axis towards negative x.
    pub fn from_pitch_yaw(pitch: f64, yaw: f64) -> Self {
        let (pitch, yaw) = (pitch.to_radians(), yaw.to_radians());
        Self::new(
            -yaw.sin() * pitch.cos(),
            -pitch.sin(),
            yaw.cos() * pitch.cos(),
        )
        .normalized()
    }

    /// Inverse of [`Vector::from_pitch_yaw`], in degrees.
    pub fn pitch_yaw(&self) -> (f64, f64) {
        let unit = self.normalized();
        let pitch = -unit.dy.clamp(-1.0, 1.0).asin();
        let yaw = (-unit.dx).atan2(unit.dz);
        (pitch * 180.0 / PI, yaw * 180.0 / PI)
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }

    pub fn dz(&self) -> f64 {
        self.dz
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn is_null(&self) -> bool {
        self.magnitude == 0.0
    }

    pub fn to_vector3(self) -> Vector3 {
        Vector3::new(self.dx, self.dy, self.dz)
    }

    pub fn dot(&self, other: Vector) -> f64 {
        self.to_vector3().dot(other.to_vector3())
    }

    /// Right-handed cross product.
    pub fn cross(&self, other: Vector) -> Vector {
        self.to_vector3().cross(other.to_vector3()).into()
    }

    /// The angle in radians between the two vectors, `0.0` if either of them is null.
    pub fn angle_between(&self, other: Vector) -> f64 {
        if self.is_null() || other.is_null() {
            return 0.0;
        }
        (self.dot(other) / (self.magnitude * other.magnitude))
            .clamp(-1.0, 1.0)
            .acos()
    }

    /// Unit length copy, the null vector stays null.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.is_null() {
            return self;
        }
        self.scaled(1.0 / self.magnitude)
    }

    #[must_use]
    pub fn scaled(self, s: f64) -> Self {
        Self::new(self.dx * s, self.dy * s, self.dz * s)
    }

    #[must_use]
    pub fn negated(self) -> Self {
        -self
    }

    /// Snaps the vector to its dominant axis, keeping that component and its sign. Ties prefer
    /// x over y over z.
    #[must_use]
    pub fn elementarized(self) -> Self {
        let (x, y, z) = (self.dx * self.dx, self.dy * self.dy, self.dz * self.dz);
        if x >= y {
            if x >= z {
                Self::new(self.dx, 0.0, 0.0)
            } else {
                Self::new(0.0, 0.0, self.dz)
            }
        } else if y >= z {
            Self::new(0.0, self.dy, 0.0)
        } else {
            Self::new(0.0, 0.0, self.dz)
        }
    }

    /// `(dx, dy, dz) -> (dy, dz, dx)`
    #[must_use]
    pub fn rotated_xyz(self) -> Self {
        permutation::permute(self.to_vector3(), permutation::CYCLIC_AXIS_ORDERS[1]).into()
    }

    /// Collinearity up to sign: the normalized vectors are exactly equal or exactly opposite.
    ///
    /// This compares floating point values exactly, so vectors that went through different
    /// rounding may not be recognized as collinear.
    pub fn equals_ignore_scale(&self, other: Vector) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a == b || a == -b
    }

    /// Truncates every component towards zero to `digits` decimals.
    #[must_use]
    pub fn rounded(self, digits: u32) -> Self {
        let f = 10f64.powi(digits as i32);
        let truncate = |v: f64| (v * f).trunc() / f;
        Self::new(truncate(self.dx), truncate(self.dy), truncate(self.dz))
    }

    #[must_use]
    pub fn with_x(self, dx: f64) -> Self {
        Self::new(dx, self.dy, self.dz)
    }

    #[must_use]
    pub fn with_y(self, dy: f64) -> Self {
        Self::new(self.dx, dy, self.dz)
    }

    #[must_use]
    pub fn with_z(self, dz: f64) -> Self {
        Self::new(self.dx, self.dy, dz)
    }

    #[must_use]
    pub fn added_components(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.dx + dx, self.dy + dy, self.dz + dz)
    }

    /// The unit offset of the face with the given index, `None` for indices outside `0..6`.
    pub fn derive_from_face(index: u8) -> Option<Self> {
        Face::from_index(index).map(Self::from)
    }

    /// The face whose outward direction is this vector's dominant axis. `None` for the null
    /// vector.
    pub fn face(&self) -> Option<Face> {
        let e = self.elementarized();
        let signum = |v: f64| {
            if v > 0.0 {
                1
            } else if v < 0.0 {
                -1
            } else {
                0
            }
        };
        Face::from_offset(signum(e.dx), signum(e.dy), signum(e.dz))
    }

    /// Face index in `0..6`, or [`crate::NO_FACE`].
    pub fn face_index(&self) -> u8 {
        Face::index_of(self.face())
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = (self.magnitude * 1000.0).trunc() / 1000.0;
        write!(
            f,
            "v({}|{}|{}), |v| == {}",
            self.dx, self.dy, self.dz, magnitude
        )
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Self::axis(-self.dx, -self.dy, -self.dz, self.magnitude)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.dx + rhs.dx, self.dy + rhs.dy, self.dz + rhs.dz)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.dx - rhs.dx, self.dy - rhs.dy, self.dz - rhs.dz)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scaled(rhs)
    }
}

impl From<Vector3> for Vector {
    fn from(v: Vector3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector> for Vector3 {
    fn from(v: Vector) -> Self {
        v.to_vector3()
    }
}

impl From<(f64, f64, f64)> for Vector {
    fn from((dx, dy, dz): (f64, f64, f64)) -> Self {
        Self::new(dx, dy, dz)
    }
}

impl From<Face> for Vector {
    fn from(face: Face) -> Self {
        let (dx, dy, dz) = face.offset();
        Self::new(dx as f64, dy as f64, dz as f64)
    }
}

impl From<Components> for Vector {
    fn from(Components { dx, dy, dz }: Components) -> Self {
        Self::new(dx, dy, dz)
    }
}

impl From<Vector> for Components {
    fn from(v: Vector) -> Self {
        Self {
            dx: v.dx,
            dy: v.dy,
            dz: v.dz,
        }
    }
}

impl AbsDiffEq for Vector {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.dx.abs_diff_eq(&other.dx, epsilon)
            && self.dy.abs_diff_eq(&other.dy, epsilon)
            && self.dz.abs_diff_eq(&other.dz, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn dot_and_cross_of_unit_axes() {
        assert_eq!(Vector::E_X.dot(Vector::E_Y), 0.0);
        assert_eq!(Vector::E_X.cross(Vector::E_Y), Vector::E_Z);
        assert_eq!(Vector::E_Y.cross(Vector::E_X), -Vector::E_Z);
    }

    #[test]
    fn magnitude_is_sqrt_of_self_dot() {
        for v in [
            Vector::new(3.0, 4.0, 0.0),
            Vector::new(-1.5, 2.25, 7.0),
            Vector::new(1e-3, -4e2, 0.5),
            Vector::NULL,
        ] {
            assert_abs_diff_eq!(v.magnitude(), v.dot(v).sqrt(), epsilon = 1e-12);
        }
        assert_eq!(Vector::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    }

    #[test]
    fn cross_is_perpendicular_to_both_operands() {
        let pairs = [
            (Vector::new(1.0, 2.0, 3.0), Vector::new(-4.0, 0.5, 2.0)),
            (Vector::new(0.0, 0.0, 1.0), Vector::new(1.0, 1.0, 0.0)),
            (Vector::new(2.0, 2.0, 2.0), Vector::new(1.0, 1.0, 1.0)),
        ];
        for (a, b) in pairs {
            let c = a.cross(b);
            assert_abs_diff_eq!(c.dot(a), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(c.dot(b), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn constants_have_consistent_magnitudes() {
        for v in [Vector::NULL, Vector::E_X, Vector::E_Y, Vector::E_Z] {
            assert_eq!(v.magnitude(), v.dot(v).sqrt());
        }
    }

    #[test]
    fn angle_between_is_zero_for_null_operands() {
        assert_eq!(Vector::NULL.angle_between(Vector::E_X), 0.0);
        assert_eq!(Vector::E_X.angle_between(Vector::NULL), 0.0);
        assert_abs_diff_eq!(
            Vector::E_X.angle_between(Vector::E_Y),
            PI / 2.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Vector::E_X.angle_between(-Vector::E_X),
            PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn normalizing_null_is_a_no_op() {
        assert_eq!(Vector::NULL.normalized(), Vector::NULL);
        let n = Vector::new(0.0, 3.0, 4.0).normalized();
        assert_abs_diff_eq!(n.magnitude(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(n, Vector::new(0.0, 0.6, 0.8), epsilon = 1e-12);
    }

    #[test]
    fn operations_return_new_values() {
        let v = Vector::new(1.0, 2.0, 3.0);
        let scaled = v.scaled(2.0);
        assert_eq!(v, Vector::new(1.0, 2.0, 3.0));
        assert_eq!(scaled, Vector::new(2.0, 4.0, 6.0));
        assert_eq!(v + scaled, Vector::new(3.0, 6.0, 9.0));
        assert_eq!(scaled - v, v);
        assert_eq!(v.negated().magnitude(), v.magnitude());
    }

    #[test]
    fn elementarize_keeps_dominant_axis_and_sign() {
        assert_eq!(
            Vector::new(0.2, -3.0, 1.0).elementarized(),
            Vector::new(0.0, -3.0, 0.0)
        );
        assert_eq!(
            Vector::new(-5.0, 1.0, 4.0).elementarized(),
            Vector::new(-5.0, 0.0, 0.0)
        );
        assert_eq!(
            Vector::new(1.0, 1.0, -2.0).elementarized(),
            Vector::new(0.0, 0.0, -2.0)
        );
        // Ties go to x, then y.
        assert_eq!(
            Vector::new(1.0, -1.0, 1.0).elementarized(),
            Vector::new(1.0, 0.0, 0.0)
        );
        assert_eq!(
            Vector::new(0.0, 2.0, -2.0).elementarized(),
            Vector::new(0.0, 2.0, 0.0)
        );
    }

    #[test]
    fn equals_ignore_scale_detects_collinearity_up_to_sign() {
        let v = Vector::new(1.0, 2.0, 2.0);
        assert!(v.equals_ignore_scale(v.scaled(4.0)));
        assert!(v.equals_ignore_scale(v.scaled(-0.5)));
        assert!(!v.equals_ignore_scale(Vector::new(1.0, 2.0, 2.5)));
        assert!(!v.equals_ignore_scale(Vector::NULL));
    }

    #[test]
    fn rotate_xyz_cycles_components() {
        let v = Vector::new(1.0, 2.0, 3.0);
        assert_eq!(v.rotated_xyz(), Vector::new(2.0, 3.0, 1.0));
        assert_eq!(v.rotated_xyz().rotated_xyz().rotated_xyz(), v);
    }

    #[test]
    fn rounded_truncates_towards_zero() {
        let v = Vector::new(1.23456, -1.23456, 0.0009).rounded(3);
        assert_abs_diff_eq!(v, Vector::new(1.234, -1.234, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn pitch_and_yaw_round_trip() {
        for (pitch, yaw) in [(0.0, 0.0), (30.0, 45.0), (-60.0, 170.0), (10.0, -90.0)] {
            let v = Vector::from_pitch_yaw(pitch, yaw);
            assert_abs_diff_eq!(v.magnitude(), 1.0, epsilon = 1e-12);
            let (p, y) = v.pitch_yaw();
            assert_abs_diff_eq!(p, pitch, epsilon = 1e-9);
            assert_abs_diff_eq!(y, yaw, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(
            Vector::from_pitch_yaw(0.0, 0.0),
            Vector::E_Z,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            Vector::from_pitch_yaw(90.0, 0.0),
            -Vector::E_Y,
            epsilon = 1e-12
        );
    }

    #[test]
    fn faces_round_trip_through_vectors() {
        for index in 0..6 {
            let v = Vector::derive_from_face(index).unwrap();
            assert_eq!(v.face_index(), index);
            assert_eq!(v.scaled(2.5).face_index(), index);
        }
        assert_eq!(Vector::derive_from_face(6), None);
        assert_eq!(Vector::NULL.face(), None);
        assert_eq!(Vector::NULL.face_index(), crate::NO_FACE);
        assert_eq!(Vector::new(0.3, -0.9, 0.1).face(), Some(Face::Down));
        assert_eq!(Vector::new(-2.0, 0.9, 0.1).face(), Some(Face::West));
    }

    #[test]
    fn serializes_as_tuple_and_recomputes_magnitude() {
        let v = Vector::new(3.0, 0.0, 4.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[3.0,0.0,4.0]");
        let back: Vector = serde_json::from_str(&json).unwrap();
        assert_eq!(back.magnitude(), 5.0);
    }

    #[test]
    fn display_truncates_magnitude() {
        let v = Vector::new(1.0, 1.0, 0.0);
        assert_eq!(v.to_string(), "v(1|1|0), |v| == 1.414");
    }
}
