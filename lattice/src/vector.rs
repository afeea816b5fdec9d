use std::fmt;

use axial_geometry::{Face, Vector};
use derive_more::{Add, From, Neg, Sub};
use serde::{Deserialize, Serialize};

use crate::LatticePoint;

/// An integer displacement between lattice cells.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Add,
    Sub,
    Neg,
    From,
    Serialize,
    Deserialize,
)]
pub struct LatticeVector {
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
}

impl LatticeVector {
    pub const NULL: Self = Self::new(0, 0, 0);

    pub const fn new(dx: i32, dy: i32, dz: i32) -> Self {
        Self { dx, dy, dz }
    }

    /// The displacement from `p1` to `p2`, clamped to the `i32` range.
    pub fn from_points(p1: LatticePoint, p2: LatticePoint) -> Self {
        Self::new(
            p2.x.saturating_sub(p1.x),
            p2.y.saturating_sub(p1.y),
            p2.z.saturating_sub(p1.z),
        )
    }

    /// The unit offset of the face with the given index, `None` for indices outside `0..6`.
    pub fn derive_from_face(index: u8) -> Option<Self> {
        Face::from_index(index).map(Self::from)
    }

    pub fn magnitude(&self) -> f64 {
        let (x, y, z) = (self.dx as f64, self.dy as f64, self.dz as f64);
        (x * x + y * y + z * z).sqrt()
    }

    #[must_use]
    pub fn negated(self) -> Self {
        -self
    }

    #[must_use]
    pub fn scaled(self, s: i32) -> Self {
        Self::new(self.dx * s, self.dy * s, self.dz * s)
    }

    /// Every component replaced by its sign.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::new(self.dx.signum(), self.dy.signum(), self.dz.signum())
    }

    /// Snaps the vector to its dominant axis. Ties prefer x over y over z.
    #[must_use]
    pub fn elementarized(self) -> Self {
        let (x, y, z) = (
            self.dx.unsigned_abs(),
            self.dy.unsigned_abs(),
            self.dz.unsigned_abs(),
        );
        if x >= y {
            if x >= z {
                Self::new(self.dx, 0, 0)
            } else {
                Self::new(0, 0, self.dz)
            }
        } else if y >= z {
            Self::new(0, self.dy, 0)
        } else {
            Self::new(0, 0, self.dz)
        }
    }

    /// The face this vector's dominant axis points out of, `None` for the null vector.
    pub fn face(&self) -> Option<Face> {
        let unit = self.elementarized().normalized();
        Face::from_offset(unit.dx, unit.dy, unit.dz)
    }

    pub fn to_vector(self) -> Vector {
        Vector::new(self.dx as f64, self.dy as f64, self.dz as f64)
    }
}

impl From<Face> for LatticeVector {
    fn from(face: Face) -> Self {
        face.offset().into()
    }
}

/// Floors every component.
impl From<Vector> for LatticeVector {
    fn from(v: Vector) -> Self {
        Self::new(
            v.dx().floor() as i32,
            v.dy().floor() as i32,
            v.dz().floor() as i32,
        )
    }
}

impl fmt::Display for LatticeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}|{}|{}), |v| == {}",
            self.dx,
            self.dy,
            self.dz,
            self.magnitude()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = LatticeVector::new(1, -2, 3);
        let b = LatticeVector::new(4, 0, -1);
        assert_eq!(a + b, LatticeVector::new(5, -2, 2));
        assert_eq!(a - b, LatticeVector::new(-3, -2, 4));
        assert_eq!(a.negated(), LatticeVector::new(-1, 2, -3));
        assert_eq!(a.scaled(3), LatticeVector::new(3, -6, 9));
        assert_eq!(LatticeVector::new(2, 3, 6).magnitude(), 7.0);
    }

    #[test]
    fn normalize_keeps_signs() {
        assert_eq!(
            LatticeVector::new(-7, 0, 3).normalized(),
            LatticeVector::new(-1, 0, 1)
        );
    }

    #[test]
    fn faces_for_all_six_directions() {
        for face in Face::ALL {
            let v = LatticeVector::from(face).scaled(4);
            assert_eq!(v.face(), Some(face));
            assert_eq!(LatticeVector::derive_from_face(face.index()), Some(v.normalized()));
        }
        assert_eq!(LatticeVector::new(-3, 2, 1).face(), Some(Face::West));
        assert_eq!(LatticeVector::new(1, -2, 2).face(), Some(Face::Down));
        assert_eq!(LatticeVector::NULL.face(), None);
        assert_eq!(LatticeVector::derive_from_face(6), None);
    }

    #[test]
    fn converts_from_floating_vectors_by_flooring() {
        assert_eq!(
            LatticeVector::from(Vector::new(1.7, -0.2, 3.0)),
            LatticeVector::new(1, -1, 3)
        );
        assert_eq!(
            LatticeVector::new(1, -1, 3).to_vector(),
            Vector::new(1.0, -1.0, 3.0)
        );
    }

    #[test]
    fn display() {
        assert_eq!(LatticeVector::new(3, 0, -4).to_string(), "(3|0|-4), |v| == 5");
    }
}
