use std::{
    fmt,
    ops::{Add, Sub},
};

use anyhow::{Context, Result};
use axial_geometry::{Face, Point};
use derive_more::From;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::LatticeVector;

/// The unit cell of the lattice whose minimum corner is `(x, y, z)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, From, Serialize, Deserialize)]
pub struct LatticePoint {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl LatticePoint {
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell containing `p`.
    pub fn from_point(p: Point) -> Self {
        Self::new(p.x.floor() as i32, p.y.floor() as i32, p.z.floor() as i32)
    }

    /// Moves the cell by `v`, clamped to the `i32` range.
    #[must_use]
    pub fn applied(self, v: LatticeVector) -> Self {
        Self::new(
            self.x.saturating_add(v.dx),
            self.y.saturating_add(v.dy),
            self.z.saturating_add(v.dz),
        )
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x as f64 + 0.5,
            self.y as f64 + 0.5,
            self.z as f64 + 0.5,
        )
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64, self.z as f64)
    }

    pub fn adjacent(self, face: Face) -> Self {
        self.applied(face.into())
    }

    /// The neighbor across the face with the given index. Indices outside `0..6` leave the cell
    /// where it is.
    pub fn adjacent_by_index(self, index: u8) -> Self {
        match Face::from_index(index) {
            Some(face) => self.adjacent(face),
            None => self,
        }
    }

    /// Face index of `v`'s dominant axis, [`axial_geometry::NO_FACE`] for the null vector.
    pub fn face_of(v: LatticeVector) -> u8 {
        Face::index_of(v.face())
    }

    /// `true` if `goal` lies in this cell. The minimum sides are inclusive, the maximum sides
    /// exclusive.
    pub fn is_in_cube(&self, goal: Point) -> bool {
        let inside = |min: i32, v: f64| min as f64 <= v && v < min as f64 + 1.0;
        inside(self.x, goal.x) && inside(self.y, goal.y) && inside(self.z, goal.z)
    }

    /// All cells whose coordinates differ from this one's by at most `radius` on every axis, x
    /// outermost. Cells beyond the `i32` range are left out.
    pub fn cube_around(self, radius: i32) -> impl Iterator<Item = LatticePoint> {
        let range = move |c: i32| c.saturating_sub(radius)..=c.saturating_add(radius);
        range(self.x).flat_map(move |x| {
            range(self.y).flat_map(move |y| range(self.z).map(move |z| Self::new(x, y, z)))
        })
    }

    /// A flat record with the integer fields `x`, `y` and `z`.
    pub fn to_record(&self) -> Value {
        let mut record = Map::new();
        record.insert("x".into(), self.x.into());
        record.insert("y".into(), self.y.into());
        record.insert("z".into(), self.z.into());
        Value::Object(record)
    }

    pub fn from_record(record: &Value) -> Result<Self> {
        let field = |name: &str| -> Result<i32> {
            let v = record
                .get(name)
                .and_then(Value::as_i64)
                .with_context(|| {
                    format!("Lattice record: missing or non-integer field `{name}`")
                })?;
            i32::try_from(v)
                .with_context(|| format!("Lattice record: field `{name}` out of range: {v}"))
        };
        Ok(Self::new(field("x")?, field("y")?, field("z")?))
    }
}

impl Add<LatticeVector> for LatticePoint {
    type Output = LatticePoint;

    fn add(self, rhs: LatticeVector) -> Self::Output {
        self.applied(rhs)
    }
}

impl Sub for LatticePoint {
    type Output = LatticeVector;

    fn sub(self, rhs: LatticePoint) -> Self::Output {
        LatticeVector::from_points(rhs, self)
    }
}

impl From<Point> for LatticePoint {
    fn from(p: Point) -> Self {
        Self::from_point(p)
    }
}

impl fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P({}/{}/{})", self.x, self.y, self.z)
    }
}
