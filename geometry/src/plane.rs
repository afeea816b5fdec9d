use std::{fmt, rc::Rc};

use anyhow::{Result, bail};
use log::{debug, warn};

use crate::{
    Action, Area, Contains, Line, PlaneFallback, Point, Settings, Vector, Vector3,
    permutation::{CYCLIC_AXIS_ORDERS, first_finite, permute},
};

/// A parametric plane `origin + k * supports[0] + l * supports[1]` with a list of hit areas.
///
/// The plane is degenerate when the supports are collinear. This is not checked.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point,
    supports: [Vector; 2],
    areas: Vec<Area>,
    settings: Settings,
}

impl Plane {
    pub fn new(origin: Point, support0: Vector, support1: Vector) -> Self {
        Self {
            origin,
            supports: [support0, support1],
            areas: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// The plane through the three points, `p1` is the origin.
    pub fn from_points(p1: Point, p2: Point, p3: Point) -> Self {
        Self::new(p1, p2 - p1, p3 - p1)
    }

    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn supports(&self) -> [Vector; 2] {
        self.supports
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn point_at(&self, k: f64, l: f64) -> Point {
        self.origin + self.supports[0] * k + self.supports[1] * l
    }

    pub fn normal(&self) -> Vector {
        self.supports[0].cross(self.supports[1])
    }

    pub fn is_parallel(&self, other: &Plane) -> bool {
        self.normal().equals_ignore_scale(other.normal())
    }

    /// Registers an area bounded by `boundary` that fires `action` when hit.
    ///
    /// Fails and leaves the plane unchanged if there are fewer than two boundary points or one of
    /// them does not lie in the plane.
    pub fn add_field(
        &mut self,
        action: impl Action + 'static,
        boundary: impl Into<Vec<Point>>,
    ) -> Result<()> {
        self.add_shared_field(Rc::new(action), boundary)
    }

    /// Like [`Plane::add_field`], for an action that may be shared between areas.
    pub fn add_shared_field(
        &mut self,
        action: Rc<dyn Action>,
        boundary: impl Into<Vec<Point>>,
    ) -> Result<()> {
        let boundary = boundary.into();
        if boundary.len() < 2 {
            debug!("Rejected area with {} boundary points", boundary.len());
            bail!(
                "An area needs at least two boundary points, got {}",
                boundary.len()
            );
        }
        if let Some(outside) = boundary.iter().find(|p| !self.contains(**p)) {
            debug!("Rejected area, {outside} is not in {self}");
            bail!("Boundary point {outside} does not lie in the plane");
        }
        self.areas.push(Area::new(action, boundary));
        Ok(())
    }

    /// Fires the action of every area containing `point`, in registration order. Returns the
    /// number of actions fired.
    pub fn hit(&self, point: Point) -> usize {
        if !self.contains(point) {
            return 0;
        }
        let mut fired = 0;
        for area in &self.areas {
            if area.is_hit(point, self.settings.polygon_hit) {
                area.fire();
                fired += 1;
            }
        }
        fired
    }

    /// The point where `line` crosses the plane.
    ///
    /// The three unknowns (two plane parameters and the line parameter) are solved in closed form.
    /// When that divides by a vanishing component, the coordinates of all operands are rotated
    /// together, up to three axis orders, and if that fails the same is tried with the supports
    /// swapped. `None` if the line is parallel to the plane.
    pub fn intersect_line(&self, line: &Line) -> Option<Point> {
        // Rounding in the closed form turns a zero denominator into a tiny one.
        if self.normal().dot(line.support) == 0.0 {
            debug!("{line} is parallel to {self}");
            return None;
        }

        let q = self.origin.to_vector3();
        let [e1, e2] = self.supports.map(Vector::to_vector3);
        let p = line.origin.to_vector3();
        let v = line.support.to_vector3();

        let t = [(e1, e2), (e2, e1)].into_iter().find_map(|(e1, e2)| {
            first_finite(&CYCLIC_AXIS_ORDERS, |order| {
                solve_plane_line(
                    permute(q, order),
                    permute(e1, order),
                    permute(e2, order),
                    permute(p, order),
                    permute(v, order),
                )
            })
        });

        let Some(t) = t else {
            debug!("No intersection between {self} and {line}");
            return None;
        };
        let r = line.point_at(t);
        if !r.is_valid() {
            warn!("Invalid intersection {r} at t = {t} of {self} and {line}");
            return None;
        }
        Some(r)
    }

    /// The line shared by the two planes, `None` for parallel planes.
    ///
    /// The points are found by intersecting the rays along this plane's supports with `other`. A
    /// ray parallel to `other` is substituted as configured by [`PlaneFallback`].
    pub fn intersect_plane(&self, other: &Plane) -> Option<Line> {
        if self.is_parallel(other) {
            return None;
        }

        let [s0, s1] = self.supports;
        let ray = |direction: Vector| other.intersect_line(&Line::new(self.origin, direction));

        let p1 = ray(s0).or_else(|| ray(s0 + s1));
        let p2 = ray(s1).or_else(|| match self.settings.plane_fallback {
            PlaneFallback::SharedDiagonal => ray(s0 + s1),
            PlaneFallback::DistinctDiagonals => ray(s0 - s1),
        });
        let (p1, p2) = (p1?, p2?);

        if p1 == p2 {
            // Both rays meet `other` at the origin.
            return Some(Line::new(p1, self.normal().cross(other.normal())));
        }
        Some(Line::from_points(p1, p2))
    }

    /// This plane rotated by `angle` degrees around `axis`, areas included.
    ///
    /// The points are rotated with the configured [`AxisRotation`](crate::AxisRotation).
    /// The three points `origin`, `origin + supports[0]`, `origin + supports[1]` are rotated and
    /// the plane is rebuilt from them. `None` if any rotation fails.
    pub fn rotated_along(&self, axis: &Line, angle: f64) -> Option<Plane> {
        let rotate = |p: Point| axis.rotate_along_with(p, angle, self.settings.axis_rotation);

        let origin = rotate(self.origin)?;
        let p1 = rotate(self.origin + self.supports[0])?;
        let p2 = rotate(self.origin + self.supports[1])?;

        let areas = self
            .areas
            .iter()
            .map(|area| {
                let boundary = area
                    .boundary()
                    .iter()
                    .map(|p| rotate(*p))
                    .collect::<Option<Vec<_>>>()?;
                Some(area.with_boundary(boundary))
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            origin,
            supports: [p1 - origin, p2 - origin],
            areas,
            settings: self.settings,
        })
    }

    /// This plane moved by `v`, areas included.
    #[must_use]
    pub fn translated(&self, v: Vector) -> Plane {
        Self {
            origin: self.origin + v,
            supports: self.supports,
            areas: self
                .areas
                .iter()
                .map(|area| area.with_boundary(area.boundary().iter().map(|p| *p + v).collect()))
                .collect(),
            settings: self.settings,
        }
    }
}

/// Line parameter of `p + l * v` where it meets `q + m * e1 + n * e2`.
fn solve_plane_line(q: Vector3, e1: Vector3, e2: Vector3, p: Vector3, v: Vector3) -> f64 {
    let a = (e2.y - e2.x * v.y / v.x) / (e1.x * v.y / v.x - e1.y);
    let b = (q.y - p.y - (q.x - p.x) * v.y / v.x) / (e1.x * v.y / v.x - e1.y);
    let c = a * e1.x / v.x + e2.x / v.x;
    let d = b * e1.x / v.x + (q.x - p.x) / v.x;
    let f = (q.z - p.z - d * v.z + b * e1.z) / (c * v.z - e2.z - a * e1.z);
    f * c + d
}

/// `origin -> p` is perpendicular to the normal.
///
/// The dot product is compared exactly against zero, so points that accumulated rounding errors
/// may be rejected.
impl Contains<Point> for Plane {
    fn contains(&self, p: Point) -> bool {
        (p - self.origin).dot(self.normal()) == 0.0
    }
}

/// Same plane: parallel and `other`'s origin lies in `self`. Areas are not compared.
impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        self.is_parallel(other) && self.contains(other.origin)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "E: x = {} + k * {} + l * {}",
            self.origin, self.supports[0], self.supports[1]
        )
    }
}
