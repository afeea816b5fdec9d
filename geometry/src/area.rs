use std::{fmt, rc::Rc};

use crate::{Point, PolygonHit};

/// Callback fired when a registered area of a plane is hit.
pub trait Action {
    fn on_hit(&self);
}

impl<F: Fn()> Action for F {
    fn on_hit(&self) {
        self()
    }
}

/// A bounded region of a plane, paired with the action it triggers.
///
/// Two boundary points describe a disc centered at the first point whose radius is the distance
/// to the second one. Three or more points describe a polygon, see [`PolygonHit`].
#[derive(Clone)]
pub struct Area {
    action: Rc<dyn Action>,
    boundary: Vec<Point>,
}

impl Area {
    pub(crate) fn new(action: Rc<dyn Action>, boundary: Vec<Point>) -> Self {
        Self { action, boundary }
    }

    pub fn boundary(&self) -> &[Point] {
        &self.boundary
    }

    pub(crate) fn with_boundary(&self, boundary: Vec<Point>) -> Self {
        Self::new(self.action.clone(), boundary)
    }

    pub(crate) fn fire(&self) {
        self.action.on_hit();
    }

    /// Membership of `point`, which is expected to lie in the area's plane.
    pub fn is_hit(&self, point: Point, polygon_hit: PolygonHit) -> bool {
        match self.boundary.as_slice() {
            [] | [_] => false,
            [center, rim] => center.distance_to(*rim) >= center.distance_to(point),
            [first, rest @ ..] => match polygon_hit {
                PolygonHit::Stub => false,
                PolygonHit::Triangulated => rest
                    .windows(2)
                    .any(|pair| triangle_contains(*first, pair[0], pair[1], point)),
            },
        }
    }
}

impl fmt::Debug for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Area")
            .field("boundary", &self.boundary)
            .finish_non_exhaustive()
    }
}

/// Barycentric test for a point in the triangle's plane, edges included.
fn triangle_contains(a: Point, b: Point, c: Point, p: Point) -> bool {
    let u = b - a;
    let v = c - a;
    let w = p - a;

    let (uu, uv, vv) = (u.dot(u), u.dot(v), v.dot(v));
    let (wu, wv) = (w.dot(u), w.dot(v));

    let denom = uu * vv - uv * uv;
    if denom == 0.0 {
        // Degenerate triangle.
        return false;
    }

    let beta = (vv * wu - uv * wv) / denom;
    let gamma = (uu * wv - uv * wu) / denom;
    beta >= 0.0 && gamma >= 0.0 && beta + gamma <= 1.0
}
