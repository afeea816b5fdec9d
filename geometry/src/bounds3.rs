use derive_more::Constructor;

use crate::{Contains, Point};

/// An axis aligned box, `min` and `max` are expected to be sorted.
#[derive(Debug, Copy, Clone, PartialEq, Constructor)]
pub struct Bounds3 {
    pub min: Point,
    pub max: Point,
}

/// Inclusive on all sides.
impl Contains<Point> for Bounds3 {
    fn contains(&self, p: Point) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let b = Point::ORIGIN.bounding_box(Point::new(1.0, 2.0, 3.0));
        assert_eq!(b, Bounds3::new(Point::ORIGIN, Point::new(1.0, 2.0, 3.0)));
        assert!(b.contains(Point::new(1.0, 2.0, 3.0)));
        assert!(b.contains(Point::new(0.5, 0.0, 1.0)));
        assert!(!b.contains(Point::new(0.5, 2.1, 1.0)));
    }
}
