//! Analytic geometry in 3-space: points, direction vectors, parametric lines and planes with
//! bounded hit areas.

mod area;
mod bounds3;
mod face;
mod line;
mod permutation;
mod plane;
mod point;
mod settings;
mod vector;

pub use area::*;
pub use bounds3::*;
pub use face::*;
pub use line::*;
pub use plane::*;
pub use point::*;
pub use settings::*;
pub use vector::*;

/// Default tolerance of [`Point::is_close_to`].
pub const DEFAULT_CLOSE_EPSILON: f64 = 0.1;

pub trait Contains<Other> {
    fn contains(&self, other: Other) -> bool;
}

pub type Vector3 = glam::DVec3;
