//! Coordinate-axis permutations used by the closed-form intersection solvers.
//!
//! The solvers divide by components of the operand vectors. When such a component vanishes along
//! the current axis order, the same formula is evaluated again on permuted coordinates.

use crate::Vector3;

pub type AxisOrder = [usize; 3];

/// Every ordering of the three axes, identity first.
pub const ALL_AXIS_ORDERS: [AxisOrder; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Identity and the two cyclic rotations `(x, y, z) -> (y, z, x)`.
pub const CYCLIC_AXIS_ORDERS: [AxisOrder; 3] = [[0, 1, 2], [1, 2, 0], [2, 0, 1]];

pub fn permute(v: Vector3, order: AxisOrder) -> Vector3 {
    Vector3::new(v[order[0]], v[order[1]], v[order[2]])
}

/// Evaluates `solve` for each order in sequence and returns the first finite result.
pub fn first_finite(orders: &[AxisOrder], mut solve: impl FnMut(AxisOrder) -> f64) -> Option<f64> {
    orders
        .iter()
        .map(|&order| solve(order))
        .find(|v| v.is_finite())
}
