//! Integer lattice addressing for cells of the unit grid, and its face-index conventions.
//!
//! Queries against the world stored in the lattice are left to the host.

mod point;
mod vector;

pub use point::*;
pub use vector::*;
