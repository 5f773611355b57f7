//! Core types for the marga pathfinding library.
//!
//! - [`Point3`] and [`NodeKey`]: world positions and discrete cell identity
//! - [`GridQuantizer`]: continuous position → grid point mapping

mod grid;
mod point;

pub use grid::GridQuantizer;
pub use point::{NodeKey, Point3};
