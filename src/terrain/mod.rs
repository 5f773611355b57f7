//! Terrain sampling interface.
//!
//! The search engine never inspects terrain directly; it asks a
//! [`TerrainOracle`] whether a candidate point is walkable and what the
//! surface height there is. Concrete sampling (physics raycast, heightmap
//! lookup, navmesh query) is an adapter supplied by the embedding
//! application. [`HeightField`] is the reference adapter this crate ships
//! and the one the test suite runs against.

mod heightfield;

pub use heightfield::HeightField;

use crate::core::Point3;

/// Walkability oracle over a continuously sampled surface.
///
/// Implementations are expected to apply the configured maximum-slope
/// check (both between the resolved surface points and of the local
/// surface normal against up) and the exclusion-category check against a
/// blocklist of surface tags. At most one sample is taken per candidate
/// neighbor edge, so queries should be cheap and synchronous.
pub trait TerrainOracle {
    /// Can the agent traverse from `from` (already resolved onto the
    /// surface) toward the horizontal position of `to`?
    ///
    /// Returns the resolved surface height at `to` when the segment is
    /// walkable, `None` otherwise. The vertical component of `to` is
    /// ignored; height is the oracle's to report.
    fn query_segment(&self, from: Point3, to: Point3) -> Option<f32>;

    /// Is the surface at `position` walkable at all? Used to validate
    /// start and goal before any search.
    fn query_point(&self, position: Point3) -> bool;
}
