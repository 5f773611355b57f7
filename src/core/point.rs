//! Point and cell-key types for the navigation grid.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// World position in meters. Y is up; X and Z span the horizontal plane
/// the agent walks on.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate in meters (horizontal)
    pub x: f32,
    /// Y coordinate in meters (up, resolved from the terrain surface)
    pub y: f32,
    /// Z coordinate in meters (horizontal)
    pub z: f32,
}

impl Point3 {
    /// Create a new point
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero point (origin)
    pub const ZERO: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point3) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Distance ignoring the vertical axis
    #[inline]
    pub fn horizontal_distance(&self, other: &Point3) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Sum of absolute per-axis deltas, all three axes included.
    /// Historical fast heuristic; not admissible once diagonal movement
    /// is allowed.
    #[inline]
    pub fn manhattan_distance(&self, other: &Point3) -> f32 {
        (other.x - self.x).abs() + (other.y - self.y).abs() + (other.z - self.z).abs()
    }

    /// Copy of this point with a different height
    #[inline]
    pub fn with_height(&self, y: f32) -> Point3 {
        Point3::new(self.x, y, self.z)
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// Canonical discrete identity of a grid cell.
///
/// Derived from the two quantized horizontal axes only. Height is never
/// part of identity because the surface is sampled on demand; two probes
/// of the same cell must collapse to one key regardless of what height
/// the oracle resolved for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NodeKey {
    /// Quantized X cell index
    pub x: i32,
    /// Quantized Z cell index
    pub z: i32,
}

impl NodeKey {
    /// Create a new key
    #[inline]
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Key shifted by whole cells
    #[inline]
    pub fn offset(&self, dx: i32, dz: i32) -> NodeKey {
        NodeKey::new(self.x + dx, self.z + dz)
    }
}
