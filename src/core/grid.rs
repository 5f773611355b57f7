//! Grid quantization.
//!
//! Maps continuous positions to the nearest point of a discrete grid at a
//! configured resolution. Only the two horizontal axes are quantized; the
//! vertical axis is always re-derived from the terrain oracle, so it
//! plays no part in cell identity.

use super::{NodeKey, Point3};

/// Quantizer for a square horizontal grid.
#[derive(Clone, Copy, Debug)]
pub struct GridQuantizer {
    resolution: f32,
}

impl GridQuantizer {
    /// Create a quantizer. Resolution must be positive; the configuration
    /// layer validates this before a session is built.
    pub fn new(resolution: f32) -> Self {
        debug_assert!(resolution > 0.0);
        Self { resolution }
    }

    /// Grid resolution in meters.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Discrete key of the cell containing `position`.
    ///
    /// Two positions within rounding tolerance of the same grid point
    /// produce identical keys; the open and closed sets rely on this to
    /// collapse revisits of a cell.
    #[inline]
    pub fn key_of(&self, position: Point3) -> NodeKey {
        NodeKey::new(
            (position.x / self.resolution).round() as i32,
            (position.z / self.resolution).round() as i32,
        )
    }

    /// Snap a position to the nearest grid point. Height passes through
    /// untouched.
    #[inline]
    pub fn snap(&self, position: Point3) -> Point3 {
        let (x, z) = self.horizontal_of(self.key_of(position));
        Point3::new(x, position.y, z)
    }

    /// Horizontal world coordinates of a cell.
    #[inline]
    pub fn horizontal_of(&self, key: NodeKey) -> (f32, f32) {
        (key.x as f32 * self.resolution, key.z as f32 * self.resolution)
    }
}
