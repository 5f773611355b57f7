//! Sampled-heightmap terrain oracle.
//!
//! A rectangular grid of surface samples with per-cell heights, optional
//! surface tags, and blocked flags. Applies the maximum-slope and
//! exclusion-category rules the [`TerrainOracle`] contract requires.

use std::collections::HashSet;

use log::trace;

use super::TerrainOracle;
use crate::config::PathfinderConfig;
use crate::core::Point3;

/// One sampled surface cell.
#[derive(Clone, Debug, Default)]
struct SurfaceCell {
    height: f32,
    blocked: bool,
    tag: Option<String>,
}

/// Heightmap-backed terrain oracle.
///
/// Cells sit at integer multiples of `cell_size` starting at the origin,
/// `width` cells along X and `depth` cells along Z. Positions outside the
/// field are never walkable.
pub struct HeightField {
    width: usize,
    depth: usize,
    cell_size: f32,
    cells: Vec<SurfaceCell>,
    max_slope_deg: f32,
    exclusions: HashSet<String>,
}

impl HeightField {
    /// Create a flat field at height zero.
    pub fn flat(width: usize, depth: usize, cell_size: f32) -> Self {
        Self {
            width,
            depth,
            cell_size,
            cells: vec![SurfaceCell::default(); width * depth],
            max_slope_deg: 45.0,
            exclusions: HashSet::new(),
        }
    }

    /// Take the maximum traversal slope and the surface-tag blocklist
    /// from a pathfinder configuration, so the oracle enforces the same
    /// limits the search was configured with.
    pub fn with_config(self, config: &PathfinderConfig) -> Self {
        self.with_max_slope(config.max_traversal_angle_deg)
            .with_exclusions(config.exclusion_categories.clone())
    }

    /// Set the maximum traversal slope in degrees.
    pub fn with_max_slope(mut self, degrees: f32) -> Self {
        self.max_slope_deg = degrees;
        self
    }

    /// Set the surface-tag blocklist.
    pub fn with_exclusions(mut self, exclusions: HashSet<String>) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Set the surface height of one cell.
    pub fn set_height(&mut self, x: usize, z: usize, height: f32) {
        if let Some(idx) = self.index(x, z) {
            self.cells[idx].height = height;
        }
    }

    /// Mark one cell as blocked (e.g. solid obstacle).
    pub fn set_blocked(&mut self, x: usize, z: usize) {
        if let Some(idx) = self.index(x, z) {
            self.cells[idx].blocked = true;
        }
    }

    /// Tag one cell with a surface category (e.g. "water").
    pub fn set_tag(&mut self, x: usize, z: usize, tag: &str) {
        if let Some(idx) = self.index(x, z) {
            self.cells[idx].tag = Some(tag.to_string());
        }
    }

    fn index(&self, x: usize, z: usize) -> Option<usize> {
        if x < self.width && z < self.depth {
            Some(z * self.width + x)
        } else {
            None
        }
    }

    /// Cell under a world position, or `None` outside the field.
    fn cell_at(&self, position: Point3) -> Option<&SurfaceCell> {
        let cx = (position.x / self.cell_size).round();
        let cz = (position.z / self.cell_size).round();
        if cx < 0.0 || cz < 0.0 {
            return None;
        }
        self.index(cx as usize, cz as usize).map(|i| &self.cells[i])
    }

    /// Angle of the local surface normal against up, in degrees,
    /// estimated from neighboring cell heights by central differences.
    fn surface_slope_deg(&self, position: Point3) -> f32 {
        let sample = |dx: f32, dz: f32| {
            self.cell_at(Point3::new(position.x + dx, 0.0, position.z + dz))
                .map(|c| c.height)
        };
        let here = match sample(0.0, 0.0) {
            Some(h) => h,
            None => return 90.0,
        };
        let step = self.cell_size;
        let gx = (sample(step, 0.0).unwrap_or(here) - sample(-step, 0.0).unwrap_or(here))
            / (2.0 * step);
        let gz = (sample(0.0, step).unwrap_or(here) - sample(0.0, -step).unwrap_or(here))
            / (2.0 * step);
        (gx * gx + gz * gz).sqrt().atan().to_degrees()
    }

    /// Cell-level walkability: in bounds, not blocked, tag not excluded.
    fn cell_ok(&self, position: Point3) -> Option<f32> {
        let cell = self.cell_at(position)?;
        if cell.blocked {
            return None;
        }
        if let Some(tag) = &cell.tag {
            if self.exclusions.contains(tag) {
                trace!("[HeightField] excluded tag '{}' at ({:.2},{:.2})", tag, position.x, position.z);
                return None;
            }
        }
        Some(cell.height)
    }
}

impl TerrainOracle for HeightField {
    fn query_segment(&self, from: Point3, to: Point3) -> Option<f32> {
        let height = self.cell_ok(to)?;
        let resolved = to.with_height(height);

        // Slope of the step itself
        let run = from.horizontal_distance(&resolved);
        let rise = (resolved.y - from.y).abs();
        let step_slope = if run > f32::EPSILON {
            (rise / run).atan().to_degrees()
        } else if rise > f32::EPSILON {
            90.0
        } else {
            0.0
        };
        if step_slope > self.max_slope_deg {
            return None;
        }

        // Slope of the surface under the destination
        if self.surface_slope_deg(resolved) > self.max_slope_deg {
            return None;
        }

        // Intermediate cells along the segment must also be walkable, so
        // line-of-sight shortcuts cannot pass through obstacles.
        let steps = (run / (self.cell_size * 0.5)).ceil() as usize;
        for i in 1..steps {
            let t = i as f32 / steps as f32;
            let probe = Point3::new(
                from.x + t * (to.x - from.x),
                0.0,
                from.z + t * (to.z - from.z),
            );
            self.cell_ok(probe)?;
        }

        Some(height)
    }

    fn query_point(&self, position: Point3) -> bool {
        self.cell_ok(position).is_some()
            && self.surface_slope_deg(position) <= self.max_slope_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_field_walkable() {
        let field = HeightField::flat(5, 5, 1.0);
        assert!(field.query_point(Point3::new(2.0, 0.0, 2.0)));
        let h = field.query_segment(Point3::ZERO, Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(h.unwrap(), 0.0);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let field = HeightField::flat(5, 5, 1.0);
        assert!(!field.query_point(Point3::new(-1.0, 0.0, 0.0)));
        assert!(field
            .query_segment(Point3::ZERO, Point3::new(0.0, 0.0, 9.0))
            .is_none());
    }

    #[test]
    fn test_blocked_cell_rejected() {
        let mut field = HeightField::flat(5, 5, 1.0);
        field.set_blocked(2, 2);
        assert!(!field.query_point(Point3::new(2.0, 0.0, 2.0)));
    }

    #[test]
    fn test_excluded_tag_rejected() {
        let mut field = HeightField::flat(5, 5, 1.0);
        field.set_tag(1, 1, "water");
        let field = field.with_exclusions(["water".to_string()].into_iter().collect());
        assert!(!field.query_point(Point3::new(1.0, 0.0, 1.0)));
        // Untagged neighbor stays fine
        assert!(field.query_point(Point3::new(2.0, 0.0, 1.0)));
    }

    #[test]
    fn test_with_config_applies_slope_and_exclusions() {
        let config = PathfinderConfig {
            max_traversal_angle_deg: 10.0,
            exclusion_categories: ["mud".to_string()].into_iter().collect(),
            ..Default::default()
        };

        let mut field = HeightField::flat(5, 5, 1.0);
        field.set_tag(1, 0, "mud");
        field.set_height(3, 0, 0.3);
        let field = field.with_config(&config);

        assert!(!field.query_point(Point3::new(1.0, 0.0, 0.0)));
        // ~17 degrees of rise, above the configured 10 degree limit
        assert!(field
            .query_segment(Point3::new(2.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0))
            .is_none());
    }

    #[test]
    fn test_steep_step_rejected() {
        let mut field = HeightField::flat(5, 5, 1.0);
        // 2m rise over 1m run is ~63 degrees, above the 45 degree default
        field.set_height(1, 0, 2.0);
        assert!(field
            .query_segment(Point3::ZERO, Point3::new(1.0, 0.0, 0.0))
            .is_none());

        // Gentle rise passes and reports the resolved height
        let mut gentle = HeightField::flat(5, 5, 1.0);
        gentle.set_height(1, 0, 0.3);
        let h = gentle.query_segment(Point3::ZERO, Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(h.unwrap(), 0.3);
    }
}
