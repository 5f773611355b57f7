//! Configuration surface for the pathfinder.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::core::Point3;
use crate::error::{MargaError, Result};

/// Heuristic mode for the remaining-cost estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Sum of absolute per-axis deltas over all three axes. Cheaper but
    /// not admissible once diagonal movement is allowed; the historical
    /// default.
    #[default]
    Manhattan,
    /// True straight-line distance. Admissible, since actual movement
    /// cost is also Euclidean.
    Euclidean,
}

impl Heuristic {
    /// Estimated remaining cost from `from` to `to`.
    #[inline]
    pub fn estimate(&self, from: Point3, to: Point3) -> f32 {
        match self {
            Heuristic::Manhattan => from.manhattan_distance(&to),
            Heuristic::Euclidean => from.distance(&to),
        }
    }
}

/// Pathfinder configuration.
///
/// All fields are externally supplied and validated once, when a search
/// session is created.
#[derive(Clone, Debug, Deserialize)]
pub struct PathfinderConfig {
    /// Navigation grid resolution in meters (> 0)
    #[serde(default = "default_resolution")]
    pub resolution: f32,

    /// Maximum traversal slope in degrees, applied by the terrain oracle
    #[serde(default = "default_max_angle")]
    pub max_traversal_angle_deg: f32,

    /// Wall-clock budget for a whole search in seconds; 0 disables
    #[serde(default = "default_timeout")]
    pub search_timeout_secs: f32,

    /// Node expansions performed per resume() before suspending (>= 1)
    #[serde(default = "default_cycles")]
    pub cycles_per_resume: usize,

    /// Remaining-cost estimate mode
    #[serde(default)]
    pub heuristic: Heuristic,

    /// Surface tags the oracle must treat as out of bounds
    #[serde(default)]
    pub exclusion_categories: HashSet<String>,

    /// Line-of-sight smoothing passes over the finished path
    #[serde(default = "default_smoothing_passes")]
    pub smoothing_passes: usize,
}

fn default_resolution() -> f32 {
    1.0
}
fn default_max_angle() -> f32 {
    45.0
}
fn default_timeout() -> f32 {
    10.0
}
fn default_cycles() -> usize {
    2
}
fn default_smoothing_passes() -> usize {
    1
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            max_traversal_angle_deg: default_max_angle(),
            search_timeout_secs: default_timeout(),
            cycles_per_resume: default_cycles(),
            heuristic: Heuristic::default(),
            exclusion_categories: HashSet::new(),
            smoothing_passes: default_smoothing_passes(),
        }
    }
}

impl PathfinderConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MargaError::Config(format!("Failed to read config file: {}", e)))?;
        let config: PathfinderConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.resolution > 0.0) {
            return Err(MargaError::Config(format!(
                "resolution must be > 0, got {}",
                self.resolution
            )));
        }
        if !(self.max_traversal_angle_deg > 0.0 && self.max_traversal_angle_deg <= 90.0) {
            return Err(MargaError::Config(format!(
                "max_traversal_angle_deg must be in (0, 90], got {}",
                self.max_traversal_angle_deg
            )));
        }
        if self.search_timeout_secs < 0.0 {
            return Err(MargaError::Config(format!(
                "search_timeout_secs must be >= 0, got {}",
                self.search_timeout_secs
            )));
        }
        if self.cycles_per_resume < 1 {
            return Err(MargaError::Config(
                "cycles_per_resume must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
