//! Shared fixtures for the pathfinding scenario tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use marga::{GridQuantizer, Heuristic, HeightField, NodeKey, PathfinderConfig, Point3, TerrainOracle};

/// Flat, fully walkable square field at 1m resolution.
pub fn flat_field(side: usize) -> HeightField {
    HeightField::flat(side, side, 1.0)
}

/// Config with the timeout disabled so scenario runs never race the clock.
pub fn untimed_config(heuristic: Heuristic) -> PathfinderConfig {
    PathfinderConfig {
        heuristic,
        search_timeout_secs: 0.0,
        ..Default::default()
    }
}

/// Exhaustive shortest-path cost over the same oracle and edge rule the
/// engine uses. Uncached Dijkstra; fine for the small fixture grids.
pub fn brute_force_cost(
    oracle: &impl TerrainOracle,
    resolution: f32,
    start: Point3,
    goal: Point3,
) -> Option<f32> {
    let quantizer = GridQuantizer::new(resolution);
    let goal_key = quantizer.key_of(goal);

    let mut dist: HashMap<NodeKey, (f32, Point3)> = HashMap::new();
    let mut done: HashSet<NodeKey> = HashSet::new();
    dist.insert(quantizer.key_of(start), (0.0, quantizer.snap(start)));

    loop {
        let (&key, &(cost, position)) = dist
            .iter()
            .filter(|(k, _)| !done.contains(*k))
            .min_by(|a, b| a.1 .0.partial_cmp(&b.1 .0).unwrap())?;
        if key == goal_key {
            return Some(cost);
        }
        done.insert(key);

        for dz in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dz == 0 {
                    continue;
                }
                let neighbor = key.offset(dx, dz);
                if done.contains(&neighbor) {
                    continue;
                }
                let (x, z) = quantizer.horizontal_of(neighbor);
                let Some(height) = oracle.query_segment(position, Point3::new(x, 0.0, z)) else {
                    continue;
                };
                let resolved = Point3::new(x, height, z);
                let candidate = cost + position.distance(&resolved);
                let improved = dist
                    .get(&neighbor)
                    .map_or(true, |(existing, _)| candidate < *existing);
                if improved {
                    dist.insert(neighbor, (candidate, resolved));
                }
            }
        }
    }
}
