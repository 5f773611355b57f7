//! Path post-processing.
//!
//! Turns a goal-rooted node chain into the waypoint list handed to a
//! movement controller:
//!
//! - reconstruction into start→goal order
//! - goal-overshoot correction against the true (unquantized) target
//! - string-pulling smoothing via line-of-sight pruning

use std::collections::HashMap;

use log::debug;

use crate::core::{NodeKey, Point3};
use crate::error::{MargaError, Result};
use crate::search::SearchNode;
use crate::terrain::TerrainOracle;

/// Finished product of a successful search.
#[derive(Clone, Debug)]
pub struct PathResult {
    /// Ordered waypoints, start→goal; the last one is the exact target
    pub waypoints: Vec<Point3>,
    /// Accumulated movement cost of the goal node
    pub cost: f32,
    /// Nodes expanded by the search
    pub nodes_expanded: usize,
}

/// Walk parent links from the node at goal back to the start and return
/// positions in start→goal order. The parent-less start node itself is
/// excluded; the agent already stands there.
///
/// Every parent key must resolve in the closed set; nodes are only ever
/// linked to already-expanded predecessors, so a missing parent means the
/// chain is corrupt and fails with [`MargaError::Desync`] rather than
/// yielding a truncated path.
pub fn reconstruct(
    closed: &HashMap<NodeKey, SearchNode>,
    last: &SearchNode,
) -> Result<Vec<Point3>> {
    let mut positions = Vec::new();
    let mut current = last;
    while let Some(parent_key) = current.parent() {
        positions.push(current.position());
        current = closed
            .get(&parent_key)
            .ok_or(MargaError::Desync { key: parent_key })?;
    }
    positions.reverse();
    Ok(positions)
}

/// Drop the final grid waypoint when it overshoots the true target, then
/// append the target itself as the final waypoint.
///
/// The comparison needs two preceding waypoints; shorter paths skip it
/// and degenerate to a direct segment toward the target.
pub fn correct_overshoot(waypoints: &mut Vec<Point3>, target: Point3) {
    if waypoints.len() >= 2 {
        let last = waypoints[waypoints.len() - 1];
        let before = waypoints[waypoints.len() - 2];
        let direct = before.distance(&target);
        let through_last = before.distance(&last) + last.distance(&target);
        if direct < through_last {
            debug!("[Path] dropping overshooting waypoint ({:.2},{:.2},{:.2})", last.x, last.y, last.z);
            waypoints.pop();
        }
    }
    waypoints.push(target);
}

/// String-pulling smoothing.
///
/// For each pass, remove waypoint i+1 whenever the direct i→i+2 segment
/// is strictly shorter than the two-segment detour (the three points are
/// not collinear) and the oracle confirms the direct segment is walkable.
/// After a removal the scan continues at the same index against the
/// shrunk list.
pub fn smooth<O: TerrainOracle>(waypoints: &mut Vec<Point3>, oracle: &O, passes: usize) {
    for _ in 0..passes {
        let mut i = 0;
        while i + 2 < waypoints.len() {
            let direct = waypoints[i].distance(&waypoints[i + 2]);
            let detour = waypoints[i].distance(&waypoints[i + 1])
                + waypoints[i + 1].distance(&waypoints[i + 2]);
            if direct < detour && oracle.query_segment(waypoints[i], waypoints[i + 2]).is_some()
            {
                waypoints.remove(i + 1);
            } else {
                i += 1;
            }
        }
    }
}

/// Total length of a waypoint sequence.
pub fn path_length(waypoints: &[Point3]) -> f32 {
    if waypoints.len() < 2 {
        return 0.0;
    }
    waypoints.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
