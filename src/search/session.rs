//! Time-sliced A* search session.
//!
//! One session per path request. The caller's own scheduling loop drives
//! the search by calling [`SearchSession::resume`] repeatedly; each call
//! performs a bounded number of node expansions and suspends, so a long
//! search never blocks a scheduler turn. All session state (open list,
//! closed set, current node, elapsed time) persists across suspensions.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, trace};

use crate::config::PathfinderConfig;
use crate::core::{GridQuantizer, NodeKey, Point3};
use crate::error::Result;
use crate::path::{self, PathResult};
use crate::terrain::TerrainOracle;

use super::node::SearchNode;
use super::open_list::OpenList;

/// The 8 horizontal neighbor offsets in grid cells; the vertical offset
/// is always zero because height is resolved per neighbor by the oracle.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Why a session ended without a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFailure {
    /// Goal position or its quantized grid point is not walkable;
    /// reported before any expansion. Recoverable: pick another goal.
    InvalidTarget,
    /// Wall-clock budget exceeded.
    Timeout,
    /// Open list exhausted without reaching the goal; a legitimate
    /// "no path exists" outcome, not an error to alarm on.
    NoPath,
    /// Open-list key index and heap contents disagreed. Indicates a bug
    /// in the engine itself, never a legitimate search outcome.
    Desync,
    /// The session was reset before completing.
    Cancelled,
}

/// Session status as reported by [`SearchSession::resume`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// More expansions remain; resume again next turn.
    Searching,
    /// Path found; the result is available on the session.
    Found,
    /// Search ended without a path.
    Failed(PathFailure),
}

/// Instrumentation hooks invoked at well-defined points of the search.
/// All methods default to no-ops.
pub trait SearchObserver {
    /// A node was extracted from the open list and expanded.
    fn node_expanded(&mut self, _node: &SearchNode) {}
    /// The session reached a terminal status.
    fn completed(&mut self, _status: &SearchStatus) {}
}

/// Resumable A* search over an oracle-sampled surface.
pub struct SearchSession<'a, O: TerrainOracle> {
    oracle: &'a O,
    config: PathfinderConfig,
    quantizer: GridQuantizer,

    open: OpenList,
    closed: HashMap<NodeKey, SearchNode>,
    current_key: Option<NodeKey>,

    /// True, unquantized target; the final waypoint is always this.
    target: Point3,
    goal_key: NodeKey,
    /// Quantized goal the heuristic aims at (height from the target,
    /// since the vertical axis is never quantized).
    goal_point: Point3,

    started: Option<Instant>,
    nodes_expanded: usize,
    status: SearchStatus,
    result: Option<PathResult>,
    observer: Option<Box<dyn SearchObserver + 'a>>,
}

impl<'a, O: TerrainOracle> SearchSession<'a, O> {
    /// Create a session for one path request.
    ///
    /// Validates the configuration, then validates that both the exact
    /// target position and its quantized grid point are walkable. An
    /// unreachable target produces a session already in
    /// `Failed(InvalidTarget)` with an empty open list.
    pub fn new(
        oracle: &'a O,
        config: PathfinderConfig,
        start: Point3,
        target: Point3,
    ) -> Result<Self> {
        config.validate()?;
        let quantizer = GridQuantizer::new(config.resolution);
        let goal_key = quantizer.key_of(target);
        let goal_point = quantizer.snap(target);

        let mut session = Self {
            oracle,
            config,
            quantizer,
            open: OpenList::new(),
            closed: HashMap::new(),
            current_key: None,
            target,
            goal_key,
            goal_point,
            started: None,
            nodes_expanded: 0,
            status: SearchStatus::Searching,
            result: None,
            observer: None,
        };

        if !oracle.query_point(target) || !oracle.query_point(goal_point) {
            debug!(
                "[Session] FAILED: InvalidTarget at ({:.2},{:.2},{:.2})",
                target.x, target.y, target.z
            );
            session.status = SearchStatus::Failed(PathFailure::InvalidTarget);
            return Ok(session);
        }

        // Seed the open list with the start node.
        let start_point = session.quantizer.snap(start);
        let start_key = session.quantizer.key_of(start);
        let destin_cost = session.config.heuristic.estimate(start_point, goal_point);
        session.open.insert(SearchNode::new(
            start_key,
            start_point,
            0.0,
            destin_cost,
            None,
        ));
        trace!(
            "[Session] seeded: start=({},{}) goal=({},{})",
            start_key.x, start_key.z, goal_key.x, goal_key.z
        );
        Ok(session)
    }

    /// Attach an instrumentation observer.
    pub fn set_observer(&mut self, observer: Box<dyn SearchObserver + 'a>) {
        self.observer = Some(observer);
    }

    /// Current session status without advancing the search.
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Finished path, once the status is `Found`.
    pub fn result(&self) -> Option<&PathResult> {
        self.result.as_ref()
    }

    /// Take ownership of the finished path.
    pub fn take_result(&mut self) -> Option<PathResult> {
        self.result.take()
    }

    /// Nodes expanded so far.
    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    /// Perform up to `cycles_per_resume` expansions, then suspend.
    ///
    /// Within one resumption expansions happen strictly in open-list
    /// priority order, and no reordering occurs across resumptions. The
    /// timeout is measured in wall-clock time across the whole session,
    /// starting at the first resume.
    ///
    /// Resuming a finished or reset session is a caller contract
    /// violation; debug builds assert, release builds report the final
    /// status unchanged.
    pub fn resume(&mut self) -> SearchStatus {
        if self.status != SearchStatus::Searching {
            debug_assert!(
                !matches!(self.status, SearchStatus::Failed(PathFailure::Cancelled)),
                "resume() called on a cancelled session"
            );
            return self.status;
        }
        let started = *self.started.get_or_insert_with(Instant::now);

        for _ in 0..self.config.cycles_per_resume {
            if self.config.search_timeout_secs > 0.0
                && started.elapsed().as_secs_f32() >= self.config.search_timeout_secs
            {
                debug!(
                    "[Session] FAILED: Timeout after {:.3}s ({} nodes)",
                    started.elapsed().as_secs_f32(),
                    self.nodes_expanded
                );
                return self.finish(SearchStatus::Failed(PathFailure::Timeout));
            }

            // The goal test runs one extraction late: the goal node is
            // extracted and expanded like any other, and the match is
            // detected at the top of the following iteration.
            if let Some(key) = self.current_key {
                if key == self.goal_key {
                    return self.finish_found(key);
                }
            }

            let Some(node) = self.open.extract_min() else {
                debug!(
                    "[Session] FAILED: NoPath after expanding {} nodes",
                    self.nodes_expanded
                );
                return self.finish(SearchStatus::Failed(PathFailure::NoPath));
            };
            self.nodes_expanded += 1;
            self.current_key = Some(node.key());
            if let Some(observer) = self.observer.as_mut() {
                observer.node_expanded(&node);
            }

            if let Err(e) = self.expand(&node) {
                debug!("[Session] FAILED: {} - aborting", e);
                return self.finish(SearchStatus::Failed(PathFailure::Desync));
            }
            self.closed.insert(node.key(), node);
        }

        SearchStatus::Searching
    }

    /// Drive the session to a terminal status in one call. Convenience
    /// for callers without their own scheduling loop (and for tests).
    pub fn run_to_completion(&mut self) -> SearchStatus {
        loop {
            match self.resume() {
                SearchStatus::Searching => continue,
                terminal => return terminal,
            }
        }
    }

    /// Cancel the session. Any further scheduled resumption must not
    /// happen; the open and closed sets are dropped.
    pub fn reset(&mut self) {
        self.open = OpenList::new();
        self.closed.clear();
        self.current_key = None;
        self.result = None;
        self.status = SearchStatus::Failed(PathFailure::Cancelled);
    }

    /// Relax the 8 horizontal neighbors of an expanded node.
    fn expand(&mut self, node: &SearchNode) -> Result<()> {
        for (dx, dz) in NEIGHBOR_OFFSETS {
            let neighbor_key = node.key().offset(dx, dz);
            if self.closed.contains_key(&neighbor_key) {
                continue;
            }

            // One oracle sample per candidate edge; it both gates
            // traversal and resolves the neighbor's surface height.
            let (x, z) = self.quantizer.horizontal_of(neighbor_key);
            let Some(height) = self.oracle.query_segment(node.position(), Point3::new(x, 0.0, z))
            else {
                continue;
            };
            let position = Point3::new(x, height, z);

            let origin_cost = node.origin_cost() + node.position().distance(&position);

            let existing_g = self.open.lookup(neighbor_key)?.map(|n| n.origin_cost());
            match existing_g {
                Some(g) => {
                    // The existing route is no worse unless its g is
                    // strictly greater.
                    if g > origin_cost {
                        self.open.decrease_key(neighbor_key, origin_cost, node.key())?;
                    }
                }
                None => {
                    let destin_cost = self.config.heuristic.estimate(position, self.goal_point);
                    self.open.insert(SearchNode::new(
                        neighbor_key,
                        position,
                        origin_cost,
                        destin_cost,
                        Some(node.key()),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Reconstruct and post-process the path rooted at the goal node.
    fn finish_found(&mut self, goal_key: NodeKey) -> SearchStatus {
        let goal_node = match self.closed.get(&goal_key) {
            Some(node) => node,
            None => {
                // The current node is always inserted into the closed set
                // right after expansion; missing here means corruption.
                return self.finish(SearchStatus::Failed(PathFailure::Desync));
            }
        };
        let cost = goal_node.origin_cost();
        let mut waypoints = match path::reconstruct(&self.closed, goal_node) {
            Ok(waypoints) => waypoints,
            Err(e) => {
                debug!("[Session] FAILED: {} - aborting", e);
                return self.finish(SearchStatus::Failed(PathFailure::Desync));
            }
        };
        path::correct_overshoot(&mut waypoints, self.target);
        path::smooth(&mut waypoints, self.oracle, self.config.smoothing_passes);

        trace!(
            "[Session] SUCCESS: {} waypoints, cost={:.2}, nodes_expanded={}",
            waypoints.len(),
            cost,
            self.nodes_expanded
        );
        self.result = Some(PathResult {
            waypoints,
            cost,
            nodes_expanded: self.nodes_expanded,
        });
        self.finish(SearchStatus::Found)
    }

    fn finish(&mut self, status: SearchStatus) -> SearchStatus {
        self.status = status;
        if let Some(observer) = self.observer.as_mut() {
            observer.completed(&status);
        }
        status
    }
}

/// Find a path in one blocking call with the given configuration.
///
/// Returns the terminal status alongside the path so failure outcomes
/// stay distinguishable; callers that need pacing drive a
/// [`SearchSession`] themselves.
pub fn find_path<O: TerrainOracle>(
    oracle: &O,
    config: PathfinderConfig,
    start: Point3,
    target: Point3,
) -> Result<(SearchStatus, Option<PathResult>)> {
    let mut session = SearchSession::new(oracle, config, start, target)?;
    let status = session.run_to_completion();
    Ok((status, session.take_result()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::HeightField;

    fn flat_config() -> PathfinderConfig {
        PathfinderConfig {
            search_timeout_secs: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_target_fails_before_expansion() {
        let mut field = HeightField::flat(5, 5, 1.0);
        field.set_blocked(4, 4);

        let mut session = SearchSession::new(
            &field,
            flat_config(),
            Point3::ZERO,
            Point3::new(4.0, 0.0, 4.0),
        )
        .unwrap();

        assert_eq!(
            session.status(),
            SearchStatus::Failed(PathFailure::InvalidTarget)
        );
        assert_eq!(session.nodes_expanded(), 0);
        assert_eq!(
            session.resume(),
            SearchStatus::Failed(PathFailure::InvalidTarget)
        );
    }

    #[test]
    fn test_start_equals_goal_direct_segment() {
        let field = HeightField::flat(5, 5, 1.0);
        let target = Point3::new(2.2, 0.0, 1.8);

        let mut session =
            SearchSession::new(&field, flat_config(), Point3::new(2.0, 0.0, 2.0), target)
                .unwrap();
        assert_eq!(session.run_to_completion(), SearchStatus::Found);

        let result = session.take_result().unwrap();
        assert_eq!(result.waypoints, vec![target]);
    }

    #[test]
    fn test_reset_cancels() {
        let field = HeightField::flat(50, 50, 1.0);
        let mut session = SearchSession::new(
            &field,
            PathfinderConfig {
                cycles_per_resume: 1,
                search_timeout_secs: 0.0,
                ..Default::default()
            },
            Point3::ZERO,
            Point3::new(49.0, 0.0, 49.0),
        )
        .unwrap();

        assert_eq!(session.resume(), SearchStatus::Searching);
        session.reset();
        assert_eq!(
            session.status(),
            SearchStatus::Failed(PathFailure::Cancelled)
        );
    }

    #[test]
    fn test_observer_sees_expansions_and_completion() {
        use std::cell::RefCell;
        use std::rc::Rc;

        #[derive(Default)]
        struct Counter {
            expanded: usize,
            completed: Option<SearchStatus>,
        }
        struct Recorder(Rc<RefCell<Counter>>);
        impl SearchObserver for Recorder {
            fn node_expanded(&mut self, _node: &SearchNode) {
                self.0.borrow_mut().expanded += 1;
            }
            fn completed(&mut self, status: &SearchStatus) {
                self.0.borrow_mut().completed = Some(*status);
            }
        }

        let field = HeightField::flat(8, 8, 1.0);
        let counter = Rc::new(RefCell::new(Counter::default()));
        let mut session = SearchSession::new(
            &field,
            flat_config(),
            Point3::ZERO,
            Point3::new(5.0, 0.0, 5.0),
        )
        .unwrap();
        session.set_observer(Box::new(Recorder(counter.clone())));

        assert_eq!(session.run_to_completion(), SearchStatus::Found);
        let seen = counter.borrow();
        assert_eq!(seen.expanded, session.nodes_expanded());
        assert_eq!(seen.completed, Some(SearchStatus::Found));
    }
}
