//! # Marga: Time-Sliced A* Pathfinding
//!
//! A pathfinding library for agents walking an uneven, continuously
//! sampled surface. The search runs as a classical A* over an implicit
//! grid, but in bounded increments: each `resume()` expands a configured
//! number of nodes and suspends, so a long search cooperates with the
//! caller's scheduling loop instead of blocking it.
//!
//! ## Features
//!
//! - **Ad-hoc grid**: no precomputed navigation data; the surface is
//!   sampled on demand through a [`TerrainOracle`], one query per
//!   candidate edge
//! - **Indexed open list**: binary min-heap with an O(1) key→index map,
//!   kept in lockstep and guarded against desynchronization
//! - **Resumable sessions**: explicit time slicing with a wall-clock
//!   timeout and cooperative cancellation
//! - **Path post-processing**: goal-overshoot correction and
//!   line-of-sight smoothing of the grid path
//!
//! ## Quick Start
//!
//! ```rust
//! use marga::{find_path, HeightField, PathfinderConfig, Point3, SearchStatus};
//!
//! // 10x10 flat surface sampled at 1m
//! let terrain = HeightField::flat(10, 10, 1.0);
//!
//! let (status, path) = find_path(
//!     &terrain,
//!     PathfinderConfig::default(),
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(7.0, 0.0, 7.0),
//! )
//! .unwrap();
//!
//! assert_eq!(status, SearchStatus::Found);
//! let path = path.unwrap();
//! assert_eq!(*path.waypoints.last().unwrap(), Point3::new(7.0, 0.0, 7.0));
//! ```
//!
//! ## Coordinate Frame
//!
//! Y is up. X and Z span the horizontal plane and are the only axes that
//! are quantized; surface height is always re-resolved by the oracle, so
//! it never participates in cell identity.
//!
//! ## Architecture
//!
//! - [`core`]: fundamental types ([`Point3`], [`NodeKey`], [`GridQuantizer`])
//! - [`terrain`]: the [`TerrainOracle`] seam and the [`HeightField`]
//!   reference adapter
//! - [`search`]: the open list and the resumable [`SearchSession`]
//! - [`path`]: reconstruction, overshoot correction, smoothing
//! - [`config`]: externally supplied parameters, TOML-loadable

pub mod config;
pub mod core;
pub mod error;
pub mod path;
pub mod search;
pub mod terrain;

pub use config::{Heuristic, PathfinderConfig};
pub use core::{GridQuantizer, NodeKey, Point3};
pub use error::{MargaError, Result};
pub use path::{path_length, PathResult};
pub use search::{
    find_path, OpenList, PathFailure, SearchNode, SearchObserver, SearchSession, SearchStatus,
};
pub use terrain::{HeightField, TerrainOracle};
