//! Time-sliced A* search.
//!
//! This module holds the search engine proper:
//!
//! - [`SearchNode`]: one node per grid cell considered in a session
//! - [`OpenList`]: indexed binary min-heap with O(1) key lookup
//! - [`SearchSession`]: the resumable search loop
//!
//! ## Driving a search
//!
//! ```rust,ignore
//! use marga::{SearchSession, SearchStatus, PathfinderConfig};
//!
//! let mut session = SearchSession::new(&oracle, config, start, target)?;
//! loop {
//!     match session.resume() {
//!         SearchStatus::Searching => { /* yield to the scheduler */ }
//!         SearchStatus::Found => break,
//!         SearchStatus::Failed(reason) => return Err(reason.into()),
//!     }
//! }
//! let path = session.take_result().unwrap();
//! ```

mod node;
mod open_list;
mod session;

pub use node::SearchNode;
pub use open_list::OpenList;
pub use session::{find_path, PathFailure, SearchObserver, SearchSession, SearchStatus};
