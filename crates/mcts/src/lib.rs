//! # Boxpack MCTS
//!
//! Monte Carlo Tree Search over [`boxpack_core::PackingState`].
//!
//! The search builds a tree of packing states incrementally. Each iteration
//! runs four phases:
//!
//! 1. **Selection**: descend from the root through fully expanded nodes,
//!    picking children by the UCT rule
//! 2. **Expansion**: at the first node with untried placements, apply one
//!    and add the resulting state as a new child
//! 3. **Rollout**: play random placements from the new state until no item
//!    or no move remains, and score the terminal state
//! 4. **Backpropagation**: add the rollout score to every node on the path
//!    back to the root
//!
//! After the iteration budget the root child with the best mean reward is
//! recommended. Nodes live in an arena (`Vec` indexed by [`NodeId`]), so
//! there are no ownership cycles and backpropagation is an iterative walk
//! over parent indices.
//!
//! ```no_run
//! use boxpack_core::{BoxItem, PackingState};
//! use boxpack_mcts::{search, SearchConfig};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn main() -> boxpack_core::Result<()> {
//! let mut state = PackingState::new(10, 10, 10)?;
//! state.add_item(BoxItem::new(1, 3, 2, 1))?;
//! state.add_item(BoxItem::new(2, 2, 2, 2))?;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let config = SearchConfig::default().with_iterations(1000);
//! if let Some(placement) = search(&state, &config, &mut rng)? {
//!     let next = state.apply(&placement)?;
//!     println!("placed item {} -> score {}", placement.item.id,
//!              next.evaluation(config.penalty_factor));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support for the config

pub mod config;
pub mod episode;
pub mod node;
pub mod search;
pub mod tree;

// Re-exports
pub use config::{RolloutObjective, SearchConfig};
pub use episode::{EpisodeReport, EpisodeRunner};
pub use node::{NodeId, SearchNode};
pub use search::{search, SearchOutcome, SearchStats, Searcher};
pub use tree::{SearchTree, TreeStats};
