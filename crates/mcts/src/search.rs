//! The search driver: selection, rollout, backpropagation.

use crate::config::{RolloutObjective, SearchConfig};
use crate::node::NodeId;
use crate::tree::SearchTree;
use boxpack_core::{PackingState, Placement, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Statistics about one search run.
#[derive(Debug, Clone)]
pub struct SearchStats {
    /// Iterations actually executed (less than the budget if cancelled or
    /// the deadline passed).
    pub iterations_run: u32,
    /// Nodes allocated in the tree.
    pub nodes: usize,
    /// Visits accumulated at the root.
    pub root_visits: u32,
    /// Whether the run stopped early on cancellation or deadline.
    pub cancelled: bool,
}

/// Outcome of one search run: the recommendation plus statistics.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The recommended next placement, or None if the root state has no
    /// legal move.
    pub best: Option<Placement>,
    pub stats: SearchStats,
}

/// Monte Carlo Tree Search driver.
///
/// One `Searcher` can run many searches; each search builds a fresh tree
/// (trees are not persisted across calls). The searcher can be cancelled
/// from another thread via [`Searcher::cancel_handle`]; a cancelled search
/// stops between iterations and still returns a well-formed recommendation
/// from the statistics gathered so far. Cancellation is sticky: the flag
/// is never reset, so a `cancel()` issued before `run` is honored and a
/// cancelled searcher stays cancelled for subsequent runs.
pub struct Searcher {
    config: SearchConfig,
    cancelled: Arc<AtomicBool>,
}

impl Searcher {
    /// Creates a searcher with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns a handle to cancel an ongoing search.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Requests cancellation of an ongoing search.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Recommends the next placement from `state`.
    ///
    /// Returns `Ok(None)` when the state has no legal move.
    pub fn recommend<R: Rng>(
        &self,
        state: &PackingState,
        rng: &mut R,
    ) -> Result<Option<Placement>> {
        Ok(self.run(state, rng)?.best)
    }

    /// Runs a full search and returns the recommendation with statistics.
    pub fn run<R: Rng>(&self, state: &PackingState, rng: &mut R) -> Result<SearchOutcome> {
        if !state.has_legal_move() {
            return Ok(SearchOutcome {
                best: None,
                stats: SearchStats {
                    iterations_run: 0,
                    nodes: 1,
                    root_visits: 0,
                    cancelled: false,
                },
            });
        }

        let deadline = self.config.time_limit.map(|limit| Instant::now() + limit);

        let mut tree = SearchTree::new(state.clone());
        let mut iterations_run = 0;
        let mut stopped_early = false;

        for _ in 0..self.config.iterations {
            if self.cancelled.load(Ordering::Relaxed) {
                stopped_early = true;
                break;
            }
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    stopped_early = true;
                    break;
                }
            }

            let frontier = tree_policy(&mut tree, self.config.exploration_constant)?;
            let reward = rollout(&tree.get(frontier).state, &self.config, rng)?;
            tree.backpropagate(frontier, reward);
            iterations_run += 1;
        }

        let tree_stats = tree.stats();
        log::debug!(
            "search finished: {} iterations, {} nodes, depth {}",
            iterations_run,
            tree_stats.nodes,
            tree_stats.max_depth
        );

        Ok(SearchOutcome {
            best: tree.best_placement().copied(),
            stats: SearchStats {
                iterations_run,
                nodes: tree_stats.nodes,
                root_visits: tree_stats.root_visits,
                cancelled: stopped_early,
            },
        })
    }
}

/// Selection + expansion: descends through fully expanded nodes by UCT and
/// expands the first node with untried placements. Returns the frontier
/// node (the node itself when terminal).
fn tree_policy(tree: &mut SearchTree, c: f64) -> Result<NodeId> {
    let mut current = tree.root();
    loop {
        let node = tree.get(current);
        if node.is_terminal() {
            return Ok(current);
        }
        if !node.is_fully_expanded() {
            return tree.expand(current);
        }
        match tree.select_child(current, c) {
            Some(child) => current = child,
            // Fully expanded with no children can only mean terminal,
            // handled above; guard anyway.
            None => return Ok(current),
        }
    }
}

/// Random play-out: applies uniformly random legal placements until no item
/// or no move remains, then scores the terminal state.
fn rollout<R: Rng>(state: &PackingState, config: &SearchConfig, rng: &mut R) -> Result<f64> {
    let mut current = state.clone();
    loop {
        if current.pending().is_empty() {
            break;
        }
        let moves = current.legal_moves();
        let Some(placement) = moves.choose(rng) else {
            break;
        };
        current = current.apply(placement)?;
    }

    Ok(match config.rollout_objective {
        RolloutObjective::PlacedVolume => current.placed_volume() as f64,
        RolloutObjective::PenalizedScore => current.evaluation(config.penalty_factor),
    })
}

/// Convenience function: one search with a fresh [`Searcher`].
pub fn search<R: Rng>(
    state: &PackingState,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<Option<Placement>> {
    Searcher::new(config.clone()).recommend(state, rng)
}
