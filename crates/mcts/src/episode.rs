//! Multi-step packing episodes: search, apply, repeat.

use crate::config::SearchConfig;
use crate::search::Searcher;
use boxpack_core::{PackingState, Placement, Result};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Result of packing a container to completion.
#[derive(Debug, Clone)]
pub struct EpisodeReport {
    /// The state reached when no further placement was possible (or the
    /// run was cancelled).
    pub final_state: PackingState,
    /// Placements applied, in order.
    pub steps: Vec<Placement>,
    /// Evaluation of the final state under the configured penalty factor.
    pub evaluation: f64,
    /// Fraction of the container volume filled.
    pub utilization: f64,
    /// Wall-clock time spent.
    pub computation_time_ms: u64,
    /// Whether the episode stopped early on cancellation.
    pub cancelled: bool,
}

/// Drives a whole packing episode: one tree search per step, applying the
/// recommended placement until no pending item or no legal move remains.
pub struct EpisodeRunner {
    config: SearchConfig,
    cancelled: Arc<AtomicBool>,
}

impl EpisodeRunner {
    /// Creates a runner; `config.iterations` is the budget per step.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns a handle to cancel an ongoing episode between steps.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Requests cancellation of an ongoing episode.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Packs from `initial` until terminal and reports the outcome.
    pub fn run<R: Rng>(&self, initial: PackingState, rng: &mut R) -> Result<EpisodeReport> {
        let start = Instant::now();
        let searcher = Searcher::new(self.config.clone());

        let mut state = initial;
        let mut steps = Vec::new();
        let mut cancelled = false;

        loop {
            if self.cancelled.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }
            let Some(placement) = searcher.recommend(&state, rng)? else {
                break;
            };
            state = state.apply(&placement)?;
            log::info!(
                "step {}: placed item {} at {:?} ({}x{}x{}), score {:.1}",
                steps.len() + 1,
                placement.item.id,
                placement.position,
                placement.rotation.width,
                placement.rotation.height,
                placement.rotation.depth,
                state.evaluation(self.config.penalty_factor)
            );
            steps.push(placement);
        }

        Ok(EpisodeReport {
            evaluation: state.evaluation(self.config.penalty_factor),
            utilization: state.utilization(),
            computation_time_ms: start.elapsed().as_millis() as u64,
            cancelled,
            steps,
            final_state: state,
        })
    }
}
