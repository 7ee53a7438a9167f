//! Search configuration.

use boxpack_core::DEFAULT_PENALTY_FACTOR;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a rollout's terminal state is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RolloutObjective {
    /// Raw total placed volume: rollouts reward volume alone even though
    /// state ordering uses the penalty-adjusted evaluation.
    #[default]
    PlacedVolume,
    /// The penalty-adjusted evaluation, aligning the rollout objective
    /// with the evaluation used everywhere else.
    PenalizedScore,
}

/// Configuration for a tree search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Number of select/expand/rollout/backpropagate cycles per search.
    pub iterations: u32,

    /// UCT exploration constant `c`.
    pub exploration_constant: f64,

    /// Penalty per placed box in the evaluation.
    pub penalty_factor: f64,

    /// Terminal scoring used by rollouts.
    pub rollout_objective: RolloutObjective,

    /// Wall-clock budget for one search (None = unlimited).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration_constant: 1.4,
            penalty_factor: DEFAULT_PENALTY_FACTOR,
            rollout_objective: RolloutObjective::default(),
            time_limit: None,
        }
    }
}

impl SearchConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a small-budget configuration for tests.
    pub fn for_testing() -> Self {
        Self::default().with_iterations(50)
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the UCT exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c.max(0.0);
        self
    }

    /// Sets the per-box evaluation penalty.
    pub fn with_penalty_factor(mut self, penalty: f64) -> Self {
        self.penalty_factor = penalty.max(0.0);
        self
    }

    /// Sets the rollout scoring objective.
    pub fn with_rollout_objective(mut self, objective: RolloutObjective) -> Self {
        self.rollout_objective = objective;
        self
    }

    /// Sets the wall-clock time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}
