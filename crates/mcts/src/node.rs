//! Search tree node representation.
//!
//! Each node wraps the packing state reached by one placement from its
//! parent and carries the visit/reward statistics UCT selection consumes.

use boxpack_core::{PackingState, Placement};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Parent node index (NONE for the root)
    pub parent: NodeId,

    /// The placement that produced this node's state (None for the root)
    pub placement: Option<Placement>,

    /// Packing state at this node
    pub state: PackingState,

    /// Child node indices
    pub children: Vec<NodeId>,

    /// Legal placements not yet expanded into children
    pub untried: Vec<Placement>,

    /// Number of times this node has been visited by backpropagation
    pub visit_count: u32,

    /// Sum of rollout rewards backpropagated through this node
    pub total_reward: f64,
}

impl SearchNode {
    /// Creates a root node. Its untried actions are the state's legal moves.
    pub fn new_root(state: PackingState) -> Self {
        let untried = state.legal_moves();
        Self {
            parent: NodeId::NONE,
            placement: None,
            state,
            children: Vec::new(),
            untried,
            visit_count: 0,
            total_reward: 0.0,
        }
    }

    /// Creates a child node for the state reached via `placement`.
    pub fn new_child(parent: NodeId, placement: Placement, state: PackingState) -> Self {
        let untried = state.legal_moves();
        Self {
            parent,
            placement: Some(placement),
            state,
            children: Vec::new(),
            untried,
            visit_count: 0,
            total_reward: 0.0,
        }
    }

    /// Mean rollout reward, 0.0 if never visited.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.total_reward / self.visit_count as f64
        }
    }

    /// UCT score for child selection:
    /// `mean + c·√(2·ln(parent_visits)/visits)`.
    ///
    /// An unvisited child scores infinite so it is always selected before
    /// revisiting siblings; the division by `visit_count` is therefore
    /// never reached with zero.
    #[inline]
    pub fn uct_score(&self, parent_visits: u32, c: f64) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }
        let exploitation = self.total_reward / self.visit_count as f64;
        let exploration =
            c * (2.0 * (parent_visits as f64).ln() / self.visit_count as f64).sqrt();
        exploitation + exploration
    }

    /// True once every legal placement has been expanded into a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// True if this node's state admits no further placement: nothing
    /// pending, or no action existed when the node was created.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.pending().is_empty() || (self.untried.is_empty() && self.children.is_empty())
    }
}
