//! Arena-backed search tree.
//!
//! Nodes are stored in a contiguous `Vec` and referenced by [`NodeId`]
//! indices, so parent links are plain integers rather than owning
//! back-references, and backpropagation is an iterative index walk.

use crate::node::{NodeId, SearchNode};
use boxpack_core::{PackingState, Placement, Result};

/// Search tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    root: NodeId,
}

impl SearchTree {
    /// Creates a tree whose root wraps the given state.
    pub fn new(root_state: PackingState) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Root node index (always 0).
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrows a node by index.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    /// Mutably borrows a node by index.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Total number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Selects the child of `id` maximizing the UCT score.
    pub fn select_child(&self, id: NodeId, c: f64) -> Option<NodeId> {
        let node = self.get(id);
        let parent_visits = node.visit_count;

        node.children
            .iter()
            .max_by(|a, b| {
                let score_a = self.get(**a).uct_score(parent_visits, c);
                let score_b = self.get(**b).uct_score(parent_visits, c);
                score_a
                    .partial_cmp(&score_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .copied()
    }

    /// Expands one untried placement of `id` into a new child and returns
    /// the child's index.
    ///
    /// The popped placement was legal when the node was created and the
    /// node's state is immutable, so `apply` failing here means the tree
    /// is corrupt; the error is propagated rather than swallowed.
    pub fn expand(&mut self, id: NodeId) -> Result<NodeId> {
        let placement = match self.get_mut(id).untried.pop() {
            Some(p) => p,
            None => {
                return Err(boxpack_core::Error::Internal(
                    "expand called on a fully expanded node".into(),
                ))
            }
        };
        let next_state = self.get(id).state.apply(&placement)?;

        let child = SearchNode::new_child(id, placement, next_state);
        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(child);
        self.get_mut(id).children.push(child_id);
        Ok(child_id)
    }

    /// Adds `reward` to every node from `leaf` up to the root, incrementing
    /// visit counts. Iterative, so arbitrarily deep placement sequences
    /// cannot exhaust the stack.
    pub fn backpropagate(&mut self, leaf: NodeId, reward: f64) {
        let mut current = leaf;
        while current.is_some() {
            let node = self.get_mut(current);
            node.visit_count += 1;
            node.total_reward += reward;
            current = node.parent;
        }
    }

    /// The root child with the greatest mean reward (pure exploitation,
    /// c = 0), or None if the root has no visited children.
    pub fn best_placement(&self) -> Option<&Placement> {
        let root = self.get(self.root);
        root.children
            .iter()
            .map(|&id| self.get(id))
            .filter(|node| node.visit_count > 0)
            .max_by(|a, b| {
                a.mean_reward()
                    .partial_cmp(&b.mean_reward())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .and_then(|node| node.placement.as_ref())
    }

    /// Tree shape statistics for logging.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            nodes: self.nodes.len(),
            root_visits: self.get(self.root).visit_count,
            max_depth: self.max_depth(),
        }
    }

    fn max_depth(&self) -> u32 {
        // Children always follow their parent in the arena, so one forward
        // pass computes every depth.
        let mut depths = vec![0u32; self.nodes.len()];
        let mut max = 0;
        for (i, node) in self.nodes.iter().enumerate().skip(1) {
            depths[i] = depths[node.parent.0 as usize] + 1;
            max = max.max(depths[i]);
        }
        max
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub nodes: usize,
    pub root_visits: u32,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxpack_core::BoxItem;

    fn two_item_state() -> PackingState {
        let mut state = PackingState::new(10, 10, 10).unwrap();
        state.add_item(BoxItem::new(1, 4, 4, 4)).unwrap();
        state.add_item(BoxItem::new(2, 3, 3, 3)).unwrap();
        state
    }

    #[test]
    fn test_new_tree() {
        let tree = SearchTree::new(two_item_state());
        assert_eq!(tree.len(), 1);
        assert!(tree.get(tree.root()).parent.is_none());
        // Two cubes, one space each: two untried placements.
        assert_eq!(tree.get(tree.root()).untried.len(), 2);
    }

    #[test]
    fn test_expand_creates_child() {
        let mut tree = SearchTree::new(two_item_state());
        let child_id = tree.expand(tree.root()).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(tree.root()).children, vec![child_id]);
        assert_eq!(tree.get(tree.root()).untried.len(), 1);

        let child = tree.get(child_id);
        assert_eq!(child.parent, tree.root());
        assert!(child.placement.is_some());
        assert_eq!(child.state.placed_count(), 1);
    }

    #[test]
    fn test_expand_exhausted_node_errors() {
        let mut tree = SearchTree::new(two_item_state());
        tree.expand(tree.root()).unwrap();
        tree.expand(tree.root()).unwrap();
        assert!(tree.expand(tree.root()).is_err());
    }

    #[test]
    fn test_backpropagate_walks_to_root() {
        let mut tree = SearchTree::new(two_item_state());
        let child = tree.expand(tree.root()).unwrap();
        let grandchild = tree.expand(child).unwrap();

        tree.backpropagate(grandchild, 5.0);

        for id in [grandchild, child, tree.root()] {
            assert_eq!(tree.get(id).visit_count, 1);
            assert_eq!(tree.get(id).total_reward, 5.0);
        }

        // A second backpropagation from the shallower node only touches
        // its own path.
        tree.backpropagate(child, 1.0);
        assert_eq!(tree.get(grandchild).visit_count, 1);
        assert_eq!(tree.get(child).visit_count, 2);
        assert_eq!(tree.get(tree.root()).visit_count, 2);
    }

    #[test]
    fn test_select_child_prefers_unvisited() {
        let mut tree = SearchTree::new(two_item_state());
        let first = tree.expand(tree.root()).unwrap();
        let second = tree.expand(tree.root()).unwrap();

        tree.backpropagate(first, 10.0);

        // `second` is unvisited, so its UCT score is infinite.
        let selected = tree.select_child(tree.root(), 1.4).unwrap();
        assert_eq!(selected, second);
    }

    #[test]
    fn test_best_placement_is_highest_mean() {
        let mut tree = SearchTree::new(two_item_state());
        let first = tree.expand(tree.root()).unwrap();
        let second = tree.expand(tree.root()).unwrap();

        tree.backpropagate(first, 2.0);
        tree.backpropagate(second, 8.0);

        let best = tree.best_placement().unwrap();
        assert_eq!(best, tree.get(second).placement.as_ref().unwrap());
    }

    #[test]
    fn test_best_placement_empty_root() {
        let tree = SearchTree::new(PackingState::new(5, 5, 5).unwrap());
        assert!(tree.best_placement().is_none());
    }

    #[test]
    fn test_stats_depth() {
        let mut tree = SearchTree::new(two_item_state());
        let child = tree.expand(tree.root()).unwrap();
        tree.expand(child).unwrap();

        let stats = tree.stats();
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.max_depth, 2);
    }
}
