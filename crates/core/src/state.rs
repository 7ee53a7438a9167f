//! The packing state: container, pending items, history and free spaces.

use crate::error::{Error, Result};
use crate::history::PlacementLog;
use crate::item::{BoxItem, Rotation};
use crate::placement::Placement;
use crate::space::Space;

/// Default penalty subtracted from the evaluation per placed box.
///
/// Biases the search toward high-volume, few-box solutions. Callers that
/// want a different trade-off pass their own factor to
/// [`PackingState::evaluation`].
pub const DEFAULT_PENALTY_FACTOR: f64 = 10.0;

/// The state of a partially packed container.
///
/// A `PackingState` is a persistent value: [`PackingState::apply`] returns a
/// new state and leaves the receiver valid and unchanged. The placement
/// history is structurally shared between versions; the pending-item list
/// and free-space list are small and copied per move.
///
/// The free-space list starts as the single space spanning the whole
/// container and is refined by guillotine splits as items are placed.
/// Adjacent or overlapping free spaces are not merged, so the list may hold
/// redundant regions after several splits; this cannot violate the
/// non-overlap of placed items (every remainder lies inside the space it
/// was split from) but can produce duplicate candidate moves.
#[derive(Debug, Clone)]
pub struct PackingState {
    width: u32,
    height: u32,
    depth: u32,
    pending: Vec<BoxItem>,
    history: PlacementLog,
    free_spaces: Vec<Space>,
    placed_volume: u64,
}

impl PackingState {
    /// Creates an empty packing state for a container of the given
    /// dimensions. The whole container is initially one free space.
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(Error::InvalidBoundary(format!(
                "container has a zero dimension ({}x{}x{})",
                width, height, depth
            )));
        }
        Ok(Self {
            width,
            height,
            depth,
            pending: Vec::new(),
            history: PlacementLog::new(),
            free_spaces: vec![Space::new([0, 0, 0], [width, height, depth])],
            placed_volume: 0,
        })
    }

    /// Validates and appends an item to the pending list.
    ///
    /// An item larger than the container is accepted here; it simply never
    /// produces a legal move.
    pub fn add_item(&mut self, item: BoxItem) -> Result<()> {
        item.validate()?;
        if self.pending.iter().any(|b| b.id == item.id) {
            return Err(Error::InvalidItem(format!(
                "item id {} is already pending",
                item.id
            )));
        }
        let container = Space::new([0, 0, 0], [self.width, self.height, self.depth]);
        if !item.rotations().iter().any(|&r| container.fits(r)) {
            log::warn!(
                "item {} ({}x{}x{}) exceeds the container in every rotation",
                item.id,
                item.width,
                item.height,
                item.depth
            );
        }
        self.pending.push(item);
        Ok(())
    }

    /// Container extent along x.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Container extent along y.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Container extent along z.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Items not yet placed, in insertion order.
    pub fn pending(&self) -> &[BoxItem] {
        &self.pending
    }

    /// Placements applied so far.
    pub fn history(&self) -> &PlacementLog {
        &self.history
    }

    /// Current free-space decomposition.
    pub fn free_spaces(&self) -> &[Space] {
        &self.free_spaces
    }

    /// Total volume of placed items.
    pub fn placed_volume(&self) -> u64 {
        self.placed_volume
    }

    /// Number of placed items.
    pub fn placed_count(&self) -> usize {
        self.history.len()
    }

    /// Volume of the container.
    pub fn container_volume(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.depth as u64
    }

    /// Fraction of the container volume occupied by placed items.
    pub fn utilization(&self) -> f64 {
        self.placed_volume as f64 / self.container_volume() as f64
    }

    /// Pure fit test: can an item with the given rotated dimensions be
    /// placed in `space`?
    pub fn can_place(&self, space: &Space, rotation: Rotation) -> bool {
        space.fits(rotation)
    }

    /// Enumerates every legal placement from this state.
    ///
    /// For every pending item, every distinct rotation, and every free
    /// space that admits the rotation, one candidate is produced at the
    /// space's minimum corner. Only the minimum corner is tried, not other
    /// offsets within a larger space, so this under-approximates the truly
    /// reachable placements. Enumeration order is deterministic: pending
    /// items in insertion order, rotations in their fixed permutation
    /// order, spaces in list order.
    pub fn legal_moves(&self) -> Vec<Placement> {
        let mut moves = Vec::new();
        for item in &self.pending {
            for rotation in item.rotations() {
                for space in &self.free_spaces {
                    if self.can_place(space, rotation) {
                        moves.push(Placement::new(*item, space.min, rotation));
                    }
                }
            }
        }
        moves
    }

    /// Returns true if at least one legal placement exists. Early-exits,
    /// so cheaper than `!self.legal_moves().is_empty()`.
    pub fn has_legal_move(&self) -> bool {
        self.pending.iter().any(|item| {
            item.rotations()
                .iter()
                .any(|&r| self.free_spaces.iter().any(|s| s.fits(r)))
        })
    }

    /// Returns true if no further placement is possible: either every item
    /// has been placed or none of the remaining items fits anywhere.
    pub fn is_terminal(&self) -> bool {
        self.pending.is_empty() || !self.has_legal_move()
    }

    /// Applies a placement and returns the resulting state.
    ///
    /// The placed item must still be pending and some free space whose
    /// minimum corner equals the move's position must still admit the
    /// rotation; otherwise the move is stale and `Error::InvalidMove` is
    /// returned. The receiver is never modified.
    pub fn apply(&self, placement: &Placement) -> Result<PackingState> {
        let item_index = self
            .pending
            .iter()
            .position(|b| b.id == placement.item.id)
            .ok_or_else(|| {
                Error::InvalidMove(format!("item {} is not pending", placement.item.id))
            })?;

        let space_index = self
            .free_spaces
            .iter()
            .position(|s| s.min == placement.position && s.fits(placement.rotation))
            .ok_or_else(|| {
                Error::InvalidMove(format!(
                    "no free space at {:?} admits {}x{}x{}",
                    placement.position,
                    placement.rotation.width,
                    placement.rotation.height,
                    placement.rotation.depth
                ))
            })?;

        let mut next = self.clone();
        let consumed = next.free_spaces.remove(space_index);
        next.free_spaces
            .extend(consumed.split(placement.position, placement.rotation));
        next.pending.remove(item_index);
        next.history = next.history.push(*placement);
        next.placed_volume += placement.item.volume();
        Ok(next)
    }

    /// Scores this state: total placed volume minus `penalty_factor` per
    /// placed box.
    ///
    /// Used both for terminal-state scoring and for ordering states. Higher
    /// is better.
    pub fn evaluation(&self, penalty_factor: f64) -> f64 {
        self.placed_volume as f64 - penalty_factor * self.history.len() as f64
    }
}

/// States are compared by their evaluation under the default penalty
/// factor, not structurally: two differently packed containers with equal
/// scores compare as equal.
impl PartialEq for PackingState {
    fn eq(&self, other: &Self) -> bool {
        self.evaluation(DEFAULT_PENALTY_FACTOR) == other.evaluation(DEFAULT_PENALTY_FACTOR)
    }
}

impl PartialOrd for PackingState {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.evaluation(DEFAULT_PENALTY_FACTOR)
            .partial_cmp(&other.evaluation(DEFAULT_PENALTY_FACTOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_items(dims: [u32; 3], items: &[BoxItem]) -> PackingState {
        let mut state = PackingState::new(dims[0], dims[1], dims[2]).unwrap();
        for item in items {
            state.add_item(*item).unwrap();
        }
        state
    }

    #[test]
    fn test_new_state_single_free_space() {
        let state = PackingState::new(10, 8, 6).unwrap();
        assert_eq!(state.free_spaces().len(), 1);
        assert_eq!(state.free_spaces()[0], Space::new([0, 0, 0], [10, 8, 6]));
        assert_eq!(state.placed_volume(), 0);
        assert_eq!(state.container_volume(), 480);
    }

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert!(PackingState::new(0, 5, 5).is_err());
    }

    #[test]
    fn test_add_item_rejects_duplicate_id() {
        let mut state = PackingState::new(10, 10, 10).unwrap();
        state.add_item(BoxItem::new(1, 2, 2, 2)).unwrap();
        assert!(state.add_item(BoxItem::new(1, 3, 3, 3)).is_err());
    }

    #[test]
    fn test_legal_moves_cube_in_empty_container() {
        // A cube has one rotation; one free space => exactly one move.
        let state = state_with_items([10, 10, 10], &[BoxItem::new(1, 4, 4, 4)]);
        let moves = state.legal_moves();

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].position, [0, 0, 0]);
        assert_eq!(moves[0].rotation, Rotation::new(4, 4, 4));
    }

    #[test]
    fn test_legal_moves_counts_rotations() {
        // All-distinct dims => 6 rotations, all fitting the initial space.
        let state = state_with_items([10, 10, 10], &[BoxItem::new(1, 1, 2, 3)]);
        assert_eq!(state.legal_moves().len(), 6);
    }

    #[test]
    fn test_legal_moves_omits_unplaceable_item() {
        let state = state_with_items(
            [5, 5, 5],
            &[BoxItem::new(1, 2, 2, 2), BoxItem::new(2, 6, 6, 6)],
        );
        let moves = state.legal_moves();

        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.item.id == 1));
    }

    #[test]
    fn test_no_pending_items_means_no_moves() {
        let state = PackingState::new(10, 10, 10).unwrap();
        assert!(state.legal_moves().is_empty());
        assert!(!state.has_legal_move());
        assert!(state.is_terminal());
    }

    #[test]
    fn test_apply_updates_state() {
        let state = state_with_items([10, 10, 10], &[BoxItem::new(1, 3, 2, 1)]);
        let mv = state.legal_moves()[0];
        let next = state.apply(&mv).unwrap();

        assert!(next.pending().is_empty());
        assert_eq!(next.placed_count(), 1);
        assert_eq!(next.placed_volume(), 6);
        assert_eq!(next.history().last().unwrap().item.id, 1);
        // Placed at the origin of the full container: three remainders.
        assert_eq!(next.free_spaces().len(), 3);

        // The original state is untouched.
        assert_eq!(state.pending().len(), 1);
        assert_eq!(state.placed_count(), 0);
        assert_eq!(state.free_spaces().len(), 1);
    }

    #[test]
    fn test_apply_stale_item_is_invalid_move() {
        let state = state_with_items([10, 10, 10], &[BoxItem::new(1, 2, 2, 2)]);
        let mv = state.legal_moves()[0];
        let next = state.apply(&mv).unwrap();

        // Applying the same move again: the item is no longer pending.
        let err = next.apply(&mv).unwrap_err();
        assert!(matches!(err, Error::InvalidMove(_)));
    }

    #[test]
    fn test_apply_stale_space_is_invalid_move() {
        let state = state_with_items(
            [10, 10, 10],
            &[BoxItem::new(1, 2, 2, 2), BoxItem::new(2, 2, 2, 2)],
        );
        let mv = Placement::new(
            BoxItem::new(2, 2, 2, 2),
            [9, 9, 9],
            Rotation::new(2, 2, 2),
        );
        let err = state.apply(&mv).unwrap_err();
        assert!(matches!(err, Error::InvalidMove(_)));
    }

    #[test]
    fn test_placements_never_overlap() {
        let state = state_with_items(
            [10, 10, 10],
            &[
                BoxItem::new(1, 3, 2, 1),
                BoxItem::new(2, 2, 2, 2),
                BoxItem::new(3, 1, 3, 2),
            ],
        );

        // Greedily apply the first legal move until terminal.
        let mut current = state;
        while let Some(mv) = current.legal_moves().first().copied() {
            current = current.apply(&mv).unwrap();
        }

        let placements = current.history().to_vec();
        let container = Space::new(
            [0, 0, 0],
            [current.width(), current.height(), current.depth()],
        );
        for (i, a) in placements.iter().enumerate() {
            assert!(a.occupied().is_within(&container));
            for b in placements.iter().skip(i + 1) {
                assert!(!a.occupied().intersects(&b.occupied()));
            }
        }
    }

    #[test]
    fn test_volume_conservation() {
        let state = state_with_items(
            [6, 6, 6],
            &[
                BoxItem::new(1, 4, 4, 4),
                BoxItem::new(2, 3, 3, 3),
                BoxItem::new(3, 2, 2, 2),
            ],
        );

        let mut current = state;
        while let Some(mv) = current.legal_moves().first().copied() {
            current = current.apply(&mv).unwrap();
            assert!(current.placed_volume() <= current.container_volume());
        }
    }

    #[test]
    fn test_evaluation_penalty() {
        let state = state_with_items([10, 10, 10], &[BoxItem::new(1, 3, 2, 1)]);
        assert_eq!(state.evaluation(DEFAULT_PENALTY_FACTOR), 0.0);

        let next = state.apply(&state.legal_moves()[0]).unwrap();
        // volume 6 minus one box penalty
        assert_eq!(next.evaluation(DEFAULT_PENALTY_FACTOR), -4.0);
        assert_eq!(next.evaluation(0.0), 6.0);
        assert_eq!(next.evaluation(2.0), 4.0);
    }

    #[test]
    fn test_state_ordering_is_by_score() {
        let empty = PackingState::new(10, 10, 10).unwrap();
        let with_item = state_with_items([10, 10, 10], &[BoxItem::new(1, 5, 5, 5)]);
        let placed = with_item.apply(&with_item.legal_moves()[0]).unwrap();

        // 125 - 10 > 0
        assert!(placed > empty);
        assert!(empty < placed);

        // Pending items do not affect the score.
        assert_eq!(empty, with_item);
    }

    #[test]
    fn test_utilization() {
        let state = state_with_items([10, 10, 10], &[BoxItem::new(1, 10, 10, 5)]);
        let next = state.apply(&state.legal_moves()[0]).unwrap();
        assert!((next.utilization() - 0.5).abs() < 1e-12);
    }
}
