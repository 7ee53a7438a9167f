//! Box items and their axis-aligned rotations.

use crate::{Error, Result};
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The six axis permutations of (width, height, depth).
const AXIS_PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// One axis-aligned orientation of an item: its dimensions after rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rotation {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Rotation {
    /// Creates a rotation from explicit dimensions.
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Returns the rotated dimensions as an array.
    pub fn dims(&self) -> [u32; 3] {
        [self.width, self.height, self.depth]
    }

    /// Volume of the rotated item (invariant under rotation).
    pub fn volume(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.depth as u64
    }
}

/// An axis-aligned 3D box to be packed.
///
/// Identity, equality and hashing are by `id` alone: two items with the same
/// dimensions but different ids are distinct, and two items with the same id
/// are interchangeable anywhere a `BoxItem` is required.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxItem {
    pub id: u32,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl BoxItem {
    /// Creates a new item. Dimensions are not checked here; call
    /// [`BoxItem::validate`] before use.
    pub fn new(id: u32, width: u32, height: u32, depth: u32) -> Self {
        Self {
            id,
            width,
            height,
            depth,
        }
    }

    /// Validates the item and returns an error if any dimension is zero.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(Error::InvalidItem(format!(
                "item {} has a zero dimension ({}x{}x{})",
                self.id, self.width, self.height, self.depth
            )));
        }
        Ok(())
    }

    /// Volume of the item.
    pub fn volume(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.depth as u64
    }

    /// Returns the distinct axis permutations of this item's dimensions,
    /// in a fixed deterministic order.
    ///
    /// The cardinality is 1 if all dimensions are equal, 3 if exactly two
    /// are equal, and 6 if all are distinct.
    pub fn rotations(&self) -> Vec<Rotation> {
        let dims = [self.width, self.height, self.depth];
        let mut rotations = Vec::with_capacity(6);
        for perm in AXIS_PERMUTATIONS {
            let r = Rotation::new(dims[perm[0]], dims[perm[1]], dims[perm[2]]);
            if !rotations.contains(&r) {
                rotations.push(r);
            }
        }
        rotations
    }
}

impl PartialEq for BoxItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BoxItem {}

impl Hash for BoxItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rotations_all_distinct() {
        let item = BoxItem::new(1, 1, 2, 3);
        let rotations = item.rotations();
        assert_eq!(rotations.len(), 6);

        let unique: HashSet<_> = rotations.iter().copied().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn test_rotations_two_equal() {
        let item = BoxItem::new(1, 2, 2, 3);
        assert_eq!(item.rotations().len(), 3);
    }

    #[test]
    fn test_rotations_cube() {
        let item = BoxItem::new(1, 4, 4, 4);
        let rotations = item.rotations();
        assert_eq!(rotations.len(), 1);
        assert_eq!(rotations[0], Rotation::new(4, 4, 4));
    }

    #[test]
    fn test_rotation_volume_invariant() {
        let item = BoxItem::new(1, 3, 5, 7);
        for r in item.rotations() {
            assert_eq!(r.volume(), item.volume());
        }
    }

    #[test]
    fn test_identity_by_id() {
        let a = BoxItem::new(7, 1, 2, 3);
        let b = BoxItem::new(7, 9, 9, 9);
        let c = BoxItem::new(8, 1, 2, 3);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn test_validate_rejects_zero_dimension() {
        assert!(BoxItem::new(1, 0, 2, 3).validate().is_err());
        assert!(BoxItem::new(1, 2, 2, 3).validate().is_ok());
    }
}
