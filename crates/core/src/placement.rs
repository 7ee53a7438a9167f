//! A single placement move: one item, one position, one rotation.

use crate::item::{BoxItem, Rotation};
use crate::space::Space;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One placement of an item inside the container.
///
/// `position` is the minimum corner of the region the item occupies;
/// `rotation` carries the item's dimensions after rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub item: BoxItem,
    pub position: [u32; 3],
    pub rotation: Rotation,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(item: BoxItem, position: [u32; 3], rotation: Rotation) -> Self {
        Self {
            item,
            position,
            rotation,
        }
    }

    /// The region of the container this placement occupies.
    pub fn occupied(&self) -> Space {
        Space::from_position_and_rotation(self.position, self.rotation)
    }

    /// Volume of the placed item.
    pub fn volume(&self) -> u64 {
        self.item.volume()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupied_region() {
        let item = BoxItem::new(1, 3, 2, 1);
        let placement = Placement::new(item, [4, 5, 6], Rotation::new(1, 2, 3));
        let occupied = placement.occupied();

        assert_eq!(occupied.min, [4, 5, 6]);
        assert_eq!(occupied.max, [5, 7, 9]);
        assert_eq!(placement.volume(), 6);
    }
}
