//! Free-space regions and guillotine splitting.

use crate::item::Rotation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned region of the container, given by its minimum and
/// maximum corners (`min[i] <= max[i]` on every axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Space {
    /// Minimum corner (x, y, z)
    pub min: [u32; 3],
    /// Maximum corner (x, y, z)
    pub max: [u32; 3],
}

impl Space {
    /// Creates a new space from corner coordinates.
    pub fn new(min: [u32; 3], max: [u32; 3]) -> Self {
        debug_assert!(min[0] <= max[0] && min[1] <= max[1] && min[2] <= max[2]);
        Self { min, max }
    }

    /// Creates a space from a position and the dimensions of a rotated item.
    pub fn from_position_and_rotation(position: [u32; 3], rotation: Rotation) -> Self {
        Self {
            min: position,
            max: [
                position[0] + rotation.width,
                position[1] + rotation.height,
                position[2] + rotation.depth,
            ],
        }
    }

    /// Extent along the x axis.
    pub fn width(&self) -> u32 {
        self.max[0] - self.min[0]
    }

    /// Extent along the y axis.
    pub fn height(&self) -> u32 {
        self.max[1] - self.min[1]
    }

    /// Extent along the z axis.
    pub fn depth(&self) -> u32 {
        self.max[2] - self.min[2]
    }

    /// Volume of this space.
    pub fn volume(&self) -> u64 {
        self.width() as u64 * self.height() as u64 * self.depth() as u64
    }

    /// Returns true if a rotated item fits within this space (three-axis
    /// `<=` test). Pure, no side effects.
    pub fn fits(&self, rotation: Rotation) -> bool {
        rotation.width <= self.width()
            && rotation.height <= self.height()
            && rotation.depth <= self.depth()
    }

    /// Checks if this space overlaps another with positive volume.
    pub fn intersects(&self, other: &Space) -> bool {
        self.min[0] < other.max[0]
            && self.max[0] > other.min[0]
            && self.min[1] < other.max[1]
            && self.max[1] > other.min[1]
            && self.min[2] < other.max[2]
            && self.max[2] > other.min[2]
    }

    /// Checks if this space is fully contained within another.
    pub fn is_within(&self, other: &Space) -> bool {
        self.min[0] >= other.min[0]
            && self.min[1] >= other.min[1]
            && self.min[2] >= other.min[2]
            && self.max[0] <= other.max[0]
            && self.max[1] <= other.max[1]
            && self.max[2] <= other.max[2]
    }

    /// Splits this space around an item placed at `position` with the given
    /// rotation, returning the guillotine remainders.
    ///
    /// Up to six remainders are produced: right, front and top of the placed
    /// item, plus left, back and bottom when the item does not start at this
    /// space's origin on that axis. Zero-volume remainders are dropped. The
    /// remainders exactly bound the occupied region and never overlap it.
    pub fn split(&self, position: [u32; 3], rotation: Rotation) -> Vec<Space> {
        let [x0, y0, z0] = self.min;
        let [x1, y1, z1] = self.max;
        let [px, py, pz] = position;
        let (bw, bh, bd) = (rotation.width, rotation.height, rotation.depth);

        let mut remainders = Vec::with_capacity(6);

        // Right of the item
        if px + bw < x1 {
            remainders.push(Space::new([px + bw, y0, z0], [x1, y1, z1]));
        }
        // In front of the item
        if py + bh < y1 {
            remainders.push(Space::new([px, py + bh, z0], [px + bw, y1, z1]));
        }
        // Above the item
        if pz + bd < z1 {
            remainders.push(Space::new([px, py, pz + bd], [px + bw, py + bh, z1]));
        }
        // Left, back and bottom remainders only arise when the item is not
        // anchored at the space's minimum corner on that axis.
        if x0 < px {
            remainders.push(Space::new([x0, y0, z0], [px, y1, z1]));
        }
        if y0 < py {
            remainders.push(Space::new([px, y0, z0], [px + bw, py, z1]));
        }
        if z0 < pz {
            remainders.push(Space::new([px, py, z0], [px + bw, py + bh, pz]));
        }

        remainders
    }
}
