//! Bitmask for tracking which of a voxel's six faces are visible.

use crate::face_direction::Face;

/// Bitmask indicating which of a voxel's 6 faces are visible.
///
/// Bit order follows [`Face`]: Top, Bottom, Front, Back, Left, Right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibleFaces(pub u8);

impl VisibleFaces {
    /// No faces visible.
    pub const NONE: Self = Self(0);
    /// All six faces visible.
    pub const ALL: Self = Self(0b0011_1111);

    /// Returns `true` if the given face is visible.
    pub fn is_visible(self, face: Face) -> bool {
        self.0 & (1 << face as u8) != 0
    }

    /// Marks the given face as visible.
    pub fn set_visible(&mut self, face: Face) {
        self.0 |= 1 << face as u8;
    }

    /// Returns the number of visible faces (0–6).
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate the visible faces in [`Face::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |&f| self.is_visible(f))
    }
}
