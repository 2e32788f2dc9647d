use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// How many tags can exist. Tag masks live in a `u32` and one bit is
/// reserved so `!0` style math never overflows into nonsense.
pub const MAX_TAGS: usize = 31;

/// A set of tags as a bitmask. Client membership and monitor views are
/// both `TagMask`es over the same bit space; a client is visible on a
/// monitor when the two masks intersect.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagMask(pub u32);

impl TagMask {
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// The mask with only the given tag index (0-based) set.
    pub const fn single(index: usize) -> Self {
        Self(1 << index)
    }

    /// The mask with every one of `count` tags set.
    pub const fn all(count: usize) -> Self {
        Self((1 << count) - 1)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn intersects(self, other: TagMask) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn contains(self, index: usize) -> bool {
        self.0 & (1 << index) != 0
    }

    /// Drop any bits outside the valid tag range.
    pub const fn clamp_to(self, count: usize) -> Self {
        Self(self.0 & ((1 << count) - 1))
    }
}

impl BitOr for TagMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for TagMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitXor for TagMask {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for TagMask {
    type Output = Self;
    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Display for TagMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sets_only_one_bit() {
        assert_eq!(TagMask::single(0).0, 1);
        assert_eq!(TagMask::single(8).0, 256);
    }

    #[test]
    fn all_covers_exactly_the_tag_range() {
        assert_eq!(TagMask::all(9).0, 0b1_1111_1111);
        assert!(!TagMask::all(9).contains(9));
    }

    #[test]
    fn clamp_drops_out_of_range_bits() {
        let wild = TagMask::new(!0);
        assert_eq!(wild.clamp_to(9), TagMask::all(9));
    }

    #[test]
    fn toggling_twice_restores_the_mask() {
        let start = TagMask::new(0b101);
        let toggled = start ^ TagMask::single(1);
        assert_eq!(toggled.0, 0b111);
        assert_eq!(toggled ^ TagMask::single(1), start);
    }

    #[test]
    fn intersects_matches_shared_bits_only() {
        assert!(TagMask::new(0b110).intersects(TagMask::new(0b010)));
        assert!(!TagMask::new(0b100).intersects(TagMask::new(0b011)));
    }
}
