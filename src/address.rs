//! The [`NodeAddress`] value type and its navigation operations.

use core::fmt;
use core::iter::FusedIterator;
use core::ops::RangeInclusive;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AddressError;
use crate::layout::{
    is_well_formed, level_of, populated_slots, shared_slots, slot_bits, slot_value, MAX_LEVEL,
    PREFIX_MASKS, SLOT_INCREMENTS, SLOT_MASKS,
};

/// Position of a node in a tree of at most 8 levels, packed into a `u64`.
///
/// Each byte is one level slot, level 1 in the most significant byte. A slot
/// holds the 1-based sibling index of the node at that level, or `0` past the
/// node's depth. Comparing two addresses compares the raw integers, which
/// orders nodes in pre-order: a parent sorts before its whole subtree and
/// siblings sort by index.
///
/// Navigation that would leave the tree (the root's parent, a sibling past
/// index 255 or before index 1, a child below level 8) returns `None`.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct NodeAddress(u64);

impl NodeAddress {
    /// The root node, level 0.
    pub const ROOT: Self = Self(0);

    /// Wrap a raw value without validation.
    ///
    /// The caller must pass a value with no empty slot above a populated one;
    /// anything else navigates deterministically but meaninglessly.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Wrap a raw value, rejecting values with a gap between populated slots.
    pub fn try_from_raw(raw: u64) -> Result<Self, AddressError> {
        if !is_well_formed(raw) {
            tracing::debug!(raw, "rejected malformed node address");
            return Err(AddressError::Malformed { raw });
        }
        Ok(Self(raw))
    }

    /// Build an address from its sibling indices, root side first.
    ///
    /// An empty path is the root.
    pub fn from_path(path: &[u8]) -> Result<Self, AddressError> {
        if path.len() > MAX_LEVEL as usize {
            tracing::debug!(depth = path.len(), "rejected node path deeper than 8 levels");
            return Err(AddressError::TooDeep { depth: path.len() });
        }
        let mut raw = 0u64;
        for (i, &index) in path.iter().enumerate() {
            let level = i as u8 + 1;
            if index == 0 {
                tracing::debug!(level, "rejected node path with a zero sibling index");
                return Err(AddressError::ZeroIndex { level });
            }
            raw |= slot_bits(level, index);
        }
        Ok(Self(raw))
    }

    /// Decode the big-endian storage form.
    #[inline]
    pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }

    /// Encode as 8 big-endian bytes, level 1 first.
    #[inline]
    pub const fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// The packed representation.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }

    /// Depth of the node, 0 for the root and at most 8.
    #[inline]
    pub const fn level(self) -> u8 {
        level_of(self.0)
    }

    /// Sibling index of this node among its parent's children (0 for the root).
    #[inline]
    pub const fn index(self) -> u8 {
        slot_value(self.0, self.level())
    }

    /// Slot value at `level`; 0 past the node's depth or outside 1..=8.
    #[inline]
    pub const fn index_at(self, level: u8) -> u8 {
        slot_value(self.0, level)
    }

    /// Whether every slot above the deepest populated one is populated.
    #[inline]
    pub const fn is_well_formed(self) -> bool {
        is_well_formed(self.0)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// The parent node, `None` for the root.
    #[inline]
    pub const fn parent(self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self(self.0 & !SLOT_MASKS[self.level() as usize]))
    }

    /// Child with sibling index 1, `None` at level 8.
    #[inline]
    pub const fn first_child(self) -> Option<Self> {
        let level = self.level();
        if level >= MAX_LEVEL {
            return None;
        }
        Some(Self(self.0 | SLOT_INCREMENTS[level as usize + 1]))
    }

    /// Child with sibling index 255, `None` at level 8.
    #[inline]
    pub const fn last_child(self) -> Option<Self> {
        let level = self.level();
        if level >= MAX_LEVEL {
            return None;
        }
        Some(Self(self.0 | SLOT_MASKS[level as usize + 1]))
    }

    /// Child with the given sibling index.
    ///
    /// `None` at level 8 or when `index` is 0.
    #[inline]
    pub const fn child(self, index: u8) -> Option<Self> {
        let level = self.level();
        if level >= MAX_LEVEL || index == 0 {
            return None;
        }
        Some(Self(self.0 | slot_bits(level + 1, index)))
    }

    /// Sibling with index + 1, `None` after index 255.
    ///
    /// The root has no siblings.
    #[inline]
    pub const fn next_sibling(self) -> Option<Self> {
        let level = self.level() as usize;
        if level == 0 {
            return None;
        }
        let mask = SLOT_MASKS[level];
        if self.0 & mask == mask {
            return None;
        }
        Some(Self(self.0 + SLOT_INCREMENTS[level]))
    }

    /// Sibling with index - 1, `None` before index 1.
    ///
    /// The root has no siblings.
    #[inline]
    pub const fn previous_sibling(self) -> Option<Self> {
        let level = self.level() as usize;
        if level == 0 {
            return None;
        }
        let increment = SLOT_INCREMENTS[level];
        if self.0 & SLOT_MASKS[level] == increment {
            return None;
        }
        Some(Self(self.0 - increment))
    }

    /// Ancestor (or self) at `level`, `None` if `level` is deeper than this node.
    #[inline]
    pub const fn ancestor_at(self, level: u8) -> Option<Self> {
        if level > self.level() {
            return None;
        }
        Some(Self(self.0 & PREFIX_MASKS[level as usize]))
    }

    /// Deepest node that is an ancestor of (or equal to) both addresses.
    #[inline]
    pub const fn common_ancestor(self, other: Self) -> Self {
        let mut depth = shared_slots(self.0, other.0);
        if depth > self.level() {
            depth = self.level();
        }
        if depth > other.level() {
            depth = other.level();
        }
        Self(self.0 & PREFIX_MASKS[depth as usize])
    }

    // =========================================================================
    // Relationships
    // =========================================================================

    /// Bitwise subtree test: every bit set in `self` is also set in `other`.
    ///
    /// This is O(1) and reflexive, and holds for every true descendant. It is
    /// a bit-subset test rather than a path-prefix test, so it also accepts
    /// nodes whose index at some level is a bitwise superset of ours: `/3`
    /// "has descendant" `/7` because `0b011 & 0b111 == 0b011`. Use
    /// [`is_prefix_of`](Self::is_prefix_of) when that matters.
    #[inline]
    pub const fn has_descendant(self, other: Self) -> bool {
        self.0 & other.0 == self.0
    }

    /// [`has_descendant`](Self::has_descendant) restricted to the next level.
    #[inline]
    pub const fn has_child(self, other: Self) -> bool {
        self.has_descendant(other) && other.level() == self.level() + 1
    }

    #[inline]
    pub const fn has_ancestor(self, other: Self) -> bool {
        other.has_descendant(self)
    }

    #[inline]
    pub const fn has_parent(self, other: Self) -> bool {
        other.has_child(self)
    }

    /// Exact path-prefix test: `other` is this node or lies in its subtree.
    ///
    /// Compares whole slots up to this node's level, so unlike
    /// [`has_descendant`](Self::has_descendant) it never confuses siblings.
    #[inline]
    pub const fn is_prefix_of(self, other: Self) -> bool {
        let level = self.level();
        other.level() >= level && other.0 & PREFIX_MASKS[level as usize] == self.0
    }

    /// The span of the total order covered by this node and its subtree.
    ///
    /// Every well-formed descendant falls inside the range and nothing else
    /// does, so it can drive range scans over ordered maps keyed by address.
    #[inline]
    pub fn subtree_range(self) -> RangeInclusive<Self> {
        let level = self.level() as usize;
        Self(self.0)..=Self(self.0 | !PREFIX_MASKS[level])
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Sibling indices from level 1 down to this node.
    pub fn path(self) -> impl Iterator<Item = u8> {
        (1..=self.level()).map(move |level| self.index_at(level))
    }

    /// Parent, grandparent, ... ending with the root.
    pub fn ancestors(self) -> Ancestors {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Children in index order, 1 through 255.
    pub fn children(self) -> Children {
        Children {
            next: self.first_child(),
        }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator returned by [`NodeAddress::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors {
    next: Option<NodeAddress>,
}

impl Iterator for Ancestors {
    type Item = NodeAddress;

    fn next(&mut self) -> Option<NodeAddress> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Each step clears one populated slot, so gaps are skipped
        let remaining = self.next.map_or(0, |a| populated_slots(a.raw()) as usize + 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Ancestors {}
impl FusedIterator for Ancestors {}

/// Iterator returned by [`NodeAddress::children`].
#[derive(Clone, Debug)]
pub struct Children {
    next: Option<NodeAddress>,
}

impl Iterator for Children {
    type Item = NodeAddress;

    fn next(&mut self) -> Option<NodeAddress> {
        let current = self.next?;
        self.next = current.next_sibling();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.next.map_or(0, |c| 256 - c.index() as usize);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Children {}
impl FusedIterator for Children {}

// =============================================================================
// Conversions and formatting
// =============================================================================

impl From<NodeAddress> for u64 {
    #[inline]
    fn from(address: NodeAddress) -> u64 {
        address.0
    }
}

impl TryFrom<u64> for NodeAddress {
    type Error = AddressError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::try_from_raw(raw)
    }
}

/// `/` for the root, otherwise `/1/4/2`.
impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        for index in self.path() {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeAddress({self})")
    }
}

impl fmt::LowerHex for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl FromStr for NodeAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(rest) = s.strip_prefix('/') else {
            tracing::debug!(input = s, "rejected node address without a leading '/'");
            return Err(AddressError::MissingRoot {
                input: s.to_string(),
            });
        };
        if rest.is_empty() {
            return Ok(Self::ROOT);
        }

        let mut path = [0u8; MAX_LEVEL as usize];
        let mut depth = 0;
        for segment in rest.split('/') {
            if depth == path.len() {
                let depth = rest.split('/').count();
                tracing::debug!(input = s, depth, "rejected node address deeper than 8 levels");
                return Err(AddressError::TooDeep { depth });
            }
            // Only the canonical decimal form: no sign, no leading zeros
            let canonical = !segment.starts_with('0') && segment.bytes().all(|b| b.is_ascii_digit());
            path[depth] = match segment.parse::<u8>() {
                Ok(index) if canonical && index != 0 => index,
                _ => {
                    tracing::debug!(input = s, segment, "rejected node address segment");
                    return Err(AddressError::InvalidSegment {
                        segment: segment.to_string(),
                    });
                }
            };
            depth += 1;
        }
        Self::from_path(&path[..depth])
    }
}
