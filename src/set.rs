//! Ordered collection of addresses with subtree queries.
//!
//! Because addresses sort in pre-order, a whole subtree is one contiguous
//! range of the set, and subtree lookups are range scans rather than a walk
//! over every member.

use std::collections::BTreeSet;

use crate::address::NodeAddress;

/// A set of tree positions, iterated in pre-order.
///
/// # Example
///
/// ```
/// use node_address::{AddressSet, NodeAddress};
///
/// let a: NodeAddress = "/1/2".parse().unwrap();
/// let b: NodeAddress = "/3".parse().unwrap();
/// let set = AddressSet::new().with(a).with(b);
///
/// assert!(set.has_descendant_of("/1".parse().unwrap()));
/// assert!(!set.has_descendant_of("/2".parse().unwrap()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bevy", derive(::bevy::prelude::Component))]
pub struct AddressSet {
    addresses: BTreeSet<NodeAddress>,
}

impl AddressSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set with a single address.
    #[inline]
    pub fn single(address: NodeAddress) -> Self {
        let mut addresses = BTreeSet::new();
        addresses.insert(address);
        Self { addresses }
    }

    /// Builder method: add an address and return self.
    #[inline]
    pub fn with(mut self, address: NodeAddress) -> Self {
        self.addresses.insert(address);
        self
    }

    /// Returns `true` if the address was newly inserted.
    #[inline]
    pub fn insert(&mut self, address: NodeAddress) -> bool {
        self.addresses.insert(address)
    }

    /// Returns `true` if the address was present.
    #[inline]
    pub fn remove(&mut self, address: NodeAddress) -> bool {
        self.addresses.remove(&address)
    }

    #[inline]
    pub fn has(&self, address: NodeAddress) -> bool {
        self.addresses.contains(&address)
    }

    /// Whether any member is `ancestor` itself or lies in its subtree.
    #[inline]
    pub fn has_descendant_of(&self, ancestor: NodeAddress) -> bool {
        self.descendants_of(ancestor).next().is_some()
    }

    /// Members in `ancestor`'s subtree (including `ancestor`), in pre-order.
    pub fn descendants_of(&self, ancestor: NodeAddress) -> impl Iterator<Item = NodeAddress> + '_ {
        self.addresses
            .range(ancestor.subtree_range())
            .copied()
            .filter(move |&address| ancestor.is_prefix_of(address))
    }

    /// Members exactly one level below `parent`.
    pub fn children_of(&self, parent: NodeAddress) -> impl Iterator<Item = NodeAddress> + '_ {
        let level = parent.level() + 1;
        self.descendants_of(parent)
            .filter(move |address| address.level() == level)
    }

    /// Remove `ancestor` and its whole subtree, returning how many went.
    pub fn remove_subtree(&mut self, ancestor: NodeAddress) -> usize {
        let range = ancestor.subtree_range();
        let before = self.addresses.len();
        self.addresses
            .retain(|address| !(range.contains(address) && ancestor.is_prefix_of(*address)));
        before - self.addresses.len()
    }

    /// Iterate in pre-order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = NodeAddress> + '_ {
        self.addresses.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.addresses.clear();
    }
}

impl FromIterator<NodeAddress> for AddressSet {
    fn from_iter<T: IntoIterator<Item = NodeAddress>>(iter: T) -> Self {
        Self {
            addresses: iter.into_iter().collect(),
        }
    }
}

impl Extend<NodeAddress> for AddressSet {
    fn extend<T: IntoIterator<Item = NodeAddress>>(&mut self, iter: T) {
        self.addresses.extend(iter);
    }
}
