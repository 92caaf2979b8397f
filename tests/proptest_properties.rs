//! Property-based tests for address navigation.
//!
//! Uses proptest to generate well-formed addresses (any depth, any indices)
//! and checks the navigation and ordering laws over them.
//!
//! Run with: `cargo test --test proptest_properties`

use proptest::prelude::*;

use node_address::{AddressKey, AddressSet, NodeAddress, MAX_LEVEL};

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// A well-formed address: 0..=8 non-zero sibling indices
fn address_strategy() -> impl Strategy<Value = NodeAddress> {
    prop::collection::vec(1u8..=255, 0..=MAX_LEVEL as usize)
        .prop_map(|path| NodeAddress::from_path(&path).unwrap())
}

/// Indices that tend to collide so relationships actually show up
fn clustered_address_strategy() -> impl Strategy<Value = NodeAddress> {
    prop::collection::vec(1u8..=3, 0..=4).prop_map(|path| NodeAddress::from_path(&path).unwrap())
}

proptest! {
    #[test]
    fn parent_lowers_level_by_one(a in address_strategy()) {
        match a.parent() {
            Some(parent) => prop_assert_eq!(parent.level() + 1, a.level()),
            None => prop_assert!(a.is_root()),
        }
    }

    #[test]
    fn first_child_raises_level_by_one(a in address_strategy()) {
        match a.first_child() {
            Some(child) => {
                prop_assert_eq!(child.level(), a.level() + 1);
                prop_assert_eq!(child.index(), 1);
                prop_assert_eq!(child.parent(), Some(a));
            }
            None => prop_assert_eq!(a.level(), MAX_LEVEL),
        }
    }

    #[test]
    fn last_child_round_trips(a in address_strategy()) {
        if let Some(child) = a.last_child() {
            prop_assert_eq!(child.index(), 255);
            prop_assert_eq!(child.parent(), Some(a));
            prop_assert!(a.has_child(child));
        }
    }

    #[test]
    fn siblings_share_parent(a in address_strategy()) {
        if let Some(next) = a.next_sibling() {
            prop_assert_eq!(next.parent(), a.parent());
            prop_assert_eq!(next.level(), a.level());
            prop_assert_eq!(next.index(), a.index() + 1);
            prop_assert_eq!(next.previous_sibling(), Some(a));
            prop_assert!(next > a);
        }
        if let Some(previous) = a.previous_sibling() {
            prop_assert_eq!(previous.parent(), a.parent());
            prop_assert_eq!(previous.index() + 1, a.index());
            prop_assert!(previous < a);
        }
    }

    #[test]
    fn parent_reaches_a_sibling_through_either_end(a in address_strategy()) {
        if let Some(parent) = a.parent() {
            let first = parent.first_child().unwrap();
            let last = parent.last_child().unwrap();
            prop_assert_eq!(first.level(), a.level());
            prop_assert_eq!(last.level(), a.level());
            prop_assert!(first <= a && a <= last);
        }
    }

    #[test]
    fn order_agrees_with_raw(a in address_strategy(), b in address_strategy()) {
        prop_assert_eq!(a.cmp(&b), a.raw().cmp(&b.raw()));
        prop_assert_eq!(a == b, a.raw() == b.raw());
    }

    #[test]
    fn relationship_duality(a in clustered_address_strategy(), b in clustered_address_strategy()) {
        prop_assert_eq!(a.has_ancestor(b), b.has_descendant(a));
        prop_assert_eq!(a.has_parent(b), b.has_child(a));
    }

    #[test]
    fn prefix_implies_bitwise_descendant(a in clustered_address_strategy(), b in clustered_address_strategy()) {
        if a.is_prefix_of(b) {
            prop_assert!(a.has_descendant(b));
            prop_assert!(a <= b);
        }
    }

    #[test]
    fn ancestors_are_prefixes(a in address_strategy()) {
        let ancestors: Vec<_> = a.ancestors().collect();
        prop_assert_eq!(ancestors.len(), a.level() as usize);
        for ancestor in ancestors {
            prop_assert!(ancestor.is_prefix_of(a));
            prop_assert!(ancestor < a);
        }
    }

    #[test]
    fn subtree_range_matches_prefix(a in clustered_address_strategy(), b in clustered_address_strategy()) {
        prop_assert_eq!(a.subtree_range().contains(&b), a.is_prefix_of(b));
    }

    #[test]
    fn common_ancestor_is_shared_prefix(a in clustered_address_strategy(), b in clustered_address_strategy()) {
        let shared = a.common_ancestor(b);
        prop_assert!(shared.is_prefix_of(a));
        prop_assert!(shared.is_prefix_of(b));
        for child in [a, b].iter().filter_map(|x| x.ancestor_at(shared.level() + 1)) {
            prop_assert!(!child.is_prefix_of(a) || !child.is_prefix_of(b));
        }
    }

    #[test]
    fn text_round_trips(a in address_strategy()) {
        let text = a.to_string();
        prop_assert_eq!(text.parse::<NodeAddress>(), Ok(a));
    }

    #[test]
    fn key_order_matches_address_order(a in address_strategy(), b in address_strategy()) {
        let (ka, kb) = (AddressKey::new(a), AddressKey::new(b));
        prop_assert_eq!(ka.to_bytes().cmp(&kb.to_bytes()), a.cmp(&b));
        prop_assert_eq!(ka.address(), a);
    }

    #[test]
    fn raw_values_never_panic(raw in any::<u64>()) {
        let a = NodeAddress::from_raw(raw);
        let _ = (a.parent(), a.first_child(), a.last_child(), a.next_sibling(), a.previous_sibling());
        prop_assert!(a.level() <= MAX_LEVEL);
        prop_assert_eq!(NodeAddress::try_from_raw(raw).is_ok(), a.is_well_formed());
    }

    #[test]
    fn set_descendants_match_filter(
        members in prop::collection::vec(clustered_address_strategy(), 0..32),
        ancestor in clustered_address_strategy(),
    ) {
        let set: AddressSet = members.iter().copied().collect();
        let scanned: Vec<_> = set.descendants_of(ancestor).collect();
        let filtered: Vec<_> = set.iter().filter(|&m| ancestor.is_prefix_of(m)).collect();
        prop_assert_eq!(scanned, filtered);
    }
}
