//! # Packed Tree Addresses (node-address)
//!
//! Provides a compact, totally-ordered address for nodes in a tree of at most
//! eight levels. The whole path from the root lives in one `u64`, so positions
//! can be stored, compared and navigated without pointers or side tables.
//!
//! ## Design
//!
//! A [`NodeAddress`] is a `u64` split into eight 8-bit level slots:
//!
//! ```text
//! ┌─────────┬─────────┬─────────┬─────────┬─────────┬─────────┬─────────┬─────────┐
//! │ Level 1 │ Level 2 │ Level 3 │ Level 4 │ Level 5 │ Level 6 │ Level 7 │ Level 8 │
//! │ 8 bits  │ 8 bits  │ 8 bits  │ 8 bits  │ 8 bits  │ 8 bits  │ 8 bits  │ 8 bits  │
//! └─────────┴─────────┴─────────┴─────────┴─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! Each slot holds a 1-based sibling index (1..=255) or 0 past the node's
//! depth. The root is all zeros. Integer order is pre-order over the tree.
//!
//! ## Navigation
//!
//! ```
//! use node_address::NodeAddress;
//!
//! let first = NodeAddress::ROOT.first_child().unwrap();
//! let nested = first.first_child().unwrap();
//! assert_eq!(nested.level(), 2);
//! assert_eq!(nested.parent(), Some(first));
//!
//! let second = first.next_sibling().unwrap();
//! assert_eq!(second.to_string(), "/2");
//! assert!(second.has_ancestor(NodeAddress::ROOT));
//! assert!(first < nested && nested < second);
//! ```
//!
//! ## Compile-time trees
//!
//! ```ignore
//! use node_address::tree;
//!
//! tree! {
//!     pub mod Catalog {
//!         Books { Fiction; Science; }
//!         Music;
//!     }
//! }
//!
//! assert_eq!(Catalog::Books::Science::ADDRESS.to_string(), "/1/2");
//! ```

pub mod address;
#[cfg(feature = "bevy")]
pub mod bevy;
pub mod error;
pub mod key;
pub mod layout;
pub mod set;

pub use address::{Ancestors, Children, NodeAddress};
pub use error::AddressError;
pub use key::AddressKey;
pub use layout::{MAX_INDEX, MAX_LEVEL, PREFIX_MASKS, SLOT_BITS, SLOT_INCREMENTS, SLOT_MASKS};
pub use node_address_macro::{address, tree};
pub use set::AddressSet;
