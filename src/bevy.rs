//! Bevy integration for tree addresses.
//!
//! Provides:
//! - `TreePosition` — component placing an entity at one node of a tree
//! - `AddressSet` — also a component when this feature is on
//!
//! # Example
//!
//! ```ignore
//! use bevy::prelude::*;
//! use node_address::bevy::TreePosition;
//! use node_address::tree;
//!
//! tree! {
//!     pub mod Scene {
//!         World { Terrain; Props; }
//!         Ui;
//!     }
//! }
//!
//! fn spawn_entities(mut commands: Commands) {
//!     commands.spawn(TreePosition(Scene::World::Props::ADDRESS));
//! }
//!
//! fn world_only(query: Query<&TreePosition>) {
//!     for position in query.iter() {
//!         if position.is_under(Scene::World::ADDRESS) {
//!             // entity lives somewhere below World
//!         }
//!     }
//! }
//! ```

use ::bevy::prelude::*;

use crate::NodeAddress;

/// Places an entity at a node of a tree.
///
/// Sorting entities by this component sorts them in pre-order.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreePosition(pub NodeAddress);

impl TreePosition {
    #[inline]
    pub fn address(&self) -> NodeAddress {
        self.0
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.0.level()
    }

    /// Whether the entity sits at `ancestor` or anywhere in its subtree.
    #[inline]
    pub fn is_under(&self, ancestor: NodeAddress) -> bool {
        ancestor.is_prefix_of(self.0)
    }

    /// Position of the parent node, `None` at the root.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(Self)
    }
}

impl From<NodeAddress> for TreePosition {
    fn from(address: NodeAddress) -> Self {
        Self(address)
    }
}
