//! Storage form of an address: 8 big-endian bytes.
//!
//! Level 1 is byte 0, so comparing keys byte by byte (what most stores do
//! for binary keys) gives the same order as comparing addresses. Keys can be
//! viewed in place inside a byte buffer without copying.

use core::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::address::NodeAddress;
use crate::error::AddressError;

/// Big-endian byte encoding of a [`NodeAddress`].
#[derive(
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    FromBytes,
    IntoBytes,
    Immutable,
    KnownLayout,
    Unaligned,
)]
#[repr(transparent)]
pub struct AddressKey([u8; 8]);

impl AddressKey {
    /// Encoded size in bytes.
    pub const SIZE: usize = 8;

    #[inline]
    pub const fn new(address: NodeAddress) -> Self {
        Self(address.to_be_bytes())
    }

    /// Decode back into an address. No validation is performed.
    #[inline]
    pub const fn address(self) -> NodeAddress {
        NodeAddress::from_be_bytes(self.0)
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 8] {
        self.0
    }

    /// View exactly 8 bytes as a key without copying.
    pub fn from_slice(bytes: &[u8]) -> Result<&Self, AddressError> {
        Self::ref_from_bytes(bytes).map_err(|_| {
            tracing::debug!(len = bytes.len(), "rejected storage key of the wrong size");
            AddressError::Length {
                expected: Self::SIZE,
                actual: bytes.len(),
            }
        })
    }

    /// View a packed run of keys without copying.
    pub fn slice_from_bytes(bytes: &[u8]) -> Result<&[Self], AddressError> {
        <[Self]>::ref_from_bytes(bytes).map_err(|_| {
            tracing::debug!(len = bytes.len(), "rejected ragged storage key buffer");
            AddressError::Ragged { len: bytes.len() }
        })
    }
}

impl From<NodeAddress> for AddressKey {
    #[inline]
    fn from(address: NodeAddress) -> Self {
        Self::new(address)
    }
}

impl From<AddressKey> for NodeAddress {
    #[inline]
    fn from(key: AddressKey) -> Self {
        key.address()
    }
}

impl fmt::Debug for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AddressKey({})", self.address())
    }
}
