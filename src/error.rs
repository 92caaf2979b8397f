//! Errors returned by the validating constructors.
//!
//! Navigation itself never fails: running off the tree yields `None`.

use thiserror::Error;

use crate::layout::MAX_LEVEL;

/// Why a value could not be turned into a well-formed [`NodeAddress`](crate::NodeAddress).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// More path segments than there are level slots.
    #[error("path depth {depth} exceeds the maximum of {max} levels", max = MAX_LEVEL)]
    TooDeep { depth: usize },

    /// A sibling index of zero, which is reserved for "no node".
    #[error("sibling index at level {level} is 0; indices start at 1")]
    ZeroIndex { level: u8 },

    /// A raw value with a populated slot below an empty one.
    #[error("raw value {raw:#018x} has a populated slot below an empty one")]
    Malformed { raw: u64 },

    /// Text form did not start with `/`.
    #[error("address `{input}` must start with '/'")]
    MissingRoot { input: String },

    /// A text segment that is not an integer in `1..=255`.
    #[error("invalid path segment `{segment}`: expected an integer in 1..=255")]
    InvalidSegment { segment: String },

    /// A byte buffer of the wrong size for a storage key.
    #[error("expected {expected} bytes for a storage key, got {actual}")]
    Length { expected: usize, actual: usize },

    /// A key buffer whose length is not a whole number of keys.
    #[error("byte length {len} is not a multiple of the 8-byte key size")]
    Ragged { len: usize },
}
