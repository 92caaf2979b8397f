//! Slot layout: fixed 8-bit allocation for an 8-level hierarchy.
//!
//! Level 1 lives in the most significant byte, level 8 in the least
//! significant one. A slot value of `0` means "no node at this level", so the
//! depth of an address is recoverable from the raw value alone.
//!
//! ## Address Layout (u64)
//!
//! ```text
//! ┌─────────┬─────────┬─────────┬─────────┬─────────┬─────────┬─────────┬─────────┐
//! │ Level 1 │ Level 2 │ Level 3 │ Level 4 │ Level 5 │ Level 6 │ Level 7 │ Level 8 │
//! │ [63:56] │ [55:48] │ [47:40] │ [39:32] │ [31:24] │ [23:16] │ [15:8]  │ [7:0]   │
//! └─────────┴─────────┴─────────┴─────────┴─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! Everything here operates on plain `u64` values and is `const`, so the
//! macro-generated constants can be evaluated at compile time.

/// Maximum supported tree depth.
pub const MAX_LEVEL: u8 = 8;

/// Bits per level slot.
pub const SLOT_BITS: u32 = 8;

/// Largest sibling index a slot can hold.
pub const MAX_INDEX: u8 = u8::MAX;

/// `SLOT_MASKS[l]` selects the slot of level `l` (1..=8).
///
/// Index 0 (the root has no slot) is an empty mask.
pub const SLOT_MASKS: [u64; MAX_LEVEL as usize + 1] = {
    let mut masks = [0u64; MAX_LEVEL as usize + 1];
    let mut level = 1;
    while level <= MAX_LEVEL as usize {
        masks[level] = 0xff << ((MAX_LEVEL as usize - level) * SLOT_BITS as usize);
        level += 1;
    }
    masks
};

/// `SLOT_INCREMENTS[l]` is sibling index `1` at level `l`, i.e. the amount
/// added to the raw value to step to the next sibling.
pub const SLOT_INCREMENTS: [u64; MAX_LEVEL as usize + 1] = {
    let mut increments = [0u64; MAX_LEVEL as usize + 1];
    let mut level = 1;
    while level <= MAX_LEVEL as usize {
        increments[level] = 0x01 << ((MAX_LEVEL as usize - level) * SLOT_BITS as usize);
        level += 1;
    }
    increments
};

/// Precomputed prefix masks.
/// `PREFIX_MASKS[l]` keeps levels `1..=l` and clears everything deeper.
pub const PREFIX_MASKS: [u64; MAX_LEVEL as usize + 1] = {
    let mut masks = [0u64; MAX_LEVEL as usize + 1];
    let mut level = 1;
    while level <= MAX_LEVEL as usize {
        masks[level] = masks[level - 1] | SLOT_MASKS[level];
        level += 1;
    }
    masks
};

const _: () = {
    assert!(PREFIX_MASKS[MAX_LEVEL as usize] == u64::MAX);
    assert!(SLOT_MASKS[1] == 0xff00_0000_0000_0000);
    assert!(SLOT_INCREMENTS[MAX_LEVEL as usize] == 1);
};

// =============================================================================
// Raw value operations
// =============================================================================

/// Depth of a raw address (0 for the root).
///
/// Counts slots down to the deepest non-zero one, so a malformed value with a
/// gap reports the position of its last populated slot.
#[inline]
pub const fn level_of(raw: u64) -> u8 {
    // trailing_zeros(0) == 64 gives 8 - 8 = 0 for the root.
    MAX_LEVEL - (raw.trailing_zeros() / SLOT_BITS) as u8
}

/// Slot value stored at `level`, or 0 when `level` is outside 1..=8.
#[inline]
pub const fn slot_value(raw: u64, level: u8) -> u8 {
    if level == 0 || level > MAX_LEVEL {
        return 0;
    }
    ((raw & SLOT_MASKS[level as usize]) >> ((MAX_LEVEL - level) as u32 * SLOT_BITS)) as u8
}

/// Place `index` into the slot of `level`, or 0 when `level` is outside 1..=8.
#[inline]
pub const fn slot_bits(level: u8, index: u8) -> u64 {
    if level == 0 || level > MAX_LEVEL {
        return 0;
    }
    (index as u64) << ((MAX_LEVEL - level) as u32 * SLOT_BITS)
}

/// V1 check: no zero slot above a populated one.
#[inline]
pub const fn is_well_formed(raw: u64) -> bool {
    let level = level_of(raw);
    let mut l = 1;
    while l <= level {
        if slot_value(raw, l) == 0 {
            return false;
        }
        l += 1;
    }
    true
}

/// Number of non-zero slots, gaps included.
#[inline]
pub const fn populated_slots(raw: u64) -> u8 {
    let mut count = 0;
    let mut l = 1;
    while l <= MAX_LEVEL {
        if slot_value(raw, l) != 0 {
            count += 1;
        }
        l += 1;
    }
    count
}

/// Number of leading slots two raw values agree on.
#[inline]
pub const fn shared_slots(a: u64, b: u64) -> u8 {
    ((a ^ b).leading_zeros() / SLOT_BITS) as u8
}
