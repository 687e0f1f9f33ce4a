//! Storage layout
//!
//! Record format:
//! - NAME (15 bytes): UTF-8 name, NUL-terminated within the field
//! - PREHEAT (1 byte): 0 = off, anything else = on
//! - STEPS COUNT (1 byte): number of valid steps (≤ MAX_STEPS)
//! - STEPS (MAX_STEPS × 4 bytes): duration (u16 LE), target °C, beep
//!
//! Space for every step is reserved regardless of the steps count, so the
//! record size is constant and a record's address depends only on its slot.

use static_assertions::{const_assert, const_assert_eq};

use crate::program::{MAX_STEPS, NAME_CAPACITY};

/// Magic bytes at the start of the store
pub const MAGIC: [u8; 4] = *b"AAIR";

/// Record format version
///
/// Bump on any layout change: a mismatch forces full reinitialization.
pub const FORMAT_VERSION: u8 = 2;

/// Leading bytes that mark an initialized store
pub const CHECK_TOKEN: [u8; 6] = [
    MAGIC[0],
    MAGIC[1],
    MAGIC[2],
    MAGIC[3],
    FORMAT_VERSION,
    MAX_STEPS as u8,
];

/// Check token size in bytes
pub const TOKEN_LEN: usize = CHECK_TOKEN.len();

/// Encoded step size in bytes
pub const STEP_WIDTH: usize = 4;

/// Offset of the preheat flag within a record
pub const PREHEAT_OFFSET: usize = NAME_CAPACITY;

/// Offset of the steps count within a record
pub const STEPS_COUNT_OFFSET: usize = NAME_CAPACITY + 1;

/// Offset of the first step within a record
pub const STEPS_OFFSET: usize = NAME_CAPACITY + 2;

/// Encoded record size in bytes
pub const RECORD_SIZE: usize = STEPS_OFFSET + MAX_STEPS * STEP_WIDTH;

const_assert_eq!(RECORD_SIZE, 37);
const_assert_eq!(STEP_WIDTH, core::mem::size_of::<u16>() + 2);
const_assert!(MAX_STEPS <= u8::MAX as usize);

/// Byte address of the record in `slot`
pub const fn address(slot: usize) -> usize {
    TOKEN_LEN + slot * RECORD_SIZE
}

/// Offset of step `index` within a record
pub const fn step_offset(index: usize) -> usize {
    STEPS_OFFSET + index * STEP_WIDTH
}

/// Number of whole records that fit in `budget` bytes after the token
pub const fn capacity_for(budget: usize) -> usize {
    if budget < TOKEN_LEN {
        0
    } else {
        (budget - TOKEN_LEN) / RECORD_SIZE
    }
}
