//! Persistent program store
//!
//! Programs live in a byte-addressable device as fixed-width records
//! behind a short check token:
//!
//! ```text
//! ┌──────────────┬──────────┬──────────┬─────┬──────────┐
//! │ CHECK TOKEN  │ RECORD 0 │ RECORD 1 │ ... │ RECORD n │
//! │ 6B           │ 37B      │ 37B      │     │ 37B      │
//! └──────────────┴──────────┴──────────┴─────┴──────────┘
//! ```
//!
//! - [`layout`]: sizes, offsets and address arithmetic
//! - [`codec`]: pure record encode/decode over byte buffers
//! - [`cookbook`]: slot access and (re)initialization on a [`fryer_hal::ByteStore`]

pub mod codec;
pub mod cookbook;
pub mod layout;

pub use codec::{decode_record, default_program, encode_record, DecodeError, RecordImage};
pub use cookbook::{Cookbook, StoreError};
pub use layout::{address, capacity_for, CHECK_TOKEN, FORMAT_VERSION, RECORD_SIZE, TOKEN_LEN};
