//! Driver implementations
//!
//! Concrete implementations of the `fryer-hal` capability traits:
//!
//! - EEPROM images (RAM-backed byte store)
//! - Relay outputs on `embedded-hal` pins
//! - A simulated fryer host for bench runs and tests

#![no_std]
#![deny(unsafe_code)]

pub mod eeprom;
pub mod gpio;
pub mod sim;
