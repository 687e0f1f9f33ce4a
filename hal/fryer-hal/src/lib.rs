//! Fryer host capability layer
//!
//! The cook engine and the program store never touch hardware directly.
//! Everything they need from the board is expressed as a trait in this
//! crate and injected at construction time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Board glue (sketch, executor, UI)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  fryer-core (engine, cookbook)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  fryer-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ fryer-drivers │       │  board HALs   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalOutput`] - Heater and fan relays
//! - [`adc::AnalogInput`] - Thermistor divider
//! - [`clock::Clock`] - Monotonic millisecond time
//! - [`eeprom::ByteStore`] - Byte-addressable non-volatile memory
//! - [`HostIo`] - Everything the cook engine needs, in one bound

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod clock;
pub mod eeprom;
pub mod gpio;

pub use adc::AnalogInput;
pub use clock::Clock;
pub use eeprom::{ByteStore, EepromError};
pub use gpio::{DigitalOutput, Level};

/// Capabilities consumed by the cook engine
///
/// Blanket-implemented for any type providing digital outputs, analog
/// inputs and a monotonic clock.
pub trait HostIo: DigitalOutput + AnalogInput + Clock {}

impl<T: DigitalOutput + AnalogInput + Clock> HostIo for T {}
