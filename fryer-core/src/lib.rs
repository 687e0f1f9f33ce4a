//! Board-agnostic core logic for the countertop fryer firmware
//!
//! This crate contains everything that does not depend on a specific
//! board:
//!
//! - Cook program data model
//! - Temperature sampling and bang-bang heater hysteresis
//! - Cook engine state machine
//! - Fixed-width program store codec and cookbook
//! - Engine configuration
//!
//! Hardware is reached only through the capability traits in `fryer-hal`.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod engine;
pub mod program;
pub mod store;
pub mod thermal;

pub use config::{ConfigError, EngineConfig, FryerPins};
pub use engine::{CookEngine, CookEvent, EngineState, EventSink};
pub use program::{CookProgram, CookStep, ProgramError, MAX_STEPS, NAME_CAPACITY};
pub use store::{Cookbook, DecodeError, StoreError};
