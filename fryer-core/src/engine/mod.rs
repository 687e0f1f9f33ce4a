//! Cook engine
//!
//! Runs an installed program step by step, drives the heater and fan, and
//! reports progress through an [`EventSink`]. The engine is polled
//! cooperatively and never blocks.

pub mod events;
pub mod machine;

pub use events::{CookEvent, EventSink, ENGINE_STOPPED_CODE, PREHEAT_COMPLETE_CODE};
pub use machine::{CookEngine, EngineState};
