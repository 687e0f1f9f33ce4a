//! Temperature sensing and heater control
//!
//! - [`curve`]: thermistor raw reading to °C conversion
//! - [`sampler`]: 10-sample moving average filter
//! - [`hysteresis`]: bang-bang heater decision with a low dead band

pub mod curve;
pub mod hysteresis;
pub mod sampler;

pub use curve::{celsius_to_raw, raw_to_celsius, raw_to_celsius_x10};
pub use hysteresis::Hysteresis;
pub use sampler::{TemperatureSampler, SAMPLE_COUNT};
