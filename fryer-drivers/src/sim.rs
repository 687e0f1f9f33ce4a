//! Simulated fryer host
//!
//! A software stand-in for the board: a manual millisecond clock, sixteen
//! digital outputs and a thermistor input backed by a first-order oven
//! model. The heater warms the chamber at a fixed rate while its output is
//! high; otherwise the chamber drifts back toward ambient.
//!
//! Used for bench runs of programs and by the integration tests.

use heapless::Vec;

use fryer_core::thermal::celsius_to_raw;
use fryer_core::FryerPins;
use fryer_hal::{AnalogInput, Clock, DigitalOutput, Level};

/// Number of simulated digital pins
pub const PIN_COUNT: usize = 16;

/// Output changes kept in the switch log
pub const LOG_CAPACITY: usize = 64;

/// Millidegrees per degree
const MILLI: i32 = 1000;

/// Recorded output level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputChange {
    /// Simulated time of the change (ms)
    pub at_ms: u64,
    /// Pin number
    pub pin: u8,
    /// New level
    pub level: Level,
}

/// Oven model parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OvenModel {
    /// Room temperature (°C)
    pub ambient_c: u8,
    /// Warm-up rate with the heater on (millidegrees per second)
    pub heat_rate: i32,
    /// Cool-down rate toward ambient (millidegrees per second)
    pub cool_rate: i32,
}

impl Default for OvenModel {
    fn default() -> Self {
        Self {
            ambient_c: 25,
            heat_rate: 2_000,
            cool_rate: 500,
        }
    }
}

/// Simulated fryer board
pub struct SimulatedFryer {
    now_ms: u64,
    pins: FryerPins,
    levels: [Level; PIN_COUNT],
    log: Vec<OutputChange, LOG_CAPACITY>,
    /// Chamber temperature in millidegrees
    chamber_mc: i32,
    /// Thermal model, `None` holds the temperature fixed
    model: Option<OvenModel>,
}

impl SimulatedFryer {
    /// Create a board at a fixed temperature
    pub fn new(pins: FryerPins, celsius: u8) -> Self {
        Self {
            now_ms: 0,
            pins,
            levels: [Level::Low; PIN_COUNT],
            log: Vec::new(),
            chamber_mc: celsius as i32 * MILLI,
            model: None,
        }
    }

    /// Create a board whose temperature follows the heater
    pub fn with_model(pins: FryerPins, model: OvenModel) -> Self {
        let mut sim = Self::new(pins, model.ambient_c);
        sim.model = Some(model);
        sim
    }

    /// Advance the clock, running the oven model over the interval
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;

        let Some(model) = self.model else {
            return;
        };

        let scale = |rate: i32| (rate as i64 * ms as i64 / MILLI as i64) as i32;
        if self.heater() {
            self.chamber_mc = self.chamber_mc.saturating_add(scale(model.heat_rate));
        } else {
            let ambient_mc = model.ambient_c as i32 * MILLI;
            let drop = scale(model.cool_rate);
            self.chamber_mc = if self.chamber_mc > ambient_mc {
                (self.chamber_mc - drop).max(ambient_mc)
            } else {
                (self.chamber_mc + drop).min(ambient_mc)
            };
        }
        self.chamber_mc = self.chamber_mc.clamp(0, u8::MAX as i32 * MILLI);
    }

    /// Force the chamber temperature
    pub fn set_temperature(&mut self, celsius: u8) {
        self.chamber_mc = celsius as i32 * MILLI;
    }

    /// Chamber temperature (°C, truncated)
    pub fn temperature(&self) -> u8 {
        (self.chamber_mc / MILLI) as u8
    }

    /// Level last written to `pin`
    pub fn level(&self, pin: u8) -> Level {
        self.levels
            .get(pin as usize)
            .copied()
            .unwrap_or(Level::Low)
    }

    /// Heater output is high
    pub fn heater(&self) -> bool {
        self.level(self.pins.heater).is_high()
    }

    /// Fan output is high
    pub fn fan(&self) -> bool {
        self.level(self.pins.fan).is_high()
    }

    /// Output changes in time order, oldest first
    ///
    /// Recording stops once the log is full.
    pub fn log(&self) -> &[OutputChange] {
        &self.log
    }

    /// Forget recorded output changes
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl DigitalOutput for SimulatedFryer {
    fn write_digital(&mut self, pin: u8, level: Level) {
        let Some(slot) = self.levels.get_mut(pin as usize) else {
            return;
        };
        if *slot != level {
            *slot = level;
            let _ = self.log.push(OutputChange {
                at_ms: self.now_ms,
                pin,
                level,
            });
        }
    }
}

impl AnalogInput for SimulatedFryer {
    fn read_analog(&mut self, pin: u8) -> u16 {
        if pin == self.pins.sensor {
            celsius_to_raw(self.temperature())
        } else {
            0
        }
    }
}

impl Clock for SimulatedFryer {
    fn now_millis(&self) -> u64 {
        self.now_ms
    }
}
