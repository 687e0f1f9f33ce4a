//! Engine configuration
//!
//! Board glue builds an [`EngineConfig`] (or takes the default) and hands
//! it to the cook engine, which validates it once at construction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default refresh cadence of the control loop (ms)
pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 500;

/// Default time the engine waits after preheat completes (s)
pub const DEFAULT_PREHEAT_TIMEOUT_S: u32 = 600;

/// Default hysteresis low band (°C)
///
/// Lower values track the target more closely but switch the heater relay
/// more often.
pub const DEFAULT_HYSTERESIS_OFFSET_C: u8 = 5;

/// Smallest hysteresis band the relays tolerate (exclusive)
pub const MIN_HYSTERESIS_OFFSET_C: u8 = 1;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Hysteresis offset must be greater than 1 °C
    HysteresisTooNarrow,
    /// Refresh interval must be non-zero
    ZeroRefreshInterval,
    /// Two functions share the same pin
    PinConflict,
}

/// Pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FryerPins {
    /// Heater relay output
    pub heater: u8,
    /// Fan relay output
    pub fan: u8,
    /// Thermistor divider analog input
    pub sensor: u8,
}

impl Default for FryerPins {
    fn default() -> Self {
        Self {
            heater: 2,
            fan: 3,
            sensor: 0,
        }
    }
}

/// Cook engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Minimum time between control refreshes (ms)
    pub refresh_interval_ms: u32,
    /// Auto-stop delay after the preheat target is reached (s)
    pub preheat_timeout_s: u32,
    /// Hysteresis low band below target (°C)
    pub hysteresis_offset_c: u8,
    /// Pin assignment
    pub pins: FryerPins,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            preheat_timeout_s: DEFAULT_PREHEAT_TIMEOUT_S,
            hysteresis_offset_c: DEFAULT_HYSTERESIS_OFFSET_C,
            pins: FryerPins::default(),
        }
    }
}

impl EngineConfig {
    /// Check the configuration for values that would misbehave at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hysteresis_offset_c <= MIN_HYSTERESIS_OFFSET_C {
            return Err(ConfigError::HysteresisTooNarrow);
        }

        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }

        if self.pins.heater == self.pins.fan {
            return Err(ConfigError::PinConflict);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.refresh_interval_ms, 500);
        assert_eq!(config.hysteresis_offset_c, 5);
    }

    #[test]
    fn test_narrow_hysteresis_rejected() {
        for offset in [0, 1] {
            let config = EngineConfig {
                hysteresis_offset_c: offset,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::HysteresisTooNarrow));
        }

        let config = EngineConfig {
            hysteresis_offset_c: 2,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = EngineConfig {
            refresh_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRefreshInterval));
    }

    #[test]
    fn test_pin_conflict() {
        let config = EngineConfig {
            pins: FryerPins {
                heater: 4,
                fan: 4,
                sensor: 0,
            },
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PinConflict));
    }
}
