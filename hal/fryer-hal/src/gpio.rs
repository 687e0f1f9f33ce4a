//! Digital output abstractions
//!
//! Pins are addressed by number so a single host object can drive the
//! heater relay and the fan relay.

/// Logic level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Check if this is the high level
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Digital output capability
///
/// Writes are synchronous and assumed to succeed.
pub trait DigitalOutput {
    /// Drive `pin` to `level`
    fn write_digital(&mut self, pin: u8, level: Level);

    /// Drive `pin` high when `on` is true, low otherwise
    fn set_output(&mut self, pin: u8, on: bool) {
        self.write_digital(pin, Level::from(on));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockOutputs {
        levels: [Level; 4],
    }

    impl DigitalOutput for MockOutputs {
        fn write_digital(&mut self, pin: u8, level: Level) {
            self.levels[pin as usize] = level;
        }
    }

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(bool::from(Level::High));
    }

    #[test]
    fn test_set_output() {
        let mut outputs = MockOutputs {
            levels: [Level::Low; 4],
        };
        outputs.set_output(2, true);
        assert_eq!(outputs.levels[2], Level::High);
        outputs.set_output(2, false);
        assert_eq!(outputs.levels[2], Level::Low);
    }
}
