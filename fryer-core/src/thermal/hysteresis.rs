//! Bang-bang heater control with an asymmetric dead band
//!
//! The fryer reaches target with the heater fully on. Once there, the
//! heater stays off until the temperature falls to `offset` degrees below
//! target, which keeps the relay from chattering around the set point.

/// Heater on/off decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hysteresis {
    /// Low band below target (°C)
    offset_c: u8,
    /// Target was reached and temperature has stayed inside the band
    on_temperature: bool,
}

impl Hysteresis {
    /// Create a controller that has not reached temperature yet
    ///
    /// `offset_c` must be greater than 1; [`crate::EngineConfig::validate`]
    /// enforces this for the engine.
    pub const fn new(offset_c: u8) -> Self {
        Self {
            offset_c,
            on_temperature: false,
        }
    }

    /// Evaluate the filtered temperature against `target_c`
    ///
    /// Returns the heater output (`true` = heater on).
    pub fn update(&mut self, current_c: u8, target_c: u8) -> bool {
        let low_threshold = target_c as i16 - self.offset_c as i16;

        self.on_temperature = current_c >= target_c
            || (self.on_temperature && current_c as i16 > low_threshold);

        self.heater_on()
    }

    /// Re-evaluate against a new target without the band
    ///
    /// Used on step change: the band only applies once the new target has
    /// been reached.
    pub fn retarget(&mut self, current_c: u8, target_c: u8) {
        self.on_temperature = current_c >= target_c;
    }

    /// Forget that the target was reached
    pub fn reset(&mut self) {
        self.on_temperature = false;
    }

    /// Check if the fryer is at temperature
    pub fn is_on_temperature(&self) -> bool {
        self.on_temperature
    }

    /// Heater output implied by the current state
    pub fn heater_on(&self) -> bool {
        !self.on_temperature
    }

    /// Configured low band (°C)
    pub fn offset_c(&self) -> u8 {
        self.offset_c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heats_until_target() {
        let mut control = Hysteresis::new(5);

        // Never reached: heater on even inside the band
        assert!(control.update(96, 100));
        assert!(control.update(99, 100));
        assert!(!control.is_on_temperature());

        assert!(!control.update(100, 100));
        assert!(control.is_on_temperature());
    }

    #[test]
    fn test_band_holds_heater_off() {
        let mut control = Hysteresis::new(5);
        control.update(100, 100);

        for temp in (96..=100).rev() {
            assert!(!control.update(temp, 100), "heater on at {}", temp);
        }

        // 95 is target - offset: heater comes back on
        assert!(control.update(95, 100));
        assert!(!control.is_on_temperature());

        // And stays on inside the band until target is reached again
        assert!(control.update(98, 100));
        assert!(!control.update(101, 100));
    }

    #[test]
    fn test_zero_target_never_heats() {
        let mut control = Hysteresis::new(5);
        assert!(!control.update(0, 0));
        assert!(!control.update(20, 0));
    }

    #[test]
    fn test_low_target_does_not_underflow() {
        let mut control = Hysteresis::new(5);
        assert!(!control.update(3, 3));
        // Threshold is negative, so any reading keeps it on temperature
        assert!(!control.update(0, 3));
    }

    #[test]
    fn test_retarget() {
        let mut control = Hysteresis::new(5);
        control.update(180, 180);

        control.retarget(180, 200);
        assert!(!control.is_on_temperature());
        assert!(control.heater_on());

        control.retarget(180, 150);
        assert!(control.is_on_temperature());

        control.reset();
        assert!(control.heater_on());
    }
}
