//! Analog input abstraction

/// Analog input capability
pub trait AnalogInput {
    /// Read the raw conversion result for `pin`
    ///
    /// The fryer core expects a 10-bit converter (0-1023).
    fn read_analog(&mut self, pin: u8) -> u16;
}
