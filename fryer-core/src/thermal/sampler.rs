//! Filtered temperature sampling
//!
//! Keeps the last [`SAMPLE_COUNT`] conversions in a ring and reports their
//! integer mean. Slots that were never written read as zero, so the mean
//! is biased low until the ring has been filled once; call
//! [`TemperatureSampler::prime`] when an accurate value is needed right
//! away.

use fryer_hal::AnalogInput;

use super::curve::raw_to_celsius;

/// Number of samples averaged by the filter
pub const SAMPLE_COUNT: usize = 10;

/// Moving-average temperature filter
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureSampler {
    /// Analog input the thermistor divider is wired to
    pin: u8,
    /// Last conversions in °C
    samples: [u8; SAMPLE_COUNT],
    /// Next slot to overwrite
    cursor: usize,
}

impl TemperatureSampler {
    /// Create a sampler with an empty (all zero) ring
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            samples: [0; SAMPLE_COUNT],
            cursor: 0,
        }
    }

    /// Take one reading and store it in the ring
    ///
    /// Returns the converted value of this single reading.
    pub fn sample<A: AnalogInput>(&mut self, adc: &mut A) -> u8 {
        let celsius = raw_to_celsius(adc.read_analog(self.pin));
        self.samples[self.cursor] = celsius;
        self.cursor = (self.cursor + 1) % SAMPLE_COUNT;
        celsius
    }

    /// Fill the whole ring with fresh readings and return the mean
    pub fn prime<A: AnalogInput>(&mut self, adc: &mut A) -> u8 {
        for _ in 0..SAMPLE_COUNT {
            self.sample(adc);
        }
        self.average()
    }

    /// Integer mean of the ring in °C
    pub fn average(&self) -> u8 {
        let total: u16 = self.samples.iter().map(|&s| s as u16).sum();
        (total / SAMPLE_COUNT as u16) as u8
    }

    /// Analog pin this sampler reads
    pub fn pin(&self) -> u8 {
        self.pin
    }
}
