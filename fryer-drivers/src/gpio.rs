//! Relay outputs on `embedded-hal` pins
//!
//! Adapts the heater and fan relay pins of a board to the numbered
//! [`DigitalOutput`] capability the cook engine drives. Each relay can be
//! active-high (default) or active-low, so the engine always works in
//! logical on/off terms.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use fryer_core::FryerPins;
use fryer_hal::{DigitalOutput, Level};

/// Relay pin assignment and polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// Pin number the engine addresses the relay by
    pub pin: u8,
    /// If true, relay ON = pin LOW (active-low relay boards)
    pub inverted: bool,
}

impl PinConfig {
    /// Active-high relay on `pin`
    pub const fn active_high(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Active-low relay on `pin`
    pub const fn active_low(pin: u8) -> Self {
        Self { pin, inverted: true }
    }
}

/// A single relay output
pub struct Relay<P> {
    pin: P,
    config: PinConfig,
    /// Current logical state (true = relay on)
    on: bool,
}

impl<P: OutputPin<Error = Infallible>> Relay<P> {
    /// Create a relay output, initially off
    pub fn new(pin: P, config: PinConfig) -> Self {
        let mut relay = Self {
            pin,
            config,
            on: false,
        };
        relay.set_on(false);
        relay
    }

    /// Switch the relay
    pub fn set_on(&mut self, on: bool) {
        self.on = on;

        let result = if on != self.config.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match result {
            Ok(()) => {}
            Err(e) => match e {},
        }
    }

    /// Current logical state
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Pin assignment and polarity
    pub fn config(&self) -> PinConfig {
        self.config
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

/// Heater and fan relays addressed by pin number
///
/// Writes to any other pin number are ignored.
pub struct RelayBank<H, F> {
    heater: Relay<H>,
    fan: Relay<F>,
}

impl<H, F> RelayBank<H, F>
where
    H: OutputPin<Error = Infallible>,
    F: OutputPin<Error = Infallible>,
{
    /// Bind relay pins to their configurations
    pub fn new(heater: H, heater_config: PinConfig, fan: F, fan_config: PinConfig) -> Self {
        Self {
            heater: Relay::new(heater, heater_config),
            fan: Relay::new(fan, fan_config),
        }
    }

    /// Bind relay pins to the numbers in `pins`, both with the same polarity
    pub fn from_pins(heater: H, fan: F, pins: &FryerPins, inverted: bool) -> Self {
        Self::new(
            heater,
            PinConfig {
                pin: pins.heater,
                inverted,
            },
            fan,
            PinConfig {
                pin: pins.fan,
                inverted,
            },
        )
    }

    /// Heater relay
    pub fn heater(&self) -> &Relay<H> {
        &self.heater
    }

    /// Fan relay
    pub fn fan(&self) -> &Relay<F> {
        &self.fan
    }

    /// Release both pins
    pub fn into_inner(self) -> (H, F) {
        (self.heater.into_inner(), self.fan.into_inner())
    }
}

impl<H, F> DigitalOutput for RelayBank<H, F>
where
    H: OutputPin<Error = Infallible>,
    F: OutputPin<Error = Infallible>,
{
    fn write_digital(&mut self, pin: u8, level: Level) {
        if pin == self.heater.config.pin {
            self.heater.set_on(level.is_high());
        } else if pin == self.fan.config.pin {
            self.fan.set_on(level.is_high());
        }
    }
}
