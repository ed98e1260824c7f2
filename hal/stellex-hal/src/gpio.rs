//! GPIO line abstractions
//!
//! Provides traits for the discrete control lines (synthesizer data, clock,
//! latch enable and lock detect) plus adapters for `embedded-hal` pins.

use core::convert::Infallible;

use embedded_hal::digital;

/// Digital output line
///
/// Writes are infallible: a board either drives the line or it does not.
pub trait OutputPin {
    /// Set the line high (logic 1)
    fn set_high(&mut self);

    /// Set the line low (logic 0)
    fn set_low(&mut self);

    /// Toggle the line state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the line to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the line is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the line is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input line
///
/// Takes `&mut self` so that implementations may sample a peripheral
/// register, the same way `embedded-hal` 1.0 does.
pub trait InputPin {
    /// Check if the line reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the line reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// Adapter driving an infallible `embedded-hal` output pin
///
/// The last written level is remembered so that [`OutputPin::is_set_high`]
/// does not need to read the pin back.
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P> EhOutput<P>
where
    P: digital::OutputPin<Error = Infallible>,
{
    /// Wrap a pin and drive it low
    pub fn new(mut pin: P) -> Self {
        pin.set_low().unwrap_or_else(|e| match e {});
        Self { pin, high: false }
    }

    /// Release the wrapped pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EhOutput<P>
where
    P: digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        self.pin.set_high().unwrap_or_else(|e| match e {});
        self.high = true;
    }

    fn set_low(&mut self) {
        self.pin.set_low().unwrap_or_else(|e| match e {});
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Adapter reading an infallible `embedded-hal` input pin
pub struct EhInput<P> {
    pin: P,
}

impl<P> EhInput<P>
where
    P: digital::InputPin<Error = Infallible>,
{
    /// Wrap a pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the wrapped pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> InputPin for EhInput<P>
where
    P: digital::InputPin<Error = Infallible>,
{
    fn is_high(&mut self) -> bool {
        self.pin.is_high().unwrap_or_else(|e| match e {})
    }
}
