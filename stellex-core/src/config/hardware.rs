//! Hardware configuration types
//!
//! These types describe the synthesizer board: how the PLL is clocked and
//! how long it needs after a word is shifted in.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Synthesizer clocking and bus timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SynthConfig {
    /// Reference oscillator frequency in Hz
    pub ref_clock_hz: u32,
    /// Phase comparator frequency in Hz (one N step)
    pub step_size_hz: u32,
    /// Division ratio of the prescaler in front of the PLL
    pub prescale_factor: u32,
    /// Width of every control word in bits
    pub word_bits: u8,
    /// Pause after each shifted word, in milliseconds
    pub settle_ms: u32,
}

impl SynthConfig {
    /// Default configuration for a Stellex unit with a 10 MHz reference
    pub const fn new() -> Self {
        Self {
            ref_clock_hz: 10_000_000,
            step_size_hz: 250_000,
            prescale_factor: 4,
            word_bits: 21,
            settle_ms: 1,
        }
    }

    /// R counter value giving the configured comparison frequency
    pub const fn r_divider(&self) -> u32 {
        self.ref_clock_hz / self.step_size_hz
    }

    /// Output frequency change for one N count, in Hz
    ///
    /// 250 kHz per count times the x4 prescaler: exactly 1 MHz, which is what
    /// lets the N divisor be programmed straight from a frequency in MHz.
    /// `None` if the product does not fit in a `u32`.
    pub const fn hz_per_n_unit(&self) -> Option<u32> {
        self.step_size_hz.checked_mul(self.prescale_factor)
    }

    /// Whether one N count is exactly one MHz of output
    pub const fn n_is_mhz(&self) -> bool {
        matches!(self.hz_per_n_unit(), Some(1_000_000))
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self::new()
    }
}
