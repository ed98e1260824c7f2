//! Synthesizer driver trait

use crate::config::{FrequencyLimits, SynthConfig};

/// Errors that can occur when programming the synthesizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SynthError {
    /// Requested frequency is outside the tuning range
    OutOfRange,
    /// Value does not fit in its control word field
    FieldOverflow,
    /// Clocking where one N count is not one MHz of output
    UnsupportedConfig,
}

/// Trait for a serially programmed PLL synthesizer
pub trait Synthesizer {
    /// Load the function and reference registers
    ///
    /// Fails with [`SynthError::UnsupportedConfig`] unless
    /// [`SynthConfig::n_is_mhz`] holds.
    fn initialize(&mut self, config: &SynthConfig) -> Result<(), SynthError>;

    /// Program the output frequency directly, in MHz
    ///
    /// The N divisor is loaded with `mhz` itself. No range check is applied
    /// here; see [`Synthesizer::tune`].
    fn set_mhz(&mut self, mhz: u32) -> Result<(), SynthError>;

    /// Whether the lock detect output reports lock
    fn is_locked(&mut self) -> bool;

    /// Program `mhz` if it lies inside `limits`
    fn tune(&mut self, mhz: u32, limits: &FrequencyLimits) -> Result<(), SynthError> {
        if !limits.contains(mhz) {
            return Err(SynthError::OutOfRange);
        }
        self.set_mhz(mhz)
    }
}
