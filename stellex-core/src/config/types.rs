//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capacity of the key event queue
pub const KEY_QUEUE_CAPACITY: usize = 5;

/// Tuning range of the synthesizer, in MHz
///
/// Bounds are exclusive: neither `min_mhz` nor `max_mhz` itself is a valid
/// setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrequencyLimits {
    /// Lower bound (exclusive)
    pub min_mhz: u32,
    /// Upper bound (exclusive)
    pub max_mhz: u32,
    /// Frequency used when nothing valid is available
    pub default_mhz: u32,
}

impl FrequencyLimits {
    /// Limits of the Stellex YIG oscillator
    pub const fn new() -> Self {
        Self {
            min_mhz: 5500,
            max_mhz: 9500,
            default_mhz: 6750,
        }
    }

    /// Whether `mhz` lies strictly inside the range
    pub const fn contains(&self, mhz: u32) -> bool {
        mhz > self.min_mhz && mhz < self.max_mhz
    }

    /// `mhz` if it is in range, otherwise the default frequency
    pub const fn or_default(&self, mhz: u32) -> u32 {
        if self.contains(mhz) {
            mhz
        } else {
            self.default_mhz
        }
    }
}

impl Default for FrequencyLimits {
    fn default() -> Self {
        Self::new()
    }
}

/// Character display geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayGeometry {
    /// Characters per line
    pub columns: u8,
    /// Number of lines
    pub rows: u8,
}

impl DisplayGeometry {
    /// CFA-633: two lines of sixteen characters
    pub const fn new() -> Self {
        Self {
            columns: 16,
            rows: 2,
        }
    }

    /// Whether a cursor position is on screen
    pub const fn contains(&self, column: u8, row: u8) -> bool {
        column < self.columns && row < self.rows
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self::new()
    }
}
