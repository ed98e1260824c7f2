//! LMX2326 control words
//!
//! Every word is 21 bits wide and shifted MSB first. Bits 0-1 are the
//! control tag:
//!
//! | Tag  | Register                      |
//! |------|-------------------------------|
//! | 0b00 | R counter (reference divider) |
//! | 0b01 | N counter (feedback divider)  |
//! | 0b11 | Function / initialization     |

use stellex_core::traits::SynthError;

/// Width of every LMX2326 control word
pub const WORD_BITS: u8 = 21;

/// Widest word a [`PllWord`] can hold
pub const MAX_WORD_BITS: u8 = 32;

// Field layout
const N_SHIFT: u32 = 2;
const N_BITS: u32 = 19;
const R_SHIFT: u32 = 2;
const R_BITS: u32 = 14;
const LOCK_DETECT_PRECISION: u32 = 1 << 20;
const DIGITAL_LOCK_DETECT: u32 = 1 << 4;
const POSITIVE_VCO_POLARITY: u32 = 1 << 7;

/// Register selected by a word's control tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LatchMode {
    /// Reference counter
    R = 0b00,
    /// Feedback counter
    N = 0b01,
    /// Function latch with initialization
    Init = 0b11,
}

impl LatchMode {
    /// Decode the tag of a raw word
    pub fn from_word(value: u32) -> Option<Self> {
        match value & 0b11 {
            0b00 => Some(LatchMode::R),
            0b01 => Some(LatchMode::N),
            0b11 => Some(LatchMode::Init),
            _ => None,
        }
    }
}

/// Options loaded by the initialization word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FunctionFlags {
    /// Route digital lock detect to the LD pin
    pub digital_lock_detect: bool,
    /// VCO frequency rises with tuning voltage
    pub positive_vco_polarity: bool,
}

impl FunctionFlags {
    /// Settings for the Stellex YIG loop: digital lock detect, positive VCO
    pub const fn new() -> Self {
        Self {
            digital_lock_detect: true,
            positive_vco_polarity: true,
        }
    }
}

impl Default for FunctionFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// A control word ready to be shifted out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllWord {
    /// Number of bits to shift
    pub bits: u8,
    /// Word contents, right aligned
    pub value: u32,
}

impl PllWord {
    /// Raw word; bits above `bits` are ignored when shifting
    ///
    /// `bits` is capped at [`MAX_WORD_BITS`].
    pub const fn new(bits: u8, value: u32) -> Self {
        let bits = if bits > MAX_WORD_BITS {
            MAX_WORD_BITS
        } else {
            bits
        };
        Self { bits, value }
    }

    /// N counter word
    pub fn n_divisor(n: u32) -> Result<Self, SynthError> {
        if n >= 1 << N_BITS {
            return Err(SynthError::FieldOverflow);
        }
        Ok(Self::new(WORD_BITS, LatchMode::N as u32 | (n << N_SHIFT)))
    }

    /// R counter word
    ///
    /// With `five_cycle_lock_detect` the chip waits for five consecutive
    /// in-phase reference cycles before asserting lock.
    pub fn r_divider(r: u32, five_cycle_lock_detect: bool) -> Result<Self, SynthError> {
        if r >= 1 << R_BITS {
            return Err(SynthError::FieldOverflow);
        }
        let mut value = LatchMode::R as u32 | (r << R_SHIFT);
        if five_cycle_lock_detect {
            value |= LOCK_DETECT_PRECISION;
        }
        Ok(Self::new(WORD_BITS, value))
    }

    /// Initialization word
    pub fn initialize(flags: FunctionFlags) -> Self {
        let mut value = LatchMode::Init as u32;
        if flags.digital_lock_detect {
            value |= DIGITAL_LOCK_DETECT;
        }
        if flags.positive_vco_polarity {
            value |= POSITIVE_VCO_POLARITY;
        }
        Self::new(WORD_BITS, value)
    }

    /// Register the word is destined for
    pub fn latch_mode(&self) -> Option<LatchMode> {
        LatchMode::from_word(self.value)
    }

    /// Bits in shift order, most significant first
    pub fn iter_bits(&self) -> impl Iterator<Item = bool> {
        let value = self.value;
        (0..self.bits.min(MAX_WORD_BITS))
            .rev()
            .map(move |i| value & (1 << i) != 0)
    }
}
