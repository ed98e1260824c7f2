//! Synthesizer drivers
//!
//! The LMX2326 is programmed by shifting 21-bit words into an input register
//! and then pulsing latch enable. The two low bits of each word select which
//! internal register the latch pulse updates.

pub mod lmx2326;
pub mod word;

pub use lmx2326::Lmx2326;
pub use word::{FunctionFlags, LatchMode, PllWord, MAX_WORD_BITS, WORD_BITS};
