//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and the peripheral drivers.

pub mod display;
pub mod synth;

pub use display::{DisplayDriver, DisplayError, DisplayExt};
pub use synth::{SynthError, Synthesizer};
