//! Configuration types
//!
//! Compile-time defaults describing the synthesizer hardware, the tuning
//! range it is allowed to cover and the display attached to it.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
