//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in stellex-core for the two peripherals on the controller board:
//!
//! - CFA-633 character display (packet protocol over UART)
//! - LMX2326 PLL synthesizer (bit-banged three-wire bus)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod display;
pub mod synth;

pub use display::Cfa633;
pub use synth::{FunctionFlags, LatchMode, Lmx2326, PllWord};
