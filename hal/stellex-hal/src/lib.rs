//! Stellex Hardware Abstraction Layer
//!
//! This crate defines the small capability set the controller needs from the
//! board: discrete output/input lines and a readiness-gated byte transport.
//! The protocol and driver crates only ever talk to these traits, so the same
//! logic runs against real registers or a simulated backend in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  stellex-drivers / stellex-core          │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  stellex-hal (this crate - traits)       │
//! └──────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  embedded-io  │
//! │  pin drivers  │       │ serial ports  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Discrete control lines
//! - [`uart::UartTx`], [`uart::UartRx`] - Blocking byte transport

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{EhInput, EhOutput, InputPin, OutputPin};
pub use uart::{IoUart, UartConfig, UartRx, UartTx};
