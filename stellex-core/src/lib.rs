//! Board-agnostic core logic for the synthesizer controller
//!
//! This crate contains the pieces that sit between the receive interrupt and
//! the cooperative main loop, none of which depend on specific hardware:
//!
//! - Key event queue shared by interrupt and thread context
//! - Packet receiver driven one byte per interrupt
//! - Driver traits (display, synthesizer)
//! - Configuration constants

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod queue;
pub mod receiver;
pub mod traits;

pub use queue::{EventQueue, KeyQueue, QueueError, QueueStatus};
pub use receiver::{PacketReceiver, ReceiveOutcome, ReceiverStats};
