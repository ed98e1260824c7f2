//! CFA-633 Display Packet Protocol
//!
//! This crate defines the serial protocol spoken between the controller and
//! the CrystalFontz CFA-633 character display. Every packet, in either
//! direction, uses the same fixed layout:
//!
//! ```text
//! ┌─────────┬────────┬─────────────┬─────────┬─────────┐
//! │ COMMAND │ LENGTH │ PAYLOAD     │ CRC LSB │ CRC MSB │
//! │ 1B      │ 1B     │ 0–16B       │ 1B      │ 1B      │
//! └─────────┴────────┴─────────────┴─────────┴─────────┘
//! ```
//!
//! The CRC is the reflected CRC-16 used by IrDA and PPP, computed over
//! COMMAND, LENGTH and PAYLOAD. There is no start byte: a receiver that loses
//! a byte stays out of step until a packet boundary happens to line up again.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod crc;
pub mod events;
pub mod frame;
pub mod messages;

pub use crc::checksum;
pub use events::{Glyph, KeyEvent};
pub use frame::{Frame, FrameError, FrameParser, ParseState, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{CursorStyle, DisplayCommand, DisplayReport};
