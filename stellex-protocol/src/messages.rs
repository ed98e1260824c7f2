//! Message types for the CFA-633 packet protocol
//!
//! Message types are divided into two categories:
//! - Controller → Display: screen and configuration commands
//! - Display → Controller: keypad reports

use crate::events::KeyEvent;
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use heapless::Vec;

// Command IDs: Controller → Display
pub const CMD_PING: u8 = 0;
pub const CMD_GET_VERSION: u8 = 1;
pub const CMD_CLEAR: u8 = 6;
pub const CMD_SET_LINE_1: u8 = 7;
pub const CMD_SET_LINE_2: u8 = 8;
pub const CMD_SET_CURSOR_POSITION: u8 = 11;
pub const CMD_SET_CURSOR_STYLE: u8 = 12;
pub const CMD_SET_CONTRAST: u8 = 13;
pub const CMD_SET_BRIGHTNESS: u8 = 14;
pub const CMD_SEND_DATA: u8 = 31;

// Report IDs: Display → Controller
pub const REPORT_KEY_ACTIVITY: u8 = 0x80;

/// Display dimensions
pub const DISPLAY_ROWS: u8 = 2;
pub const DISPLAY_COLS: u8 = 16;

/// Highest contrast setting (very dark)
pub const MAX_CONTRAST: u8 = 50;

/// Backlight fully on
pub const MAX_BRIGHTNESS: u8 = 100;

/// Longest text a single send-data command can carry
pub const MAX_SEND_DATA_LEN: usize = MAX_PAYLOAD_SIZE - 2;

/// Cursor appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CursorStyle {
    /// No cursor
    Hidden,
    /// Blinking block
    BlinkingBlock,
    /// Underscore
    Underscore,
    /// Blinking block plus underscore
    BlinkingBlockUnderscore,
}

impl CursorStyle {
    /// Wire value (0-3)
    pub fn to_byte(self) -> u8 {
        match self {
            CursorStyle::Hidden => 0,
            CursorStyle::BlinkingBlock => 1,
            CursorStyle::Underscore => 2,
            CursorStyle::BlinkingBlockUnderscore => 3,
        }
    }

    /// Parse a wire value
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(CursorStyle::Hidden),
            1 => Some(CursorStyle::BlinkingBlock),
            2 => Some(CursorStyle::Underscore),
            3 => Some(CursorStyle::BlinkingBlockUnderscore),
            _ => None,
        }
    }
}

/// Commands from the controller to the display
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayCommand<'a> {
    /// Echo request carrying up to 16 bytes
    Ping(&'a [u8]),
    /// Request hardware and firmware version
    GetVersion,
    /// Clear the entire screen
    Clear,
    /// Replace the top line (exactly 16 characters)
    SetLine1(&'a [u8; 16]),
    /// Replace the bottom line (exactly 16 characters)
    SetLine2(&'a [u8; 16]),
    /// Move the cursor
    SetCursorPosition { column: u8, row: u8 },
    /// Change the cursor appearance
    SetCursorStyle(CursorStyle),
    /// LCD contrast, 0 (light) to 50 (very dark); 16 looks about right
    SetContrast(u8),
    /// Backlight, 0 (off) to 100 (fully on)
    SetBrightness(u8),
    /// Write characters starting at a coordinate
    SendData { x: u8, y: u8, data: &'a [u8] },
}

impl<'a> DisplayCommand<'a> {
    /// Command identifier on the wire
    pub fn command_id(&self) -> u8 {
        match self {
            DisplayCommand::Ping(_) => CMD_PING,
            DisplayCommand::GetVersion => CMD_GET_VERSION,
            DisplayCommand::Clear => CMD_CLEAR,
            DisplayCommand::SetLine1(_) => CMD_SET_LINE_1,
            DisplayCommand::SetLine2(_) => CMD_SET_LINE_2,
            DisplayCommand::SetCursorPosition { .. } => CMD_SET_CURSOR_POSITION,
            DisplayCommand::SetCursorStyle(_) => CMD_SET_CURSOR_STYLE,
            DisplayCommand::SetContrast(_) => CMD_SET_CONTRAST,
            DisplayCommand::SetBrightness(_) => CMD_SET_BRIGHTNESS,
            DisplayCommand::SendData { .. } => CMD_SEND_DATA,
        }
    }

    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let id = self.command_id();
        match self {
            DisplayCommand::Ping(data) => Frame::new(id, data),
            DisplayCommand::GetVersion | DisplayCommand::Clear => Ok(Frame::empty(id)),
            DisplayCommand::SetLine1(line) | DisplayCommand::SetLine2(line) => {
                Frame::new(id, &line[..])
            }
            DisplayCommand::SetCursorPosition { column, row } => Frame::new(id, &[*column, *row]),
            DisplayCommand::SetCursorStyle(style) => Frame::new(id, &[style.to_byte()]),
            DisplayCommand::SetContrast(contrast) => {
                if *contrast > MAX_CONTRAST {
                    return Err(FrameError::ValueOutOfRange);
                }
                Frame::new(id, &[*contrast])
            }
            DisplayCommand::SetBrightness(brightness) => {
                if *brightness > MAX_BRIGHTNESS {
                    return Err(FrameError::ValueOutOfRange);
                }
                Frame::new(id, &[*brightness])
            }
            DisplayCommand::SendData { x, y, data } => {
                // Payload: [x][y][chars...]
                if data.len() > MAX_SEND_DATA_LEN {
                    return Err(FrameError::PayloadTooLarge);
                }

                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload.push(*x).map_err(|_| FrameError::PayloadTooLarge)?;
                payload.push(*y).map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(data)
                    .map_err(|_| FrameError::PayloadTooLarge)?;

                Frame::new(id, &payload)
            }
        }
    }
}

/// Reports parsed from display-originated frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayReport {
    /// A key went down or up
    KeyActivity(KeyEvent),
}

impl DisplayReport {
    /// Parse a report from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.command {
            REPORT_KEY_ACTIVITY => {
                if frame.length != 1 || frame.payload.len() != 1 {
                    return Err(FrameError::InvalidLength);
                }
                let event =
                    KeyEvent::from_byte(frame.payload[0]).ok_or(FrameError::InvalidKeyCode)?;
                Ok(DisplayReport::KeyActivity(event))
            }
            _ => Err(FrameError::UnknownReport),
        }
    }

    /// Encode this report into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            DisplayReport::KeyActivity(event) => Frame::new(REPORT_KEY_ACTIVITY, &[event.to_byte()]),
        }
    }
}
