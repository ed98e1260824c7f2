//! Display driver trait for the CFA-633

use stellex_protocol::{CursorStyle, FrameError, Glyph};

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Payload does not fit in a single packet
    PayloadTooLarge,
    /// Parameter outside the range the display accepts
    ValueOutOfRange,
    /// The serial link reported an error
    Transport,
    /// Encode buffer cannot hold the packet
    BufferTooSmall,
    /// A display report could not be interpreted
    InvalidReport,
}

impl From<FrameError> for DisplayError {
    fn from(error: FrameError) -> Self {
        match error {
            FrameError::PayloadTooLarge => DisplayError::PayloadTooLarge,
            FrameError::ValueOutOfRange => DisplayError::ValueOutOfRange,
            FrameError::BufferTooSmall => DisplayError::BufferTooSmall,
            FrameError::UnknownReport
            | FrameError::InvalidLength
            | FrameError::InvalidKeyCode => DisplayError::InvalidReport,
        }
    }
}

/// Trait for display communication
///
/// Every method sends one packet and returns once its last byte has been
/// handed to the transmitter. The display's replies are not waited for.
pub trait DisplayDriver {
    /// Clear the entire screen
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Replace a whole line
    ///
    /// - `row`: 0 (top) or 1 (bottom)
    /// - `text`: exactly 16 characters
    fn set_line(&mut self, row: u8, text: &[u8; 16]) -> Result<(), DisplayError>;

    /// Move the cursor
    fn set_cursor_position(&mut self, column: u8, row: u8) -> Result<(), DisplayError>;

    /// Change the cursor appearance
    fn set_cursor_style(&mut self, style: CursorStyle) -> Result<(), DisplayError>;

    /// LCD contrast, 0-50
    fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError>;

    /// Backlight brightness, 0-100
    fn set_brightness(&mut self, brightness: u8) -> Result<(), DisplayError>;

    /// Write up to 14 characters starting at column `x` of row `y`
    fn send_data(&mut self, x: u8, y: u8, data: &[u8]) -> Result<(), DisplayError>;

    /// Send an echo request
    fn ping(&mut self, data: &[u8]) -> Result<(), DisplayError>;

    /// Ask the display for its version string
    fn request_version(&mut self) -> Result<(), DisplayError>;
}

/// Helpers built on top of [`DisplayDriver`]
pub trait DisplayExt: DisplayDriver {
    /// Draw one of the custom glyphs at a coordinate
    fn draw_glyph(&mut self, x: u8, y: u8, glyph: Glyph) -> Result<(), DisplayError> {
        self.send_data(x, y, &[glyph.code()])
    }

    /// Write `text` on a row, padded with spaces or cut to the line width
    fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        let mut line = [b' '; 16];
        let bytes = text.as_bytes();
        let len = bytes.len().min(line.len());
        line[..len].copy_from_slice(&bytes[..len]);
        self.set_line(row, &line)
    }
}

// Blanket implementation for all DisplayDriver types
impl<T: DisplayDriver> DisplayExt for T {}
