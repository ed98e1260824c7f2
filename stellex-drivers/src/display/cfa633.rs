//! CrystalFontz CFA-633 display driver
//!
//! The display is a 16x2 character LCD with a six-key keypad. It is
//! controlled entirely through packets on a serial link:
//!
//! ```text
//! [COMMAND][LENGTH][PAYLOAD 0-16][CRC LSB][CRC MSB]
//! ```
//!
//! This driver only transmits. Replies and key reports come back through the
//! receive interrupt and are handled by
//! [`PacketReceiver`](stellex_core::PacketReceiver).

use stellex_core::config::DisplayGeometry;
use stellex_core::traits::{DisplayDriver, DisplayError};
use stellex_hal::UartTx;
use stellex_protocol::{CursorStyle, DisplayCommand, Frame, MAX_FRAME_SIZE};

/// CFA-633 driver over a blocking UART
pub struct Cfa633<T> {
    uart: T,
    geometry: DisplayGeometry,
}

impl<T: UartTx> Cfa633<T> {
    /// Create a driver for a display already running at the configured baud
    pub fn new(uart: T) -> Self {
        Self {
            uart,
            geometry: DisplayGeometry::new(),
        }
    }

    /// Screen size used to validate cursor positions
    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    /// Release the UART
    pub fn release(self) -> T {
        self.uart
    }

    /// Build and transmit a packet
    ///
    /// Sends COMMAND, LENGTH, the payload, then the checksum low byte and
    /// high byte, each through the blocking transmitter.
    pub fn send(&mut self, command: u8, payload: &[u8]) -> Result<(), DisplayError> {
        let frame = Frame::new(command, payload)?;
        self.send_frame(&frame)
    }

    /// Transmit an already built frame
    pub fn send_frame(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = frame.encode(&mut buffer)?;

        trace!(
            "tx cmd={=u8} len={=u8} crc={=u16:#x}",
            frame.command,
            frame.length,
            frame.checksum
        );
        self.uart
            .send_all(&buffer[..len])
            .map_err(|_| DisplayError::Transport)
    }

    /// Validate and transmit a typed command
    pub fn send_command(&mut self, command: &DisplayCommand<'_>) -> Result<(), DisplayError> {
        let frame = command.to_frame()?;
        self.send_frame(&frame)
    }
}

impl<T: UartTx> DisplayDriver for Cfa633<T> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.send_command(&DisplayCommand::Clear)
    }

    fn set_line(&mut self, row: u8, text: &[u8; 16]) -> Result<(), DisplayError> {
        match row {
            0 => self.send_command(&DisplayCommand::SetLine1(text)),
            1 => self.send_command(&DisplayCommand::SetLine2(text)),
            _ => Err(DisplayError::ValueOutOfRange),
        }
    }

    fn set_cursor_position(&mut self, column: u8, row: u8) -> Result<(), DisplayError> {
        if !self.geometry.contains(column, row) {
            return Err(DisplayError::ValueOutOfRange);
        }
        self.send_command(&DisplayCommand::SetCursorPosition { column, row })
    }

    fn set_cursor_style(&mut self, style: CursorStyle) -> Result<(), DisplayError> {
        self.send_command(&DisplayCommand::SetCursorStyle(style))
    }

    fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.send_command(&DisplayCommand::SetContrast(contrast))
    }

    fn set_brightness(&mut self, brightness: u8) -> Result<(), DisplayError> {
        self.send_command(&DisplayCommand::SetBrightness(brightness))
    }

    fn send_data(&mut self, x: u8, y: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.send_command(&DisplayCommand::SendData { x, y, data })
    }

    fn ping(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.send_command(&DisplayCommand::Ping(data))
    }

    fn request_version(&mut self) -> Result<(), DisplayError> {
        self.send_command(&DisplayCommand::GetVersion)
    }
}
