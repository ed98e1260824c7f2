//! UART byte transport abstractions
//!
//! The display link is a plain blocking serial port. Every byte goes out only
//! after the transmitter reports it can take one, and every byte comes in only
//! after the receiver reports one is waiting. There is no timeout: a readiness
//! flag that never rises blocks the caller forever.

use embedded_io::{Read, ReadReady, Write, WriteReady};

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Whether the transmit data register can accept another byte
    fn tx_ready(&mut self) -> Result<bool, Self::Error>;

    /// Put one byte into the transmit data register
    ///
    /// Callers must have observed [`UartTx::tx_ready`] first.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Busy-wait until the transmitter is ready, then send one byte
    fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        while !self.tx_ready()? {
            core::hint::spin_loop();
        }
        self.write_byte(byte)
    }

    /// Send every byte of `data` in order, blocking on each
    fn send_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.send_byte(byte)?;
        }
        Ok(())
    }
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Whether a received byte is waiting
    fn rx_ready(&mut self) -> Result<bool, Self::Error>;

    /// Take the waiting byte from the receive data register
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Busy-wait until a byte has arrived, then return it
    fn receive_byte(&mut self) -> Result<u8, Self::Error> {
        while !self.rx_ready()? {
            core::hint::spin_loop();
        }
        self.read_byte()
    }
}

/// Error from an [`IoUart`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoUartError<E> {
    /// Error reported by the underlying stream
    Io(E),
    /// Stream reported ready but produced no data
    EndOfStream,
}

/// Adapter exposing any `embedded-io` serial port as a byte transport
///
/// The port's `ReadReady`/`WriteReady` implementations play the role of the
/// receive-complete and data-register-empty flags.
pub struct IoUart<T> {
    inner: T,
}

impl<T> IoUart<T> {
    /// Wrap a serial port
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped port
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Release the wrapped port
    pub fn release(self) -> T {
        self.inner
    }
}

impl<T: Write + WriteReady> UartTx for IoUart<T> {
    type Error = IoUartError<T::Error>;

    fn tx_ready(&mut self) -> Result<bool, Self::Error> {
        self.inner.write_ready().map_err(IoUartError::Io)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        match self.inner.write(&[byte]).map_err(IoUartError::Io)? {
            0 => Err(IoUartError::EndOfStream),
            _ => Ok(()),
        }
    }
}

impl<T: Read + ReadReady> UartRx for IoUart<T> {
    type Error = IoUartError<T::Error>;

    fn rx_ready(&mut self) -> Result<bool, Self::Error> {
        self.inner.read_ready().map_err(IoUartError::Io)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        match self.inner.read(&mut buf).map_err(IoUartError::Io)? {
            0 => Err(IoUartError::EndOfStream),
            _ => Ok(buf[0]),
        }
    }
}

/// Baud rate used by the CFA-633 display out of the box
pub const DISPLAY_BAUD: u32 = 19_200;

/// Alternative baud rate the display can be reconfigured to
pub const DISPLAY_BAUD_FAST: u32 = 115_200;

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: DISPLAY_BAUD,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// Baud rate register value for an AVR-style USART running from `clock_hz`
    ///
    /// Returns `(ubrr, double_speed)`. At 8 MHz, 19200 baud needs normal mode
    /// (UBRR 25) while 115200 only lands close enough in double-speed mode
    /// (UBRR 8). `None` for a zero baud rate or a divisor that does not fit
    /// the 16-bit register.
    pub fn baud_divisor(&self, clock_hz: u32) -> Option<(u16, bool)> {
        if self.baudrate == 0 {
            return None;
        }
        let double_speed = self.baudrate > DISPLAY_BAUD;
        let per_bit: u64 = if double_speed { 8 } else { 16 };
        let step = per_bit.checked_mul(u64::from(self.baudrate))?;
        let divisor = ((u64::from(clock_hz) + step / 2) / step).saturating_sub(1);
        let divisor = u16::try_from(divisor).ok()?;
        Some((divisor, double_speed))
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Serial port whose readiness flips on every poll
    struct FlakyPort {
        polls: u32,
        sent: [u8; 8],
        sent_len: usize,
        pending: &'static [u8],
    }

    impl FlakyPort {
        fn new(pending: &'static [u8]) -> Self {
            Self {
                polls: 0,
                sent: [0; 8],
                sent_len: 0,
                pending,
            }
        }
    }

    impl embedded_io::ErrorType for FlakyPort {
        type Error = Infallible;
    }

    impl Write for FlakyPort {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
            self.sent[self.sent_len] = buf[0];
            self.sent_len += 1;
            Ok(1)
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    impl WriteReady for FlakyPort {
        fn write_ready(&mut self) -> Result<bool, Infallible> {
            self.polls += 1;
            Ok(self.polls % 2 == 0)
        }
    }

    impl Read for FlakyPort {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
            match self.pending.split_first() {
                Some((&first, rest)) => {
                    buf[0] = first;
                    self.pending = rest;
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }

    impl ReadReady for FlakyPort {
        fn read_ready(&mut self) -> Result<bool, Infallible> {
            self.polls += 1;
            Ok(self.polls % 3 == 0)
        }
    }

    #[test]
    fn test_send_all_waits_for_ready() {
        let mut uart = IoUart::new(FlakyPort::new(&[]));
        uart.send_all(&[6, 0, 0x97, 0x5B]).unwrap();

        let port = uart.release();
        assert_eq!(&port.sent[..port.sent_len], &[6, 0, 0x97, 0x5B]);
        // Two polls per byte: not ready, then ready
        assert_eq!(port.polls, 8);
    }

    #[test]
    fn test_receive_byte_waits_for_ready() {
        let mut uart = IoUart::new(FlakyPort::new(&[0x80, 0x01]));
        assert_eq!(uart.receive_byte(), Ok(0x80));
        assert_eq!(uart.receive_byte(), Ok(0x01));
        assert_eq!(uart.inner().polls, 6);
    }

    #[test]
    fn test_read_past_end_is_error() {
        let mut uart = IoUart::new(FlakyPort::new(&[]));
        assert_eq!(uart.read_byte(), Err(IoUartError::EndOfStream));
    }

    #[test]
    fn test_default_config_matches_display() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 19_200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }

    #[test]
    fn test_baud_divisor() {
        let normal = UartConfig::default();
        assert_eq!(normal.baud_divisor(8_000_000), Some((25, false)));

        let fast = UartConfig {
            baudrate: DISPLAY_BAUD_FAST,
            ..UartConfig::default()
        };
        assert_eq!(fast.baud_divisor(8_000_000), Some((8, true)));
    }

    #[test]
    fn test_baud_divisor_out_of_range() {
        let zero = UartConfig {
            baudrate: 0,
            ..UartConfig::default()
        };
        assert_eq!(zero.baud_divisor(8_000_000), None);

        // Faster than the clock: divisor saturates at zero
        let huge = UartConfig {
            baudrate: u32::MAX,
            ..UartConfig::default()
        };
        assert_eq!(huge.baud_divisor(u32::MAX), Some((0, true)));

        // Too slow for a 16-bit register
        let slow = UartConfig {
            baudrate: 1,
            ..UartConfig::default()
        };
        assert_eq!(slow.baud_divisor(16_000_000), None);
    }
}
