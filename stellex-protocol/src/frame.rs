//! Frame encoding and decoding for the CFA-633 packet protocol.
//!
//! Frame format:
//! - COMMAND (1 byte): command or report identifier
//! - LENGTH (1 byte): payload length (0-16)
//! - PAYLOAD (0-16 bytes): command-specific data
//! - CRC (2 bytes, little-endian): checksum of COMMAND, LENGTH and PAYLOAD

use heapless::Vec;

use crate::crc::checksum;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 16;

/// Maximum complete frame size (COMMAND + LENGTH + MAX_PAYLOAD + CRC)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + MAX_PAYLOAD_SIZE + 2;

/// Errors that can occur while building, encoding or interpreting a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// A command parameter is outside the range the display accepts
    ValueOutOfRange,
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Report identifier is not one the controller understands
    UnknownReport,
    /// Payload length does not fit the report
    InvalidLength,
    /// Key code outside the known set
    InvalidKeyCode,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Command or report identifier
    pub command: u8,
    /// Payload length as it appeared on the wire
    ///
    /// Equal to `payload.len()` except for received frames that declared
    /// more than [`MAX_PAYLOAD_SIZE`] bytes.
    pub length: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    /// Checksum carried by the frame
    pub checksum: u16,
}

impl Frame {
    /// Create a new frame, computing its checksum
    pub fn new(command: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        let length = payload.len() as u8;
        let checksum = Self::calculate_checksum(command, length, &payload);

        Ok(Self {
            command,
            length,
            payload,
            checksum,
        })
    }

    /// Create a frame with no payload
    pub fn empty(command: u8) -> Self {
        Self {
            command,
            length: 0,
            payload: Vec::new(),
            checksum: Self::calculate_checksum(command, 0, &[]),
        }
    }

    /// Calculate the checksum over command, length and payload
    fn calculate_checksum(command: u8, length: u8, payload: &[u8]) -> u16 {
        let mut bytes = [0u8; MAX_FRAME_SIZE];
        bytes[0] = command;
        bytes[1] = length;
        bytes[2..2 + payload.len()].copy_from_slice(payload);
        checksum(&bytes[..2 + payload.len()])
    }

    /// Checksum the frame contents should carry
    pub fn expected_checksum(&self) -> u16 {
        Self::calculate_checksum(self.command, self.length, &self.payload)
    }

    /// Whether the carried checksum agrees with the contents
    ///
    /// Always false for a frame whose declared length exceeded what could
    /// be stored.
    pub fn checksum_matches(&self) -> bool {
        self.length as usize == self.payload.len() && self.checksum == self.expected_checksum()
    }

    /// Number of bytes [`Frame::encode`] writes
    pub fn encoded_len(&self) -> usize {
        4 + self.payload.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let payload_end = 2 + self.payload.len();
        let [crc_lo, crc_hi] = self.checksum.to_le_bytes();

        buffer[0] = self.command;
        buffer[1] = self.payload.len() as u8;
        buffer[2..payload_end].copy_from_slice(&self.payload);
        buffer[payload_end] = crc_lo;
        buffer[payload_end + 1] = crc_hi;

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// Position of the parser within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseState {
    /// Next byte is a command identifier
    AwaitCommand,
    /// Next byte is the payload length
    AwaitLength,
    /// Collecting payload bytes
    AwaitPayload {
        /// Payload bytes still to come
        remaining: u8,
    },
    /// Next byte is the checksum low byte
    AwaitChecksumLow,
    /// Next byte is the checksum high byte
    AwaitChecksumHigh,
}

/// Byte-at-a-time frame reassembler
///
/// Small enough to be driven directly from a receive interrupt: `feed` never
/// blocks and never allocates. The protocol has no start marker, so the
/// parser treats whatever byte arrives in [`ParseState::AwaitCommand`] as a
/// command. A dropped byte leaves it misaligned until frame boundaries
/// coincide again.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    command: u8,
    length: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    checksum_low: u8,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub const fn new() -> Self {
        Self {
            state: ParseState::AwaitCommand,
            command: 0,
            length: 0,
            payload: Vec::new(),
            checksum_low: 0,
        }
    }

    /// Current parser state
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::AwaitCommand;
        self.command = 0;
        self.length = 0;
        self.payload.clear();
        self.checksum_low = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Some(frame)` once the checksum high byte has been consumed,
    /// whatever the checksum says; `None` while more bytes are needed.
    /// A declared length above [`MAX_PAYLOAD_SIZE`] is still consumed in
    /// full, but only the first bytes are kept.
    pub fn feed(&mut self, byte: u8) -> Option<Frame> {
        match self.state {
            ParseState::AwaitCommand => {
                self.command = byte;
                self.payload.clear();
                self.state = ParseState::AwaitLength;
                None
            }
            ParseState::AwaitLength => {
                self.length = byte;
                self.state = if byte == 0 {
                    ParseState::AwaitChecksumLow
                } else {
                    ParseState::AwaitPayload { remaining: byte }
                };
                None
            }
            ParseState::AwaitPayload { remaining } => {
                // Overlong payloads are truncated, not rejected
                let _ = self.payload.push(byte);
                self.state = match remaining - 1 {
                    0 => ParseState::AwaitChecksumLow,
                    remaining => ParseState::AwaitPayload { remaining },
                };
                None
            }
            ParseState::AwaitChecksumLow => {
                self.checksum_low = byte;
                self.state = ParseState::AwaitChecksumHigh;
                None
            }
            ParseState::AwaitChecksumHigh => {
                let frame = Frame {
                    command: self.command,
                    length: self.length,
                    payload: self.payload.clone(),
                    checksum: u16::from_le_bytes([self.checksum_low, byte]),
                };

                self.reset();
                Some(frame)
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<Frame> {
        bytes.iter().find_map(|&byte| self.feed(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_encode_empty_payload() {
        let frame = Frame::empty(6); // Clear screen
        let mut buffer = [0u8; 10];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&buffer[..4], &[6, 0, 0x97, 0x5B]);
    }

    #[test]
    fn test_frame_encode_contrast() {
        let frame = Frame::new(13, &[16]).unwrap();
        let encoded = frame.encode_to_vec().unwrap();
        let crc = checksum(&[13, 1, 16]);

        assert_eq!(
            encoded.as_slice(),
            &[13, 1, 16, (crc & 0xFF) as u8, (crc >> 8) as u8]
        );
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(7, &[b' '; 16]).unwrap();
        let mut buffer = [0u8; 19];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(7, &large_payload), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_parser_state_sequence() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.state(), ParseState::AwaitCommand);

        assert!(parser.feed(0x80).is_none());
        assert_eq!(parser.state(), ParseState::AwaitLength);

        assert!(parser.feed(2).is_none());
        assert_eq!(parser.state(), ParseState::AwaitPayload { remaining: 2 });

        assert!(parser.feed(0xAA).is_none());
        assert_eq!(parser.state(), ParseState::AwaitPayload { remaining: 1 });

        assert!(parser.feed(0xBB).is_none());
        assert_eq!(parser.state(), ParseState::AwaitChecksumLow);

        assert!(parser.feed(0x34).is_none());
        assert_eq!(parser.state(), ParseState::AwaitChecksumHigh);

        let frame = parser.feed(0x12).unwrap();
        assert_eq!(parser.state(), ParseState::AwaitCommand);
        assert_eq!(frame.command, 0x80);
        assert_eq!(frame.length, 2);
        assert_eq!(frame.payload.as_slice(), &[0xAA, 0xBB]);
        assert_eq!(frame.checksum, 0x1234);
    }

    #[test]
    fn test_parser_zero_length_skips_payload() {
        let mut parser = FrameParser::new();
        parser.feed(6);
        parser.feed(0);
        assert_eq!(parser.state(), ParseState::AwaitChecksumLow);
    }

    #[test]
    fn test_frame_roundtrip() {
        let original = Frame::new(31, &[0, 1, b'S', b'E', b'T']).unwrap();
        let encoded = original.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&encoded).unwrap();

        assert_eq!(parsed, original);
        assert!(parsed.checksum_matches());
    }

    #[test]
    fn test_parser_returns_frame_with_bad_checksum() {
        let mut encoded = Frame::new(0x80, &[3]).unwrap().encode_to_vec().unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0xFF;

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&encoded).unwrap();

        assert_eq!(parsed.payload.as_slice(), &[3]);
        assert!(!parsed.checksum_matches());
    }

    #[test]
    fn test_parser_overlong_payload_stays_aligned() {
        let mut parser = FrameParser::new();
        parser.feed(0x42);
        parser.feed(20);
        for i in 0..20 {
            assert!(parser.feed(i).is_none());
        }
        parser.feed(0x00);
        let frame = parser.feed(0x00).unwrap();

        assert_eq!(frame.length, 20);
        assert_eq!(frame.payload.len(), MAX_PAYLOAD_SIZE);
        assert!(!frame.checksum_matches());

        // Next frame decodes normally
        let next = Frame::new(0x80, &[1]).unwrap().encode_to_vec().unwrap();
        assert_eq!(parser.feed_bytes(&next).unwrap().payload.as_slice(), &[1]);
    }

    #[test]
    fn test_dropped_byte_desynchronizes() {
        let first = Frame::new(0x80, &[2]).unwrap().encode_to_vec().unwrap();
        let second = Frame::new(0x80, &[4]).unwrap().encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        // Drop the length byte of the first frame
        assert!(parser.feed(first[0]).is_none());
        let misread = parser.feed_bytes(&first[2..]);
        assert!(misread.is_none());

        // The first checksum was taken as payload; the second frame's
        // command and length bytes complete the misaligned frame
        let frame = parser.feed_bytes(&second).unwrap();
        assert_eq!(frame.length, 2);
        assert_eq!(frame.payload.as_slice(), &first[3..5]);
        assert_eq!(frame.checksum, u16::from_le_bytes([second[0], second[1]]));
        assert!(!frame.checksum_matches());
    }

    #[test]
    fn test_reset_mid_frame() {
        let mut parser = FrameParser::new();
        parser.feed(0x80);
        parser.feed(1);
        parser.reset();
        assert_eq!(parser.state(), ParseState::AwaitCommand);

        let encoded = Frame::new(0x80, &[5]).unwrap().encode_to_vec().unwrap();
        assert_eq!(parser.feed_bytes(&encoded).unwrap().payload.as_slice(), &[5]);
    }

    proptest! {
        #[test]
        fn prop_parser_recovers_any_frame(
            command in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
        ) {
            let frame = Frame::new(command, &payload).unwrap();
            let encoded = frame.encode_to_vec().unwrap();

            let mut parser = FrameParser::new();
            let (last, head) = encoded.split_last().unwrap();
            for &byte in head {
                prop_assert!(parser.feed(byte).is_none());
            }
            let parsed = parser.feed(*last).unwrap();
            prop_assert_eq!(parsed, frame);
            prop_assert_eq!(parser.state(), ParseState::AwaitCommand);
        }
    }
}
