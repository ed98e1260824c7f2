//! Interrupt-driven packet receiver
//!
//! [`PacketReceiver::on_byte`] is meant to be called from the UART receive
//! interrupt with each byte as it arrives. Key-press reports are pushed onto
//! an [`EventQueue`]; every other frame is dropped once complete.
//!
//! The receiver does not reject frames whose checksum is wrong. Mismatches
//! are counted and logged, and the frame is handled as if it were intact.

use stellex_protocol::messages::REPORT_KEY_ACTIVITY;
use stellex_protocol::{Frame, FrameParser, KeyEvent, ParseState};

use crate::queue::EventQueue;

/// What a single received byte resulted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiveOutcome {
    /// Frame not complete yet
    Pending,
    /// A key press was queued
    Queued(KeyEvent),
    /// A key press arrived but the queue was full
    QueueFull(KeyEvent),
    /// Frame complete but not a key press
    Discarded,
}

/// Running totals kept by the receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiverStats {
    /// Completed frames
    pub frames: u32,
    /// Key presses queued
    pub queued: u32,
    /// Frames that were not key presses
    pub discarded: u32,
    /// Key presses lost to a full queue
    pub overflowed: u32,
    /// Frames whose checksum did not match their contents
    pub checksum_mismatches: u32,
}

/// Byte-driven receiver feeding a key queue
#[derive(Debug, Clone)]
pub struct PacketReceiver {
    parser: FrameParser,
    stats: ReceiverStats,
}

impl Default for PacketReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketReceiver {
    pub const fn new() -> Self {
        Self {
            parser: FrameParser::new(),
            stats: ReceiverStats {
                frames: 0,
                queued: 0,
                discarded: 0,
                overflowed: 0,
                checksum_mismatches: 0,
            },
        }
    }

    /// Handle one received byte
    pub fn on_byte<const N: usize>(&mut self, byte: u8, queue: &EventQueue<N>) -> ReceiveOutcome {
        match self.parser.feed(byte) {
            Some(frame) => self.on_frame(&frame, queue),
            None => ReceiveOutcome::Pending,
        }
    }

    fn on_frame<const N: usize>(&mut self, frame: &Frame, queue: &EventQueue<N>) -> ReceiveOutcome {
        self.stats.frames = self.stats.frames.wrapping_add(1);
        trace!(
            "frame cmd={=u8} len={=u8} crc={=u16:#x}",
            frame.command,
            frame.length,
            frame.checksum
        );

        if !frame.checksum_matches() {
            self.stats.checksum_mismatches = self.stats.checksum_mismatches.wrapping_add(1);
            warn!(
                "checksum mismatch on cmd={=u8}: got {=u16:#x}, expected {=u16:#x}",
                frame.command,
                frame.checksum,
                frame.expected_checksum()
            );
        }

        match key_press(frame) {
            Some(event) => match queue.push(event.to_byte()) {
                Ok(()) => {
                    self.stats.queued = self.stats.queued.wrapping_add(1);
                    ReceiveOutcome::Queued(event)
                }
                Err(_) => {
                    self.stats.overflowed = self.stats.overflowed.wrapping_add(1);
                    ReceiveOutcome::QueueFull(event)
                }
            },
            None => {
                self.stats.discarded = self.stats.discarded.wrapping_add(1);
                ReceiveOutcome::Discarded
            }
        }
    }

    /// Where the receiver is within the current frame
    pub fn state(&self) -> ParseState {
        self.parser.state()
    }

    pub fn stats(&self) -> ReceiverStats {
        self.stats
    }

    /// Abandon any partial frame
    ///
    /// The link has no start marker, so this is the only way back into step
    /// after a lost byte. Statistics are kept.
    pub fn reset(&mut self) {
        debug!("receiver reset in state {}", self.parser.state());
        self.parser.reset();
    }
}

/// Key press carried by a frame, if it is a single-byte key report with a
/// press code
fn key_press(frame: &Frame) -> Option<KeyEvent> {
    if frame.command != REPORT_KEY_ACTIVITY || frame.length != 1 {
        return None;
    }
    let code = *frame.payload.first()?;
    if !KeyEvent::is_press_code(code) {
        return None;
    }
    KeyEvent::from_byte(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::KeyQueue;
    use proptest::prelude::*;

    fn feed(receiver: &mut PacketReceiver, queue: &KeyQueue, bytes: &[u8]) -> ReceiveOutcome {
        let mut last = ReceiveOutcome::Pending;
        for &byte in bytes {
            last = receiver.on_byte(byte, queue);
        }
        last
    }

    fn key_frame(code: u8) -> [u8; 5] {
        let frame = Frame::new(REPORT_KEY_ACTIVITY, &[code]).unwrap();
        let crc = frame.checksum.to_le_bytes();
        [REPORT_KEY_ACTIVITY, 1, code, crc[0], crc[1]]
    }

    #[test]
    fn test_key_press_is_queued() {
        let queue = KeyQueue::new();
        let mut receiver = PacketReceiver::new();

        // Enter press: 80 01 05 55 84
        let outcome = feed(&mut receiver, &queue, &[0x80, 0x01, 0x05, 0x55, 0x84]);
        assert_eq!(outcome, ReceiveOutcome::Queued(KeyEvent::EnterPress));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), 5);

        let stats = receiver.stats();
        assert_eq!(stats.frames, 1);
        assert_eq!(stats.queued, 1);
        assert_eq!(stats.checksum_mismatches, 0);
    }

    #[test]
    fn test_pending_until_checksum_high() {
        let queue = KeyQueue::new();
        let mut receiver = PacketReceiver::new();
        let bytes = key_frame(1);

        for &byte in &bytes[..4] {
            assert_eq!(receiver.on_byte(byte, &queue), ReceiveOutcome::Pending);
        }
        assert!(queue.is_empty());
        assert_eq!(receiver.state(), ParseState::AwaitChecksumHigh);

        assert_eq!(
            receiver.on_byte(bytes[4], &queue),
            ReceiveOutcome::Queued(KeyEvent::UpPress)
        );
        assert_eq!(receiver.state(), ParseState::AwaitCommand);
    }

    #[test]
    fn test_releases_are_discarded() {
        let queue = KeyQueue::new();
        let mut receiver = PacketReceiver::new();

        for code in [0, 7, 8, 12, 200] {
            let outcome = feed(&mut receiver, &queue, &key_frame(code));
            assert_eq!(outcome, ReceiveOutcome::Discarded);
        }
        assert!(queue.is_empty());
        assert_eq!(receiver.stats().discarded, 5);
    }

    #[test]
    fn test_other_reports_are_discarded() {
        let queue = KeyQueue::new();
        let mut receiver = PacketReceiver::new();

        // Ping reply with a payload that looks like a key code
        let outcome = feed(&mut receiver, &queue, &[0x40, 0x01, 0x03, 0x00, 0x00]);
        assert_eq!(outcome, ReceiveOutcome::Discarded);

        // Key report with the wrong length
        let outcome = feed(&mut receiver, &queue, &[0x80, 0x02, 0x03, 0x03, 0x00, 0x00]);
        assert_eq!(outcome, ReceiveOutcome::Discarded);

        // Empty key report
        let outcome = feed(&mut receiver, &queue, &[0x80, 0x00, 0x00, 0x00]);
        assert_eq!(outcome, ReceiveOutcome::Discarded);

        assert!(queue.is_empty());
        assert_eq!(receiver.stats().frames, 3);
    }

    #[test]
    fn test_bad_checksum_still_queued() {
        let queue = KeyQueue::new();
        let mut receiver = PacketReceiver::new();

        let outcome = feed(&mut receiver, &queue, &[0x80, 0x01, 0x02, 0xDE, 0xAD]);
        assert_eq!(outcome, ReceiveOutcome::Queued(KeyEvent::DownPress));
        assert_eq!(queue.pop(), 2);
        assert_eq!(receiver.stats().checksum_mismatches, 1);
    }

    #[test]
    fn test_full_queue_drops_press() {
        let queue = KeyQueue::new();
        let mut receiver = PacketReceiver::new();

        for code in 1..=5 {
            feed(&mut receiver, &queue, &key_frame(code));
        }
        assert!(queue.is_full());

        let outcome = feed(&mut receiver, &queue, &key_frame(6));
        assert_eq!(outcome, ReceiveOutcome::QueueFull(KeyEvent::ExitPress));
        assert!(queue.status().overflow);
        assert_eq!(receiver.stats().overflowed, 1);

        let drained: Vec<u8> = (0..5).map(|_| queue.pop()).collect();
        assert_eq!(drained, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_back_to_back_frames() {
        let queue = KeyQueue::new();
        let mut receiver = PacketReceiver::new();

        let mut stream = Vec::new();
        stream.extend_from_slice(&key_frame(3));
        stream.extend_from_slice(&key_frame(9));
        stream.extend_from_slice(&key_frame(4));
        feed(&mut receiver, &queue, &stream);

        assert_eq!(queue.poll_key(), Some(KeyEvent::LeftPress));
        assert_eq!(queue.poll_key(), Some(KeyEvent::RightPress));
        assert_eq!(queue.poll_key(), None);
    }

    #[test]
    fn test_reset_abandons_partial_frame() {
        let queue = KeyQueue::new();
        let mut receiver = PacketReceiver::new();

        feed(&mut receiver, &queue, &[0x80, 0x01]);
        receiver.reset();
        assert_eq!(receiver.state(), ParseState::AwaitCommand);

        let outcome = feed(&mut receiver, &queue, &key_frame(6));
        assert_eq!(outcome, ReceiveOutcome::Queued(KeyEvent::ExitPress));
    }

    proptest! {
        #[test]
        fn prop_non_key_frames_never_queue(
            command in any::<u8>().prop_filter("not a key report", |c| *c != REPORT_KEY_ACTIVITY),
            payload in proptest::collection::vec(any::<u8>(), 0..=16),
        ) {
            let queue = KeyQueue::new();
            let mut receiver = PacketReceiver::new();
            let frame = Frame::new(command, &payload).unwrap();
            let bytes = frame.encode_to_vec().unwrap();

            let outcome = feed(&mut receiver, &queue, &bytes);
            prop_assert_eq!(outcome, ReceiveOutcome::Discarded);
            prop_assert_eq!(queue.len(), 0);
            prop_assert_eq!(receiver.state(), ParseState::AwaitCommand);
        }

        #[test]
        fn prop_press_codes_are_queued(code in 1u8..=6) {
            let queue = KeyQueue::new();
            let mut receiver = PacketReceiver::new();

            let outcome = feed(&mut receiver, &queue, &key_frame(code));
            prop_assert_eq!(outcome, ReceiveOutcome::Queued(KeyEvent::from_byte(code).unwrap()));
            prop_assert_eq!(queue.pop(), code);
        }
    }
}
