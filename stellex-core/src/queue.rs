//! Key event queue
//!
//! Fixed-capacity FIFO that carries key codes from the receive interrupt
//! (producer) to the cooperative main loop (consumer). Every access runs
//! inside a critical section, so a queue can sit in a `static` and be used
//! from both contexts without further locking.
//!
//! Errors are sticky status flags as well as return values: an overflowing
//! push or an underflowing pop raises its flag, and the next successful push
//! or pop clears both.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Deque;
use stellex_protocol::KeyEvent;

use crate::config::KEY_QUEUE_CAPACITY;

/// Value returned by [`EventQueue::pop`] when there is nothing to pop
pub const EMPTY_SENTINEL: u8 = 0;

/// Queue errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// Push on a full queue; the value was dropped
    Overflow,
    /// Pop on an empty queue
    Underflow,
}

/// Sticky error indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueStatus {
    /// A push found the queue full
    pub overflow: bool,
    /// A pop found the queue empty
    pub underflow: bool,
}

impl QueueStatus {
    /// No error indicator is raised
    pub fn is_ok(&self) -> bool {
        !self.overflow && !self.underflow
    }
}

struct Inner<const N: usize> {
    items: Deque<u8, N>,
    status: QueueStatus,
}

/// Interrupt-safe bounded byte queue
pub struct EventQueue<const N: usize> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Inner<N>>>,
}

/// Queue sized for the display's key reports
pub type KeyQueue = EventQueue<KEY_QUEUE_CAPACITY>;

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    /// Create an empty queue with both indicators clear
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                items: Deque::new(),
                status: QueueStatus {
                    overflow: false,
                    underflow: false,
                },
            })),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Inner<N>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Append a byte
    ///
    /// On a full queue the byte is dropped, the overflow indicator is raised
    /// and `Err(QueueError::Overflow)` is returned. Producers that cannot act
    /// on the failure may ignore it.
    pub fn push(&self, byte: u8) -> Result<(), QueueError> {
        let result = self.with(|inner| match inner.items.push_back(byte) {
            Ok(()) => {
                inner.status = QueueStatus::default();
                Ok(())
            }
            Err(_) => {
                inner.status.overflow = true;
                Err(QueueError::Overflow)
            }
        });
        if result.is_err() {
            warn!("key queue full, dropped {=u8}", byte);
        }
        result
    }

    /// Remove the oldest byte
    ///
    /// On an empty queue the underflow indicator is raised and
    /// `Err(QueueError::Underflow)` is returned.
    pub fn try_pop(&self) -> Result<u8, QueueError> {
        let result = self.with(|inner| match inner.items.pop_front() {
            Some(byte) => {
                inner.status = QueueStatus::default();
                Ok(byte)
            }
            None => {
                inner.status.underflow = true;
                Err(QueueError::Underflow)
            }
        });
        if result.is_err() {
            warn!("key queue empty on pop");
        }
        result
    }

    /// Remove the oldest byte, or return [`EMPTY_SENTINEL`] if there is none
    pub fn pop(&self) -> u8 {
        self.try_pop().unwrap_or(EMPTY_SENTINEL)
    }

    /// Pop the next key event for the main loop
    ///
    /// Returns `None` without touching the indicators when the queue is
    /// empty. Bytes that are not key codes are consumed and skipped.
    pub fn poll_key(&self) -> Option<KeyEvent> {
        loop {
            let byte = self.with(|inner| {
                let byte = inner.items.pop_front()?;
                inner.status = QueueStatus::default();
                Some(byte)
            })?;
            if let Some(event) = KeyEvent::from_byte(byte) {
                return Some(event);
            }
        }
    }

    /// Number of queued bytes
    pub fn len(&self) -> usize {
        self.with(|inner| inner.items.len())
    }

    /// Whether the queue holds nothing
    pub fn is_empty(&self) -> bool {
        self.with(|inner| inner.items.is_empty())
    }

    /// Whether the next push would overflow
    pub fn is_full(&self) -> bool {
        self.with(|inner| inner.items.is_full())
    }

    /// Maximum number of queued bytes
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Snapshot of the error indicators
    pub fn status(&self) -> QueueStatus {
        self.with(|inner| inner.status)
    }

    /// Drop all queued bytes and clear both indicators
    pub fn clear(&self) {
        self.with(|inner| {
            inner.items.clear();
            inner.status = QueueStatus::default();
        });
    }
}
