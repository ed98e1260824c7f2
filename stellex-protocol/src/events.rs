//! Keypad events reported by the CFA-633 and its special glyph codes

/// Key activity codes sent in a key report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyEvent {
    UpPress,
    DownPress,
    LeftPress,
    RightPress,
    EnterPress,
    ExitPress,
    UpRelease,
    DownRelease,
    LeftRelease,
    RightRelease,
    EnterRelease,
    ExitRelease,
}

// Wire format values
const KEY_UP_PRESS: u8 = 0x01;
const KEY_DOWN_PRESS: u8 = 0x02;
const KEY_LEFT_PRESS: u8 = 0x03;
const KEY_RIGHT_PRESS: u8 = 0x04;
const KEY_ENTER_PRESS: u8 = 0x05;
const KEY_EXIT_PRESS: u8 = 0x06;
const KEY_UP_RELEASE: u8 = 0x07;
const KEY_DOWN_RELEASE: u8 = 0x08;
const KEY_LEFT_RELEASE: u8 = 0x09;
const KEY_RIGHT_RELEASE: u8 = 0x0A;
const KEY_ENTER_RELEASE: u8 = 0x0B;
const KEY_EXIT_RELEASE: u8 = 0x0C;

impl KeyEvent {
    /// Parse an event from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            KEY_UP_PRESS => Some(KeyEvent::UpPress),
            KEY_DOWN_PRESS => Some(KeyEvent::DownPress),
            KEY_LEFT_PRESS => Some(KeyEvent::LeftPress),
            KEY_RIGHT_PRESS => Some(KeyEvent::RightPress),
            KEY_ENTER_PRESS => Some(KeyEvent::EnterPress),
            KEY_EXIT_PRESS => Some(KeyEvent::ExitPress),
            KEY_UP_RELEASE => Some(KeyEvent::UpRelease),
            KEY_DOWN_RELEASE => Some(KeyEvent::DownRelease),
            KEY_LEFT_RELEASE => Some(KeyEvent::LeftRelease),
            KEY_RIGHT_RELEASE => Some(KeyEvent::RightRelease),
            KEY_ENTER_RELEASE => Some(KeyEvent::EnterRelease),
            KEY_EXIT_RELEASE => Some(KeyEvent::ExitRelease),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            KeyEvent::UpPress => KEY_UP_PRESS,
            KeyEvent::DownPress => KEY_DOWN_PRESS,
            KeyEvent::LeftPress => KEY_LEFT_PRESS,
            KeyEvent::RightPress => KEY_RIGHT_PRESS,
            KeyEvent::EnterPress => KEY_ENTER_PRESS,
            KeyEvent::ExitPress => KEY_EXIT_PRESS,
            KeyEvent::UpRelease => KEY_UP_RELEASE,
            KeyEvent::DownRelease => KEY_DOWN_RELEASE,
            KeyEvent::LeftRelease => KEY_LEFT_RELEASE,
            KeyEvent::RightRelease => KEY_RIGHT_RELEASE,
            KeyEvent::EnterRelease => KEY_ENTER_RELEASE,
            KeyEvent::ExitRelease => KEY_EXIT_RELEASE,
        }
    }

    /// Whether a raw key code is a press, the only kind the controller queues
    ///
    /// Codes 0 and 7 bound the press range and are never queued.
    pub fn is_press_code(byte: u8) -> bool {
        byte > 0x00 && byte < KEY_UP_RELEASE
    }

    /// Returns true if this is a key-down event
    pub fn is_press(&self) -> bool {
        Self::is_press_code(self.to_byte())
    }
}

/// Custom characters in the display's character generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// Tick mark
    Check,
    /// Cross mark
    Cancel,
    /// Right-pointing arrow
    ArrowRight,
}

impl Glyph {
    /// Character code for this glyph
    pub fn code(self) -> u8 {
        match self {
            Glyph::Check => 0x05,
            Glyph::Cancel => 0x06,
            Glyph::ArrowRight => 0x08,
        }
    }
}
