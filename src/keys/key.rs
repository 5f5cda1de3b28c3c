//! Gate key identity and input signals
//!
//! Every input source (polled device state, terminal key events, mouse
//! clicks on the visual layout) is normalized into the same `KeySignal`
//! stream before it reaches the gate logic.

use std::time::Instant;

/// A key the gate layout can act on.
///
/// Letters and digits are stored in lowercase canonical form; casing is
/// applied later from the caps/shift state when a character is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKey {
    /// A letter (`a`-`z`, lowercase) or digit (`0`-`9`)
    Char(char),
    Space,
    Backspace,
    Enter,
    CapsLock,
    Shift,
}

impl GateKey {
    /// Canonical key for a typed character, if the layout can type it.
    /// Uppercase letters fold to lowercase; anything outside letters,
    /// digits and space maps to no key.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Self::Space),
            'a'..='z' | '0'..='9' => Some(Self::Char(c)),
            'A'..='Z' => Some(Self::Char(c.to_ascii_lowercase())),
            _ => None,
        }
    }

    /// The character this key contributes to the buffer, in lowercase
    /// form. Control keys contribute nothing.
    pub fn base_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            Self::Space => Some(' '),
            _ => None,
        }
    }

    /// Whether this key is a latch/modifier rather than an input key
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::CapsLock | Self::Shift)
    }

    /// Map a polled device keycode to its gate key. Keys the layout does
    /// not carry (function keys, arrows, punctuation, ...) map to None
    /// and are dropped at the listener.
    pub fn from_keycode(keycode: device_query::Keycode) -> Option<Self> {
        use device_query::Keycode as DK;
        let key = match keycode {
            DK::A => Self::Char('a'),
            DK::B => Self::Char('b'),
            DK::C => Self::Char('c'),
            DK::D => Self::Char('d'),
            DK::E => Self::Char('e'),
            DK::F => Self::Char('f'),
            DK::G => Self::Char('g'),
            DK::H => Self::Char('h'),
            DK::I => Self::Char('i'),
            DK::J => Self::Char('j'),
            DK::K => Self::Char('k'),
            DK::L => Self::Char('l'),
            DK::M => Self::Char('m'),
            DK::N => Self::Char('n'),
            DK::O => Self::Char('o'),
            DK::P => Self::Char('p'),
            DK::Q => Self::Char('q'),
            DK::R => Self::Char('r'),
            DK::S => Self::Char('s'),
            DK::T => Self::Char('t'),
            DK::U => Self::Char('u'),
            DK::V => Self::Char('v'),
            DK::W => Self::Char('w'),
            DK::X => Self::Char('x'),
            DK::Y => Self::Char('y'),
            DK::Z => Self::Char('z'),
            DK::Key0 => Self::Char('0'),
            DK::Key1 => Self::Char('1'),
            DK::Key2 => Self::Char('2'),
            DK::Key3 => Self::Char('3'),
            DK::Key4 => Self::Char('4'),
            DK::Key5 => Self::Char('5'),
            DK::Key6 => Self::Char('6'),
            DK::Key7 => Self::Char('7'),
            DK::Key8 => Self::Char('8'),
            DK::Key9 => Self::Char('9'),
            DK::Space => Self::Space,
            DK::Backspace => Self::Backspace,
            DK::Enter => Self::Enter,
            DK::CapsLock => Self::CapsLock,
            DK::LShift | DK::RShift => Self::Shift,
            _ => return None,
        };
        Some(key)
    }

    /// Map a terminal key code to its gate key (enhanced input path).
    /// Standalone shift events only arrive when the terminal reports all
    /// keys as escape codes.
    pub fn from_terminal(code: crossterm::event::KeyCode) -> Option<Self> {
        use crossterm::event::{KeyCode as TK, ModifierKeyCode};
        match code {
            TK::Char(c) => Self::from_char(c),
            TK::Backspace => Some(Self::Backspace),
            TK::Enter => Some(Self::Enter),
            TK::CapsLock => Some(Self::CapsLock),
            TK::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => {
                Some(Self::Shift)
            }
            _ => None,
        }
    }
}

/// Edge direction of a key signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    /// Key went down
    Press,
    /// Key came back up
    Release,
}

/// A timestamped key edge from any input source
#[derive(Debug, Clone, Copy)]
pub struct KeySignal {
    /// The key that changed
    pub key: GateKey,
    /// Press or release
    pub edge: KeyEdge,
    /// When the edge was observed
    pub timestamp: Instant,
}

impl KeySignal {
    pub fn new(key: GateKey, edge: KeyEdge, timestamp: Instant) -> Self {
        Self {
            key,
            edge,
            timestamp,
        }
    }

    pub fn press(key: GateKey, at: Instant) -> Self {
        Self::new(key, KeyEdge::Press, at)
    }

    pub fn release(key: GateKey, at: Instant) -> Self {
        Self::new(key, KeyEdge::Release, at)
    }
}
