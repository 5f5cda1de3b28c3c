//! Animated keyboard backdrop
//!
//! The `animated-keyboard` background mode: the same keyboard layout in a
//! dim rendition behind whatever screen is up, echoing live key presses.
//! It keeps its own pressed set and caps latch so it works identically
//! before and after the gate is gone. Purely visual; it never consumes
//! anything.

use std::time::{Duration, Instant};

use crate::keys::{GateKey, KeyEdge, KeySignal, PressedKeys};
use crate::ui::keyboard_visual::{GateKeyboard, KeyboardView};
use crate::ui::theme::ThemeColors;

/// Live key echo behind the foreground screen
pub struct Backdrop {
    pressed: PressedKeys,
    caps_lock: bool,
    /// Set in press-only input mode, where releases never arrive
    pressed_ttl: Option<Duration>,
}

impl Backdrop {
    pub fn new() -> Self {
        Self {
            pressed: PressedKeys::new(),
            caps_lock: false,
            pressed_ttl: None,
        }
    }

    /// Enable pressed-key expiry for input modes without release edges
    pub fn set_pressed_ttl(&mut self, ttl: Option<Duration>) {
        self.pressed_ttl = ttl;
    }

    /// Mirror one physical key signal into the echo state
    pub fn observe(&mut self, signal: &KeySignal) {
        match signal.edge {
            KeyEdge::Press => {
                self.pressed.press(signal.key, signal.timestamp);
                if signal.key == GateKey::CapsLock {
                    self.caps_lock = !self.caps_lock;
                }
            }
            KeyEdge::Release => self.pressed.release(signal.key),
        }
    }

    /// Expire stale presses when running without release edges
    pub fn tick(&mut self, now: Instant) {
        if let Some(ttl) = self.pressed_ttl {
            self.pressed.expire_older_than(ttl, now);
        }
    }

    /// Focus left the terminal; drop every held key
    pub fn clear_pressed(&mut self) {
        self.pressed.clear();
    }

    /// The dim keyboard widget for this frame
    pub fn widget<'a>(&'a self, colors: &'a ThemeColors) -> GateKeyboard<'a> {
        GateKeyboard::new(
            KeyboardView {
                pressed: &self.pressed,
                hint: None,
                caps_lock: self.caps_lock,
                shift: false,
            },
            colors,
        )
        .dimmed(true)
    }

    #[cfg(test)]
    fn is_pressed(&self, key: GateKey) -> bool {
        self.pressed.contains(key)
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}
