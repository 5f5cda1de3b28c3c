//! The typing gate state machine
//!
//! Accepts key signals from every input source (physical keyboard,
//! clicks on the visual keyboard), accumulates a hidden buffer, and
//! reports an unlock exactly once when the buffer matches the target
//! passphrase at submit time. Mismatches are ordinary state, surfaced
//! through a transient error flag with a single pending clear deadline,
//! never through an error type.
//!
//! Both input paths converge on one private dispatch (`press_key`); the
//! per-source differences (momentary vs. sticky shift, pressed-set
//! bookkeeping) live in the public wrappers around it.

use crate::keys::{GateKey, KeyEdge, KeySignal, PressedKeys};
use std::time::{Duration, Instant};

/// What a key signal did to the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Nothing changed (released key, post-unlock input)
    Ignored,
    /// The gate absorbed the key
    Consumed,
    /// The submitted buffer matched the passphrase. Reported exactly
    /// once per mount.
    Unlocked,
}

/// Typing gate over a fixed passphrase
pub struct TypingGate {
    /// Target passphrase, lowercase
    target: String,
    /// Accumulated input; never shown as text, only compared
    buffer: String,
    caps_lock: bool,
    /// Physical shift currently held
    shift_held: bool,
    /// Armed by clicking the shift cap; consumed by the next character
    sticky_shift: bool,
    pressed: PressedKeys,
    error: bool,
    /// Pending error clear; replaced wholesale when a new error lands
    error_clear_at: Option<Instant>,
    error_clear_after: Duration,
    /// Set in press-only input mode, where releases never arrive
    pressed_ttl: Option<Duration>,
    unlocked: bool,
}

impl TypingGate {
    pub fn new(passphrase: &str, error_clear_after: Duration) -> Self {
        Self {
            target: passphrase.to_ascii_lowercase(),
            buffer: String::new(),
            caps_lock: false,
            shift_held: false,
            sticky_shift: false,
            pressed: PressedKeys::new(),
            error: false,
            error_clear_at: None,
            error_clear_after,
            pressed_ttl: None,
            unlocked: false,
        }
    }

    /// Enable pressed-key expiry for input modes without release edges
    pub fn set_pressed_ttl(&mut self, ttl: Option<Duration>) {
        self.pressed_ttl = ttl;
    }

    /// Feed one physical key signal through the gate.
    ///
    /// The pressed set is updated before the logical action dispatches,
    /// so a render between the two can never show a buffer change
    /// without the key lit. Signals after unlock keep updating visuals
    /// but no longer reach the buffer.
    pub fn handle_signal(&mut self, signal: KeySignal) -> GateOutcome {
        match signal.edge {
            KeyEdge::Press => {
                self.pressed.press(signal.key, signal.timestamp);
                if signal.key == GateKey::Shift {
                    self.shift_held = true;
                    return GateOutcome::Consumed;
                }
                self.press_key(signal.key, signal.timestamp)
            }
            KeyEdge::Release => {
                self.pressed.release(signal.key);
                if signal.key == GateKey::Shift {
                    self.shift_held = false;
                }
                GateOutcome::Ignored
            }
        }
    }

    /// A keycap was clicked. Clicks have no separate up edge driving
    /// the case logic, so the shift cap toggles a sticky shift that the
    /// next character consumes; everything else dispatches exactly like
    /// a physical press.
    pub fn virtual_press(&mut self, key: GateKey, now: Instant) -> GateOutcome {
        self.pressed.press(key, now);
        if key == GateKey::Shift {
            if self.unlocked {
                return GateOutcome::Ignored;
            }
            self.sticky_shift = !self.sticky_shift;
            return GateOutcome::Consumed;
        }
        self.press_key(key, now)
    }

    /// The clicked keycap was let go; only the pressed visual changes
    pub fn virtual_release(&mut self, key: GateKey) {
        self.pressed.release(key);
    }

    /// Single logical entry point both input sources funnel into
    fn press_key(&mut self, key: GateKey, now: Instant) -> GateOutcome {
        if self.unlocked {
            return GateOutcome::Ignored;
        }
        match key {
            GateKey::Char(c) => {
                self.append(c);
                GateOutcome::Consumed
            }
            GateKey::Space => {
                // A literal space; deliberately leaves the error flag
                // alone, unlike character keys.
                self.buffer.push(' ');
                self.consume_sticky_shift();
                GateOutcome::Consumed
            }
            GateKey::Backspace => {
                self.buffer.pop();
                self.clear_error();
                GateOutcome::Consumed
            }
            GateKey::CapsLock => {
                self.caps_lock = !self.caps_lock;
                GateOutcome::Consumed
            }
            GateKey::Shift => GateOutcome::Consumed,
            GateKey::Enter => self.submit(now),
        }
    }

    fn append(&mut self, c: char) {
        let uppercase = self.caps_lock ^ self.shift_active();
        let c = if uppercase { c.to_ascii_uppercase() } else { c };
        self.buffer.push(c);
        self.consume_sticky_shift();
        self.clear_error();
    }

    fn consume_sticky_shift(&mut self) {
        self.sticky_shift = false;
    }

    fn submit(&mut self, now: Instant) -> GateOutcome {
        if self.buffer.to_ascii_lowercase() == self.target {
            log::debug!("gate unlocked");
            self.unlocked = true;
            self.buffer.clear();
            self.clear_error();
            GateOutcome::Unlocked
        } else {
            log::debug!("gate mismatch, {} chars entered", self.buffer.len());
            self.error = true;
            self.error_clear_at = Some(now + self.error_clear_after);
            self.buffer.clear();
            GateOutcome::Consumed
        }
    }

    fn clear_error(&mut self) {
        self.error = false;
        self.error_clear_at = None;
    }

    /// Advance time-driven state: the pending error clear, and pressed
    /// expiry when running without release edges
    pub fn tick(&mut self, now: Instant) {
        if let Some(clear_at) = self.error_clear_at {
            if now >= clear_at {
                self.clear_error();
            }
        }
        if let Some(ttl) = self.pressed_ttl {
            self.pressed.expire_older_than(ttl, now);
        }
    }

    /// Input focus left the terminal; nothing will report the releases,
    /// so drop every held key
    pub fn clear_pressed(&mut self) {
        self.pressed.clear();
        self.shift_held = false;
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// Shift as the case logic and the keycap visual see it
    pub fn shift_active(&self) -> bool {
        self.shift_held || self.sticky_shift
    }

    pub fn error_active(&self) -> bool {
        self.error
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn pressed(&self) -> &PressedKeys {
        &self.pressed
    }

    pub fn is_pressed(&self, key: GateKey) -> bool {
        self.pressed.contains(key)
    }
}
