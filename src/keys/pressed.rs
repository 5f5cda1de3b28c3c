//! Pressed-key tracking
//!
//! Backs the key-down visuals. Each entry remembers when it went down so
//! the press-only input mode can expire entries whose release will never
//! arrive.

use super::GateKey;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// The set of keys currently held down, with press timestamps
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    down: HashMap<GateKey, Instant>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down. Re-pressing an already-down key (key
    /// repeat) refreshes its timestamp.
    pub fn press(&mut self, key: GateKey, now: Instant) {
        self.down.insert(key, now);
    }

    /// Record a key coming up. Unknown keys are ignored.
    pub fn release(&mut self, key: GateKey) {
        self.down.remove(&key);
    }

    pub fn contains(&self, key: GateKey) -> bool {
        self.down.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.down.is_empty()
    }

    pub fn len(&self) -> usize {
        self.down.len()
    }

    /// Drop every entry; used when input focus is lost so keys released
    /// elsewhere do not stay lit.
    pub fn clear(&mut self) {
        self.down.clear();
    }

    /// Drop entries pressed more than `ttl` ago. Returns how many were
    /// expired.
    pub fn expire_older_than(&mut self, ttl: Duration, now: Instant) -> usize {
        let before = self.down.len();
        self.down
            .retain(|_, pressed_at| now.duration_since(*pressed_at) < ttl);
        before - self.down.len()
    }
}
