//! Physical keyboard listening
//!
//! Release edges are what make held-key visuals and shift handling work,
//! and terminals differ in what they can report. Input is sourced through
//! a fallback chain: terminals speaking the enhanced keyboard protocol
//! deliver press and release events directly; otherwise the global key
//! state is polled and edges are derived by diffing snapshots; if no
//! polling backend is available either, plain terminal presses are used
//! and held keys expire on a timeout.

use super::{GateKey, KeySignal};
use device_query::{DeviceQuery, DeviceState, Keycode};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// How long a pressed key stays lit when release edges are unavailable
pub const PRESS_ONLY_TTL: Duration = Duration::from_millis(250);

/// How physical key edges reach the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Terminal reports press and release events (enhanced keyboard
    /// protocol); key repeat arrives as extra presses
    Enhanced,
    /// Global device state polled for edges; the terminal key stream is
    /// used for controls only so nothing is seen twice
    Polled,
    /// Terminal reports presses only; pressed keys expire after
    /// [`PRESS_ONLY_TTL`]
    PressOnly,
}

impl InputMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Enhanced => "enhanced terminal",
            Self::Polled => "polled device state",
            Self::PressOnly => "press-only",
        }
    }
}

/// Polls the global key state and emits a signal per edge
pub struct PolledListener {
    device_state: DeviceState,
    last_keys: Vec<Keycode>,
    signal_tx: mpsc::Sender<KeySignal>,
}

impl PolledListener {
    /// Returns None when no device backend is available (headless or
    /// remote session), letting the caller fall back to press-only
    /// input.
    pub fn try_new(signal_tx: mpsc::Sender<KeySignal>) -> Option<Self> {
        let device_state = DeviceState::checked_new()?;
        Some(Self {
            device_state,
            last_keys: Vec::new(),
            signal_tx,
        })
    }

    /// Poll once, emitting a signal for every key edge since the last
    /// poll. While Ctrl, Alt or a meta key is down, press edges are
    /// suppressed so terminal chords keep their meaning; release edges
    /// always pass so the pressed set cannot wedge. Returns the number
    /// of signals emitted.
    pub fn poll(&mut self, now: Instant) -> usize {
        let current_keys = self.device_state.get_keys();
        let chord_held = current_keys.iter().any(|k| is_chord_modifier(*k));
        let mut emitted = 0;

        for keycode in &current_keys {
            if self.last_keys.contains(keycode) {
                continue;
            }
            if chord_held {
                continue;
            }
            if let Some(key) = GateKey::from_keycode(*keycode) {
                let _ = self.signal_tx.send(KeySignal::press(key, now));
                emitted += 1;
            }
        }

        for keycode in &self.last_keys {
            if current_keys.contains(keycode) {
                continue;
            }
            if let Some(key) = GateKey::from_keycode(*keycode) {
                let _ = self.signal_tx.send(KeySignal::release(key, now));
                emitted += 1;
            }
        }

        self.last_keys = current_keys;
        emitted
    }
}

fn is_chord_modifier(keycode: Keycode) -> bool {
    matches!(
        keycode,
        Keycode::LControl
            | Keycode::RControl
            | Keycode::LAlt
            | Keycode::RAlt
            | Keycode::LMeta
            | Keycode::RMeta
    )
}

/// A polled listener bundled with the channel it feeds. Owned by the
/// app while physical input is live; dropping it stops polling, which
/// is how listeners are detached when the gate unmounts.
pub struct PhysicalInput {
    listener: PolledListener,
    signal_rx: mpsc::Receiver<KeySignal>,
}

impl PhysicalInput {
    pub fn try_new() -> Option<Self> {
        let (signal_tx, signal_rx) = mpsc::channel();
        let listener = PolledListener::try_new(signal_tx)?;
        Some(Self {
            listener,
            signal_rx,
        })
    }

    /// Poll the device once and drain every signal it produced
    pub fn drain(&mut self, now: Instant) -> Vec<KeySignal> {
        self.listener.poll(now);
        let mut signals = Vec::new();
        while let Ok(signal) = self.signal_rx.try_recv() {
            signals.push(signal);
        }
        signals
    }
}
