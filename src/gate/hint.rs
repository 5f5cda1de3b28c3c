//! Keycap hint highlighting
//!
//! A pure affordance layered over the gate: strategies decide which
//! keycap to spotlight and when, but never touch the buffer or the
//! match logic. Hints live and die with the gate; once a strategy stops
//! it stays stopped for the rest of the mount.

use crate::config::{HintConfig, HintStrategyKind};
use crate::keys::GateKey;
use std::time::{Duration, Instant};

/// Drives the keycap highlight. Strategies observe input and time but
/// have no way to mutate gate state.
pub trait HintStrategy {
    /// Advance time-driven state
    fn tick(&mut self, now: Instant);

    /// The user typed, erased or submitted; `buffer` is the gate buffer
    /// after the change
    fn observe_input(&mut self, buffer: &str, now: Instant);

    /// The keycap to highlight right now, if any
    fn current(&self) -> Option<GateKey>;
}

/// Build the configured strategy for `target`
pub fn strategy_for(config: &HintConfig, target: &str, now: Instant) -> Box<dyn HintStrategy> {
    match config.strategy {
        HintStrategyKind::FixedCycle => Box::new(FixedCycleHints::new(target, config, now)),
        HintStrategyKind::Adaptive => Box::new(AdaptiveHints::new(target, config, now)),
    }
}

/// Free-running highlight that walks the passphrase keys and then the
/// submit key, holding each for a configured dwell. After a capped
/// number of full cycles it goes dark permanently. Typing does not
/// disturb the rhythm.
pub struct FixedCycleHints {
    /// Passphrase keys followed by the submit key
    sequence: Vec<GateKey>,
    index: usize,
    iteration: u32,
    max_cycles: u32,
    step: Duration,
    pre_submit: Duration,
    cycle_pause: Duration,
    /// Deadline for the next advance; None once stopped
    next_advance: Option<Instant>,
}

impl FixedCycleHints {
    pub fn new(target: &str, config: &HintConfig, now: Instant) -> Self {
        let mut sequence: Vec<GateKey> = target.chars().filter_map(GateKey::from_char).collect();
        sequence.push(GateKey::Enter);

        let mut hints = Self {
            sequence,
            index: 0,
            iteration: 0,
            max_cycles: config.max_cycles,
            step: config.step(),
            pre_submit: config.pre_submit(),
            cycle_pause: config.cycle_pause(),
            next_advance: None,
        };
        if hints.iteration < hints.max_cycles {
            hints.next_advance = Some(now + hints.dwell(hints.index));
        }
        hints
    }

    /// How long the key at `index` stays lit: the submit key gets the
    /// long cycle pause, the character right before it a shorter beat,
    /// everything else the standard step
    fn dwell(&self, index: usize) -> Duration {
        if self.sequence.get(index) == Some(&GateKey::Enter) {
            self.cycle_pause
        } else if index + 2 == self.sequence.len() {
            self.pre_submit
        } else {
            self.step
        }
    }

    fn advance(&mut self, at: Instant) {
        if self.index + 1 < self.sequence.len() {
            self.index += 1;
        } else {
            self.index = 0;
            self.iteration += 1;
        }
        self.next_advance = if self.iteration < self.max_cycles {
            Some(at + self.dwell(self.index))
        } else {
            None
        };
    }
}

impl HintStrategy for FixedCycleHints {
    fn tick(&mut self, now: Instant) {
        // Deadlines chain off each other, so a coarse tick after a
        // stall catches the cursor up without drifting the rhythm.
        while let Some(at) = self.next_advance {
            if now < at {
                break;
            }
            self.advance(at);
        }
    }

    fn observe_input(&mut self, _buffer: &str, _now: Instant) {}

    fn current(&self) -> Option<GateKey> {
        if self.iteration >= self.max_cycles {
            return None;
        }
        self.sequence.get(self.index).copied()
    }
}

/// Context-sensitive highlight: after the user goes idle, light up the
/// next key that would move the buffer toward the passphrase (or the
/// delete key if the buffer has deviated). The idle delay shrinks as
/// the user types faster, within a configured floor and ceiling.
pub struct AdaptiveHints {
    /// Passphrase, lowercase
    target: String,
    floor: Duration,
    ceiling: Duration,
    cadence_window: usize,
    /// Rolling window of gaps between keystrokes
    recent_gaps: Vec<Duration>,
    last_input: Option<Instant>,
    show_at: Instant,
    visible: bool,
    next_key: GateKey,
}

impl AdaptiveHints {
    pub fn new(target: &str, config: &HintConfig, now: Instant) -> Self {
        let target = target.to_ascii_lowercase();
        let next_key = next_needed(&target, "");
        Self {
            target,
            floor: config.adaptive_floor(),
            ceiling: config.adaptive_ceiling(),
            cadence_window: config.cadence_window,
            recent_gaps: Vec::new(),
            last_input: None,
            show_at: now + config.adaptive_ceiling(),
            visible: false,
            next_key,
        }
    }

    /// Twice the mean keystroke gap, clamped to the configured band.
    /// Without cadence data yet, the ceiling.
    fn idle_delay(&self) -> Duration {
        if self.recent_gaps.is_empty() {
            return self.ceiling;
        }
        let total: Duration = self.recent_gaps.iter().sum();
        let mean = total / self.recent_gaps.len() as u32;
        (mean * 2).clamp(self.floor, self.ceiling)
    }
}

impl HintStrategy for AdaptiveHints {
    fn tick(&mut self, now: Instant) {
        if !self.visible && now >= self.show_at {
            self.visible = true;
        }
    }

    fn observe_input(&mut self, buffer: &str, now: Instant) {
        if let Some(last) = self.last_input {
            self.recent_gaps.push(now.duration_since(last));
            if self.recent_gaps.len() > self.cadence_window {
                self.recent_gaps.remove(0);
            }
        }
        self.last_input = Some(now);
        self.visible = false;
        self.next_key = next_needed(&self.target, buffer);
        self.show_at = now + self.idle_delay();
    }

    fn current(&self) -> Option<GateKey> {
        if self.visible {
            Some(self.next_key)
        } else {
            None
        }
    }
}

/// The key that would move `buffer` toward `target`: the next
/// passphrase character while on track, the submit key once the whole
/// word is in, the delete key after a wrong turn
fn next_needed(target: &str, buffer: &str) -> GateKey {
    let typed = buffer.to_ascii_lowercase();
    if !target.starts_with(&typed) {
        return GateKey::Backspace;
    }
    match target.chars().nth(typed.chars().count()) {
        Some(c) => GateKey::from_char(c).unwrap_or(GateKey::Enter),
        None => GateKey::Enter,
    }
}
