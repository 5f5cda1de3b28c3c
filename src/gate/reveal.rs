//! The reveal sequence
//!
//! Decides at any moment whether the gate or the content is on screen
//! and walks the crossfade between them. One-directional: once the
//! content is up there is no way back to the gate without relaunching.
//!
//! Transitions are deadline-driven off explicit instants, so the whole
//! sequence is testable without waiting on wall time.

use crate::config::TimingConfig;
use std::time::Instant;

/// Where the reveal sequence stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Gate mounted and accepting input, but not yet faded in
    GateHidden,
    /// Gate fully visible
    GateVisible,
    /// Unlocked; gate still rendered, dimming out
    GateFadingOut,
    /// Content swapped in, still dimmed
    ContentFadingIn,
    /// Content at rest
    ContentSettled,
}

/// The reveal state machine
pub struct RevealShell {
    phase: RevealPhase,
    timing: TimingConfig,
    /// Deadline of the next phase change; None when nothing is pending
    next_transition: Option<Instant>,
}

impl RevealShell {
    /// Start on the hidden gate; it fades in after the configured pause
    /// so the first paint settles before anything moves
    pub fn new(timing: TimingConfig, now: Instant) -> Self {
        let next_transition = Some(now + timing.gate_fade_in());
        Self {
            phase: RevealPhase::GateHidden,
            timing,
            next_transition,
        }
    }

    /// Skip the gate entirely and open settled on the content
    pub fn settled(timing: TimingConfig) -> Self {
        Self {
            phase: RevealPhase::ContentSettled,
            timing,
            next_transition: None,
        }
    }

    /// The gate reported an unlock. The fade-out starts synchronously
    /// and the content swap is scheduled exactly once; repeated unlock
    /// reports are absorbed without rescheduling.
    pub fn notify_unlocked(&mut self, now: Instant) {
        match self.phase {
            RevealPhase::GateHidden | RevealPhase::GateVisible => {
                log::info!("gate passed, revealing content");
                self.phase = RevealPhase::GateFadingOut;
                self.next_transition = Some(now + self.timing.content_swap());
            }
            RevealPhase::GateFadingOut
            | RevealPhase::ContentFadingIn
            | RevealPhase::ContentSettled => {}
        }
    }

    /// Advance past any deadlines that `now` has reached. Deadlines
    /// chain off each other, so one coarse tick after a stall lands on
    /// the same phase steady ticking would have. Returns true when the
    /// gate-to-content swap happened on this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut swapped = false;
        while let Some(at) = self.next_transition {
            if now < at {
                break;
            }
            match self.phase {
                RevealPhase::GateHidden => {
                    self.phase = RevealPhase::GateVisible;
                    self.next_transition = None;
                }
                RevealPhase::GateFadingOut => {
                    log::debug!("content swapped in");
                    self.phase = RevealPhase::ContentFadingIn;
                    self.next_transition = Some(at + self.timing.content_settle());
                    swapped = true;
                }
                RevealPhase::ContentFadingIn => {
                    self.phase = RevealPhase::ContentSettled;
                    self.next_transition = None;
                }
                RevealPhase::GateVisible | RevealPhase::ContentSettled => {
                    self.next_transition = None;
                }
            }
        }
        swapped
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// The gate subtree is rendered (hidden, visible or fading)
    pub fn shows_gate(&self) -> bool {
        matches!(
            self.phase,
            RevealPhase::GateHidden | RevealPhase::GateVisible | RevealPhase::GateFadingOut
        )
    }

    /// The content subtree is rendered
    pub fn shows_content(&self) -> bool {
        matches!(
            self.phase,
            RevealPhase::ContentFadingIn | RevealPhase::ContentSettled
        )
    }

    /// Gate has finished its fade-in pause and is drawn at full strength
    pub fn gate_faded_in(&self) -> bool {
        self.phase == RevealPhase::GateVisible
    }

    /// Gate is drawn dimmed, on its way out
    pub fn gate_fading_out(&self) -> bool {
        self.phase == RevealPhase::GateFadingOut
    }

    /// Content is drawn dimmed, still settling
    pub fn content_transitioning(&self) -> bool {
        self.phase == RevealPhase::ContentFadingIn
    }
}
