//! The typing gate and the reveal sequence around it

mod hint;
mod reveal;
mod typing;

pub use hint::{strategy_for, AdaptiveHints, FixedCycleHints, HintStrategy};
pub use reveal::{RevealPhase, RevealShell};
pub use typing::{GateOutcome, TypingGate};
