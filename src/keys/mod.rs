//! Key identity, layout geometry and physical input sources

mod key;
mod listener;
mod pressed;
pub mod layout;

pub use key::{GateKey, KeyEdge, KeySignal};
pub use layout::{GateLayout, KeyDef, KeySize, LAYOUT};
pub use listener::{InputMode, PhysicalInput, PolledListener, PRESS_ONLY_TTL};
pub use pressed::PressedKeys;
