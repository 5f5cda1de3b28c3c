//! Keyboard Gate - terminal typing gate with an animated keyboard reveal
//!
//! A landing screen that stays locked until a passphrase is typed on the
//! on-screen (or physical) keyboard, then crossfades into the portfolio
//! content behind it.

pub mod config;
pub mod gate;
pub mod keys;
pub mod ui;

pub use config::Config;
