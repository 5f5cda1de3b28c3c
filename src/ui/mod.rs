//! Terminal User Interface components

mod app;
mod backdrop;
mod content;
mod keyboard_visual;
mod keycap;
pub mod theme;
mod widgets;

pub use app::{App, AppState};
pub use backdrop::Backdrop;
pub use content::PortfolioContent;
pub use keyboard_visual::{GateKeyboard, KeyboardView};
pub use keycap::KeyCap;
pub use theme::ThemeColors;
pub use widgets::*;
