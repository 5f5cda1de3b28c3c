//! Single keycap widget
//!
//! Renders one key of the on-screen keyboard as a centered label on a
//! colored cell run. Visual state is layered: a pressed key always shows
//! press feedback, even while it is also the hinted or latched key.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::keys::KeySize;
use crate::ui::theme::ThemeColors;

/// One key of the on-screen keyboard.
pub struct KeyCap<'a> {
    label: &'a str,
    size: KeySize,
    colors: &'a ThemeColors,
    pressed: bool,
    highlighted: bool,
    accent: bool,
    active: bool,
    decorative: bool,
    dimmed: bool,
}

impl<'a> KeyCap<'a> {
    pub fn new(label: &'a str, size: KeySize, colors: &'a ThemeColors) -> Self {
        Self {
            label,
            size,
            colors,
            pressed: false,
            highlighted: false,
            accent: false,
            active: false,
            decorative: false,
            dimmed: false,
        }
    }

    /// Physically or virtually held down right now
    pub fn pressed(mut self, pressed: bool) -> Self {
        self.pressed = pressed;
        self
    }

    /// Hinted as the next key to press
    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Hinted submit key (green instead of the plain hint color)
    pub fn accent(mut self, accent: bool) -> Self {
        self.accent = accent;
        self
    }

    /// Latched modifier (caps lock on, sticky shift armed)
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Non-interactive filler cap (fn, arrows and friends)
    pub fn decorative(mut self, decorative: bool) -> Self {
        self.decorative = decorative;
        self
    }

    /// Render at reduced intensity (fade phases)
    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    fn style(&self) -> Style {
        let (bg, fg, bold): (Color, Color, bool) = if self.pressed {
            (self.colors.key_on, self.colors.key_text_on, true)
        } else if self.accent {
            (self.colors.green, self.colors.key_text_on, true)
        } else if self.highlighted {
            (self.colors.key_hint, self.colors.key_text_hint, true)
        } else if self.active {
            (self.colors.key_active, self.colors.key_text_on, false)
        } else if self.decorative {
            (self.colors.key_off, self.colors.dim, false)
        } else {
            (self.colors.key_off, self.colors.key_text, false)
        };

        let mut style = Style::default().fg(fg).bg(bg);
        if bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dimmed {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }
}

impl Widget for KeyCap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let width = self.size.width().min(area.width) as usize;
        let text = format!("{:^width$}", self.label);
        buf.set_stringn(area.x, area.y, &text, width, self.style());
    }
}
