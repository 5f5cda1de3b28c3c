//! Visual keyboard rendering
//!
//! Draws the five-row gate keyboard from the shared layout, one keycap
//! widget per cap. The same layout geometry backs mouse hit-testing, so
//! whatever is drawn here is exactly what a click can land on.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::keys::layout::{GateLayout, KEY_GAP, LAYOUT};
use crate::keys::{GateKey, KeyDef, PressedKeys};
use crate::ui::keycap::KeyCap;
use crate::ui::theme::ThemeColors;

/// Snapshot of everything the keyboard needs to draw one frame
pub struct KeyboardView<'a> {
    /// Keys currently held down (physical or virtual)
    pub pressed: &'a PressedKeys,
    /// Key the hint strategy wants lit, if any
    pub hint: Option<GateKey>,
    /// Caps lock latch state
    pub caps_lock: bool,
    /// Shift latch state (held or sticky)
    pub shift: bool,
}

/// Visual representation of the gate keyboard
pub struct GateKeyboard<'a> {
    view: KeyboardView<'a>,
    colors: &'a ThemeColors,
    dimmed: bool,
}

impl<'a> GateKeyboard<'a> {
    pub fn new(view: KeyboardView<'a>, colors: &'a ThemeColors) -> Self {
        Self {
            view,
            colors,
            dimmed: false,
        }
    }

    /// Render at reduced intensity (fade phases, backdrop duty)
    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    fn cap_for(&self, def: &KeyDef) -> KeyCap<'a> {
        let cap = KeyCap::new(def.label, def.size, self.colors).dimmed(self.dimmed);
        let Some(key) = def.action else {
            return cap.decorative(true);
        };

        let hinted = self.view.hint == Some(key);
        let active = match key {
            GateKey::CapsLock => self.view.caps_lock,
            GateKey::Shift => self.view.shift,
            _ => false,
        };

        cap.pressed(self.view.pressed.contains(key))
            .accent(hinted && key == GateKey::Enter)
            .highlighted(hinted && key != GateKey::Enter)
            .active(active)
    }
}

impl Widget for GateKeyboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < LAYOUT.width() || area.height < LAYOUT.height() {
            buf.set_string(
                area.x,
                area.y,
                "⌨ Window too small",
                Style::default().fg(self.colors.dim),
            );
            return;
        }

        for (i, row) in LAYOUT.rows().iter().enumerate() {
            let y = area.y + i as u16;
            let mut x = GateLayout::row_origin_x(area, row);
            for def in row {
                let cap_area = Rect::new(x, y, def.size.width(), 1).intersection(buf.area);
                self.cap_for(def).render(cap_area, buf);
                x += def.size.width() + KEY_GAP;
            }
        }
    }
}
