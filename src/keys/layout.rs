//! The gate keyboard layout and its geometry
//!
//! A fixed five-row layout (digits, three QWERTY rows, space row). The
//! modifier caps on the space row (fn, ^, ⌥, ⌘) are decorative: they
//! render like any other keycap but carry no action, so pressing or
//! clicking them does nothing. Hit-testing shares the same centering
//! math the renderer uses, so a click always lands on the key that was
//! drawn under it.

use super::GateKey;
use ratatui::layout::Rect;
use std::sync::LazyLock;

/// Columns of padding between adjacent keycaps
pub const KEY_GAP: u16 = 1;

/// Rendered width class of a keycap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl KeySize {
    /// Width in character cells
    pub fn width(self) -> u16 {
        match self {
            Self::Small => 4,
            Self::Medium => 5,
            Self::Large => 8,
            Self::ExtraLarge => 24,
        }
    }
}

/// One keycap in the visual layout
#[derive(Debug, Clone, Copy)]
pub struct KeyDef {
    /// Label to display
    pub label: &'static str,
    /// Width class
    pub size: KeySize,
    /// What pressing or clicking the cap does; None for decorative caps
    pub action: Option<GateKey>,
}

impl KeyDef {
    const fn key(label: &'static str, size: KeySize, action: GateKey) -> Self {
        Self {
            label,
            size,
            action: Some(action),
        }
    }

    const fn decor(label: &'static str, size: KeySize) -> Self {
        Self {
            label,
            size,
            action: None,
        }
    }
}

/// The standard gate layout, built once
pub static LAYOUT: LazyLock<GateLayout> = LazyLock::new(GateLayout::standard);

/// The gate keyboard: five rows of keycaps plus the geometry to render
/// and hit-test them
pub struct GateLayout {
    rows: [Vec<KeyDef>; 5],
}

impl GateLayout {
    pub fn standard() -> Self {
        use GateKey::{Backspace, CapsLock, Char, Enter, Shift, Space};
        use KeySize::{ExtraLarge, Large, Medium};

        let row0 = vec![
            KeyDef::key("1", Medium, Char('1')),
            KeyDef::key("2", Medium, Char('2')),
            KeyDef::key("3", Medium, Char('3')),
            KeyDef::key("4", Medium, Char('4')),
            KeyDef::key("5", Medium, Char('5')),
            KeyDef::key("6", Medium, Char('6')),
            KeyDef::key("7", Medium, Char('7')),
            KeyDef::key("8", Medium, Char('8')),
            KeyDef::key("9", Medium, Char('9')),
            KeyDef::key("0", Medium, Char('0')),
        ];

        let row1 = vec![
            KeyDef::key("Q", Medium, Char('q')),
            KeyDef::key("W", Medium, Char('w')),
            KeyDef::key("E", Medium, Char('e')),
            KeyDef::key("R", Medium, Char('r')),
            KeyDef::key("T", Medium, Char('t')),
            KeyDef::key("Y", Medium, Char('y')),
            KeyDef::key("U", Medium, Char('u')),
            KeyDef::key("I", Medium, Char('i')),
            KeyDef::key("O", Medium, Char('o')),
            KeyDef::key("P", Medium, Char('p')),
        ];

        let row2 = vec![
            KeyDef::key("caps", Large, CapsLock),
            KeyDef::key("A", Medium, Char('a')),
            KeyDef::key("S", Medium, Char('s')),
            KeyDef::key("D", Medium, Char('d')),
            KeyDef::key("F", Medium, Char('f')),
            KeyDef::key("G", Medium, Char('g')),
            KeyDef::key("H", Medium, Char('h')),
            KeyDef::key("J", Medium, Char('j')),
            KeyDef::key("K", Medium, Char('k')),
            KeyDef::key("L", Medium, Char('l')),
            KeyDef::key("return", Large, Enter),
        ];

        let row3 = vec![
            KeyDef::key("shift", Large, Shift),
            KeyDef::key("Z", Medium, Char('z')),
            KeyDef::key("X", Medium, Char('x')),
            KeyDef::key("C", Medium, Char('c')),
            KeyDef::key("V", Medium, Char('v')),
            KeyDef::key("B", Medium, Char('b')),
            KeyDef::key("N", Medium, Char('n')),
            KeyDef::key("M", Medium, Char('m')),
            KeyDef::key("delete", Large, Backspace),
        ];

        let row4 = vec![
            KeyDef::decor("fn", Medium),
            KeyDef::decor("^", Medium),
            KeyDef::decor("⌥", Medium),
            KeyDef::decor("⌘", Medium),
            KeyDef::key("", ExtraLarge, Space),
            KeyDef::decor("⌘", Medium),
            KeyDef::decor("⌥", Medium),
        ];

        Self {
            rows: [row0, row1, row2, row3, row4],
        }
    }

    pub fn rows(&self) -> &[Vec<KeyDef>] {
        &self.rows
    }

    /// Total width of a row in cells, gaps included
    pub fn row_width(row: &[KeyDef]) -> u16 {
        let keys: u16 = row.iter().map(|k| k.size.width()).sum();
        keys + KEY_GAP * row.len().saturating_sub(1) as u16
    }

    /// Width of the widest row
    pub fn width(&self) -> u16 {
        self.rows
            .iter()
            .map(|r| Self::row_width(r))
            .max()
            .unwrap_or(0)
    }

    /// Height in terminal rows (one row of cells per key row)
    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }

    /// Left edge of a row centered within `area`
    pub fn row_origin_x(area: Rect, row: &[KeyDef]) -> u16 {
        area.x + area.width.saturating_sub(Self::row_width(row)) / 2
    }

    /// Whether the layout carries `key` as an action on any cap
    pub fn contains_action(&self, key: GateKey) -> bool {
        self.rows
            .iter()
            .flatten()
            .any(|def| def.action == Some(key))
    }

    /// The actionable key under screen position (`x`, `y`), given the
    /// area the keyboard was rendered into. Gaps between caps and
    /// decorative caps hit nothing.
    pub fn key_at(&self, area: Rect, x: u16, y: u16) -> Option<GateKey> {
        if y < area.y || y >= area.y + self.height() {
            return None;
        }
        let row = &self.rows[(y - area.y) as usize];
        let mut key_x = Self::row_origin_x(area, row);
        for def in row {
            let w = def.size.width();
            if x >= key_x && x < key_x + w {
                return def.action;
            }
            key_x += w + KEY_GAP;
        }
        None
    }
}
