//! Portfolio content screen
//!
//! The static subtree revealed once the gate unlocks. The reveal shell
//! treats it as opaque; it only ever asks for it to be drawn, plain or
//! dimmed while the fade-in runs.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::ui::theme::ThemeColors;
use crate::ui::widgets::centered_rect;

const CONTENT_WIDTH: u16 = 60;

const SECTIONS: &[(&str, &[&str])] = &[
    (
        "about",
        &["Placeholder biography. The real copy lives elsewhere."],
    ),
    (
        "projects",
        &[
            "keyboard-gate  - this terminal landing page",
            "more to come   - placeholder entries",
        ],
    ),
    (
        "skills",
        &["systems, terminals, input handling (placeholder list)"],
    ),
    ("contact", &["hello@example.com (placeholder)"]),
];

/// The unlocked portfolio view
pub struct PortfolioContent<'a> {
    colors: &'a ThemeColors,
    dimmed: bool,
}

impl<'a> PortfolioContent<'a> {
    pub fn new(colors: &'a ThemeColors) -> Self {
        Self {
            colors,
            dimmed: false,
        }
    }

    /// Render at reduced intensity while the fade-in runs
    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    fn dim(&self, style: Style) -> Style {
        if self.dimmed {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }
}

impl Widget for PortfolioContent<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let height: u16 = 4 + SECTIONS
            .iter()
            .map(|(_, body)| body.len() as u16 + 2)
            .sum::<u16>();
        let inner = centered_rect(CONTENT_WIDTH.min(area.width), height.min(area.height), area);

        let hero = Style::default()
            .fg(self.colors.fg)
            .add_modifier(Modifier::BOLD);
        let heading = Style::default()
            .fg(self.colors.cyan)
            .add_modifier(Modifier::BOLD);
        let body = Style::default().fg(self.colors.fg);
        let dim = Style::default().fg(self.colors.dim);

        let mut y = inner.y;
        let mut put = |buf: &mut Buffer, y: &mut u16, line: Line| {
            if *y < inner.y + inner.height {
                buf.set_line(inner.x, *y, &line, inner.width);
                *y += 1;
            }
        };

        put(buf, &mut y, Line::from(Span::styled("you're in.", self.dim(hero))));
        put(
            buf,
            &mut y,
            Line::from(Span::styled(
                "a terminal portfolio, unlocked the hard way",
                self.dim(dim),
            )),
        );
        put(buf, &mut y, Line::default());

        for (title, lines) in SECTIONS {
            put(
                buf,
                &mut y,
                Line::from(Span::styled(format!("# {title}"), self.dim(heading))),
            );
            for text in *lines {
                put(buf, &mut y, Line::from(Span::styled(*text, self.dim(body))));
            }
            put(buf, &mut y, Line::default());
        }

        put(
            buf,
            &mut y,
            Line::from(Span::styled("q to quit", self.dim(dim))),
        );
    }
}
