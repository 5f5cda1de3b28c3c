//! Custom TUI widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::ui::theme::ThemeColors;

/// Red mismatch notice shown under the keyboard
pub struct ErrorBanner<'a> {
    message: &'a str,
    colors: &'a ThemeColors,
    dimmed: bool,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(message: &'a str, colors: &'a ThemeColors) -> Self {
        Self {
            message,
            colors,
            dimmed: false,
        }
    }

    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }
}

impl Widget for ErrorBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let mut style = Style::default()
            .fg(self.colors.red)
            .add_modifier(Modifier::BOLD);
        if self.dimmed {
            style = style.add_modifier(Modifier::DIM);
        }

        let len = self.message.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(len) / 2;
        buf.set_stringn(x, area.y, self.message, area.width as usize, style);
    }
}

/// A `width` x `height` rect centered inside `area`, clamped to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn banner_is_centered_and_red() {
        let colors = ThemeColors::dark();
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 1));

        ErrorBanner::new("Try again...", &colors).render(Rect::new(0, 0, 20, 1), &mut buf);

        // 12 chars centered in 20 columns start at column 4
        let cell = buf.cell((4, 0)).unwrap();
        assert_eq!(cell.symbol(), "T");
        assert_eq!(cell.style().fg, Some(colors.red));
        assert_eq!(buf.cell((3, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn banner_clips_to_narrow_area() {
        let colors = ThemeColors::dark();
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));

        ErrorBanner::new("Try again...", &colors).render(Rect::new(0, 0, 5, 1), &mut buf);

        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "T");
    }

    #[test]
    fn centered_rect_centers_within_area() {
        let area = Rect::new(0, 0, 100, 30);
        let rect = centered_rect(71, 5, area);
        assert_eq!(rect, Rect::new(14, 12, 71, 5));
    }

    #[test]
    fn centered_rect_clamps_to_small_area() {
        let area = Rect::new(0, 0, 40, 3);
        let rect = centered_rect(71, 5, area);
        assert_eq!(rect, Rect::new(0, 0, 40, 3));
    }

    #[test]
    fn centered_rect_respects_area_origin() {
        let area = Rect::new(10, 5, 20, 10);
        let rect = centered_rect(10, 4, area);
        assert_eq!(rect, Rect::new(15, 8, 10, 4));
    }
}
