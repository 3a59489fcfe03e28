//! Ten rating buttons in a row, one highlighted.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::theme::Theme;
use crate::feedback::Rating;

/// Width of one button, e.g. `" 10 "`
pub const BUTTON_WIDTH: u16 = 4;
/// Space between buttons
const BUTTON_GAP: u16 = 1;

/// Row of rating selectors
pub struct RatingBar<'a> {
    selected: Option<Rating>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> RatingBar<'a> {
    pub fn new(selected: Option<Rating>, theme: &'a Theme) -> Self {
        Self {
            selected,
            focused: false,
            theme,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Columns needed to draw all ten buttons
    pub fn required_width() -> u16 {
        let count = Rating::all().count() as u16;
        count * BUTTON_WIDTH + (count - 1) * BUTTON_GAP
    }
}

impl<'a> Widget for RatingBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Center the row when there is room, otherwise start at the left edge
        let width = Self::required_width().min(area.width);
        let mut x = area.x + (area.width - width) / 2;
        let right = area.x + area.width;

        for rating in Rating::all() {
            if x + BUTTON_WIDTH > right {
                break;
            }

            let is_selected = self.selected == Some(rating);
            let style = if is_selected {
                Style::default()
                    .fg(self.theme.selection_fg)
                    .bg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(self.theme.foreground)
                    .bg(self.theme.button_bg)
            };
            let style = if self.focused && is_selected {
                style.add_modifier(Modifier::UNDERLINED)
            } else {
                style
            };

            let label = format!("{:^width$}", rating.get(), width = BUTTON_WIDTH as usize);
            buf.set_string(x, area.y, label, style);
            x += BUTTON_WIDTH + BUTTON_GAP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_required_width() {
        assert_eq!(RatingBar::required_width(), 49);
    }

    #[test]
    fn test_renders_all_labels() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 49, 1);
        let mut buf = Buffer::empty(area);
        RatingBar::new(None, &theme).render(area, &mut buf);

        let text = row(&buf, 0);
        for n in 1..=10 {
            assert!(text.contains(&n.to_string()), "missing {n} in {text:?}");
        }
    }

    #[test]
    fn test_selected_uses_accent() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 49, 1);
        let mut buf = Buffer::empty(area);
        RatingBar::new(Rating::new(1), &theme).render(area, &mut buf);

        // First button occupies columns 0..4
        assert_eq!(buf[(1u16, 0u16)].bg, theme.accent);
        // Second button starts after the gap
        assert_eq!(buf[(6u16, 0u16)].bg, theme.button_bg);
    }
}
