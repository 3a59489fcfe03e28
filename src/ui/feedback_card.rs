//! Feedback card widget
//!
//! Renders each entry as a two-line card:
//! - Rating (bold) with Edit/Delete hints when selected
//! - Feedback text

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::feedback::FeedbackEntry;

/// Lines per card
pub const CARD_HEIGHT: u16 = 2;

const ACTION_HINTS: &str = "e Edit  d Delete";

/// Feedback card widget
pub struct FeedbackCard<'a> {
    entry: &'a FeedbackEntry,
    theme: &'a Theme,
    selected: bool,
    /// Entry is loaded in the form for update
    editing: bool,
    prefix: &'a str,
}

impl<'a> FeedbackCard<'a> {
    pub fn new(entry: &'a FeedbackEntry, theme: &'a Theme) -> Self {
        Self {
            entry,
            theme,
            selected: false,
            editing: false,
            prefix: "",
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    pub fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = prefix;
        self
    }
}

impl<'a> Widget for FeedbackCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let bg = if self.selected { self.theme.selection_bg } else { self.theme.background };
        let fg = if self.selected { self.theme.selection_fg } else { self.theme.foreground };

        buf.set_style(area, Style::default().bg(bg));

        let width = area.width as usize;
        let prefix_width = self.prefix.width();

        // Line 1: prefix + rating, hints on the right when selected
        let mut heading = format!("{}Rating: {}", self.prefix, self.entry.rating);
        if self.editing {
            heading.push_str(" (editing)");
        }
        let heading_style = Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD);
        buf.set_string(area.x, area.y, truncate(&heading, width), heading_style);

        if self.selected {
            let hints_width = ACTION_HINTS.width();
            if heading.width() + hints_width + 1 <= width {
                let x = area.x + (width - hints_width) as u16;
                buf.set_string(x, area.y, ACTION_HINTS, Style::default().fg(self.theme.dimmed).bg(bg));
            }
        }

        // Line 2: feedback text, aligned under the rating
        if area.height > 1 {
            let x = area.x + prefix_width.min(width) as u16;
            let text_width = width.saturating_sub(prefix_width);
            buf.set_string(
                x,
                area.y + 1,
                truncate(&self.entry.feedback, text_width),
                Style::default().fg(fg).bg(bg),
            );
        }
    }
}

/// Truncate string to fit within max_width, adding ellipsis if needed
fn truncate(s: &str, max_width: usize) -> String {
    let width = s.width();
    if width <= max_width {
        s.to_string()
    } else if max_width <= 1 {
        "…".to_string()
    } else {
        let mut result = String::new();
        let mut current_width = 0;

        for c in s.chars() {
            let char_width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if current_width + char_width + 1 > max_width {
                result.push('…');
                break;
            }
            result.push(c);
            current_width += char_width;
        }

        result
    }
}
