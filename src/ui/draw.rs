use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus};
use crate::form::FormMode;
use crate::ui::feedback_card::{FeedbackCard, CARD_HEIGHT};
use crate::ui::layout::ListLayout;
use crate::ui::rating_bar::RatingBar;
use crate::ui::theme::Theme;

/// Shown instead of the list when there are no entries
pub const EMPTY_LIST_MESSAGE: &str = "No review available.";

/// Blank lines between feedback cards
const CARD_GAP: u16 = 1;

/// Main draw function
pub fn draw(f: &mut Frame, app: &App, theme: &Theme) {
    let area = f.area();
    let bg_block = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Rating selectors
            Constraint::Length(1), // Rating error
            Constraint::Length(3), // Review input + submit button
            Constraint::Length(1), // Feedback error
            Constraint::Min(4),    // Feedback list
            Constraint::Length(1), // Average
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title(f, app, chunks[0], theme);
    draw_rating_bar(f, app, chunks[1], theme);
    draw_field_error(f, app.field_errors().rating, chunks[2], theme);
    draw_feedback_input(f, app, chunks[3], theme);
    draw_field_error(f, app.field_errors().feedback, chunks[4], theme);
    draw_feedback_list(f, app, chunks[5], theme);
    draw_average(f, app, chunks[6], theme);
    draw_status_bar(f, app, chunks[7], theme);
}

fn focus_border(focused: bool, theme: &Theme) -> Style {
    if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.dimmed_alt)
    }
}

fn draw_title(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let title = Paragraph::new(app.config().appearance.title.as_str())
        .style(
            Style::default()
                .fg(theme.foreground)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn draw_rating_bar(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let focused = app.focus() == Focus::Rating;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(focused, theme))
        .title(" Rating ")
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let bar = RatingBar::new(app.draft().rating(), theme).focused(focused);
    f.render_widget(bar, inner);
}

fn draw_field_error(f: &mut Frame, message: Option<&str>, area: Rect, theme: &Theme) {
    if let Some(message) = message {
        let error = Paragraph::new(format!(" {message}"))
            .style(Style::default().fg(theme.error).bg(theme.background));
        f.render_widget(error, area);
    }
}

/// Review text box with the submit button at its right edge
fn draw_feedback_input(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let focused = app.focus() == Focus::Feedback;
    let title = match app.mode() {
        FormMode::Create => " Review ",
        FormMode::Edit { .. } => " Review (editing, Esc to cancel) ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(focused, theme))
        .title(title)
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let button = format!("[ {} ]", app.submit_label());
    let button_width = (button.width() as u16).min(inner.width);
    let text_area = Rect {
        width: inner.width.saturating_sub(button_width + 1),
        ..inner
    };
    let button_area = Rect {
        x: inner.x + inner.width - button_width,
        width: button_width,
        ..inner
    };

    let text = app.draft().feedback();
    let text_widget = if text.is_empty() {
        Paragraph::new(app.config().appearance.placeholder.as_str())
            .style(Style::default().fg(theme.dimmed).bg(theme.background))
    } else {
        // Keep the end of long text in view while typing
        let visible = tail_fitting(text, text_area.width.saturating_sub(1) as usize);
        Paragraph::new(visible).style(Style::default().fg(theme.foreground).bg(theme.background))
    };
    f.render_widget(text_widget, text_area);

    let button_widget = Paragraph::new(button).style(
        Style::default()
            .fg(theme.selection_fg)
            .bg(theme.selection_bg)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(button_widget, button_area);

    if focused {
        let shown = if text.is_empty() {
            0
        } else {
            tail_fitting(text, text_area.width.saturating_sub(1) as usize).width() as u16
        };
        f.set_cursor_position((text_area.x + shown, text_area.y));
    }
}

/// Longest suffix of `s` no wider than `max_width`
fn tail_fitting(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = s.len();
    for (i, c) in s.char_indices().rev() {
        width += unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width > max_width {
            break;
        }
        start = i;
    }
    &s[start..]
}

fn draw_feedback_list(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let focused = app.focus() == Focus::List;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(focused, theme))
        .title(" Feedback List: ")
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let entries = app.entries();
    if entries.is_empty() {
        let empty = Paragraph::new(EMPTY_LIST_MESSAGE)
            .style(Style::default().fg(theme.dimmed).bg(theme.background));
        f.render_widget(empty, inner);
        return;
    }

    let appearance = &app.config().appearance;
    let layout = ListLayout::new(CARD_HEIGHT, CARD_GAP);
    let range = layout.visible_range(app.selected_index(), entries.len(), inner.height);
    let editing = match app.mode() {
        FormMode::Edit { id } => Some(id),
        FormMode::Create => None,
    };

    for (local_idx, entry) in entries[range.clone()].iter().enumerate() {
        let is_selected = focused && range.start + local_idx == app.selected_index();
        let y = inner.y + layout.card_offset(local_idx);
        if y + CARD_HEIGHT > inner.y + inner.height {
            break;
        }

        let prefix = if is_selected {
            appearance.selected_prefix.as_str()
        } else {
            appearance.unselected_prefix.as_str()
        };
        let card = FeedbackCard::new(entry, theme)
            .selected(is_selected)
            .editing(editing == Some(entry.id))
            .prefix(prefix);
        f.render_widget(card, Rect { y, height: CARD_HEIGHT, ..inner });
    }
}

fn draw_average(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            " Average Rating: ",
            Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            app.average().to_string(),
            Style::default().fg(match app.average().value() {
                Some(_) => theme.accent,
                None => theme.dimmed,
            }),
        ),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.background)),
        area,
    );
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    if let Some(status) = app.status() {
        let bar = Paragraph::new(format!(" {status}"))
            .style(Style::default().fg(theme.error).bg(theme.background));
        f.render_widget(bar, area);
        return;
    }

    let hints = match app.focus() {
        Focus::Rating => " ←→/1-9,0: rate | Enter: submit | Tab: next | Esc: quit",
        Focus::Feedback => " type to write | Enter: submit | Tab: next | Esc: quit",
        Focus::List => " ↑↓: select | e: edit | d: delete | Tab: next | q: quit",
    };
    let bar = Paragraph::new(hints).style(Style::default().fg(theme.dimmed).bg(theme.background));
    f.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feedback::Rating;
    use crate::input::Action;
    use crate::store::MemoryStore;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(70, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::default();
        terminal.draw(|f| draw(f, app, &theme)).unwrap();

        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::new(Box::new(MemoryStore::new()), Config::default())
    }

    #[test]
    fn test_empty_state() {
        let screen = render(&app());
        assert!(screen.contains("How would you rate your service with us?"));
        assert!(screen.contains(EMPTY_LIST_MESSAGE));
        assert!(screen.contains("Average Rating: N/A"));
        assert!(screen.contains("[ Send ]"));
        assert!(screen.contains("Write a review"));
    }

    #[test]
    fn test_entries_and_average() {
        let mut app = app();
        app.select_rating(Rating::new(8).unwrap());
        app.set_feedback_text("Great service");
        app.submit().unwrap();

        let screen = render(&app);
        assert!(screen.contains("Rating: 8"));
        assert!(screen.contains("Great service"));
        assert!(screen.contains("Average Rating: 8.0"));
        assert!(!screen.contains(EMPTY_LIST_MESSAGE));
    }

    #[test]
    fn test_edit_mode_label() {
        let mut app = app();
        app.select_rating(Rating::new(3).unwrap());
        app.set_feedback_text("meh");
        app.submit().unwrap();

        app.set_focus(Focus::List);
        app.apply(Action::EditSelected);

        let screen = render(&app);
        assert!(screen.contains("[ Update ]"));
        assert!(screen.contains("(editing)"));
    }

    #[test]
    fn test_validation_messages() {
        let mut app = app();
        app.submit().unwrap_err();

        let screen = render(&app);
        assert!(screen.contains("Please select a rating."));
        assert!(screen.contains("Feedback is required."));
    }

    #[test]
    fn test_tail_fitting() {
        assert_eq!(tail_fitting("hello", 10), "hello");
        assert_eq!(tail_fitting("hello world", 5), "world");
        assert_eq!(tail_fitting("abc", 0), "");
    }
}
