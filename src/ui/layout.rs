//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::quiz::{Session, Step};
use crate::theme::Theme;

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Column of at most `max_width` cells, centered in `area`
pub fn reading_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect { x: area.x + (area.width - width) / 2, width, ..area }
}

/// Title bar with the app name on the left and progress on the right
pub fn draw_header(frame: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [title_area, progress_area] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(34)]).areas(inner);

    let title = Line::from(vec![
        Span::styled(
            "LECTIO",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ·  The Gospel of St. Luke", Style::default().fg(theme.accent_secondary)),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    if session.step() == Step::Quiz {
        let (position, total) = session.progress();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.accent_secondary).bg(theme.bg_secondary))
            .ratio(progress_ratio(position, total))
            .label(progress_label(position, total));
        frame.render_widget(gauge, progress_area);
    }
}

/// "Question 3 of 10"
pub fn progress_label(position: usize, total: usize) -> String {
    format!("Question {} of {}", position, total)
}

/// Filled fraction of the progress gauge, in 0.0..=1.0
pub fn progress_ratio(position: usize, total: usize) -> f64 {
    if total == 0 { 0.0 } else { (position as f64 / total as f64).clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
    }

    #[test]
    fn reading_column_caps_width() {
        let column = reading_column(Rect::new(0, 0, 200, 40), 90);
        assert_eq!(column.width, 90);
        assert_eq!(column.x, 55);
        assert_eq!(reading_column(Rect::new(5, 0, 60, 40), 90), Rect::new(5, 0, 60, 40));
    }

    #[test]
    fn progress_uses_real_count() {
        assert_eq!(progress_label(3, 10), "Question 3 of 10");
        assert_eq!(progress_ratio(5, 10), 0.5);
        assert_eq!(progress_ratio(0, 0), 0.0);
    }
}
