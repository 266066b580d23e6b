//! Header with totals for the active filter

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;

/// Render the header
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let summary = &app.dashboard.state.filters.view.summary;
    let all_time = app.dashboard.state.cache.summary();
    let locale = &app.locale;

    let label = Style::default().fg(Color::White);
    let value = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled(" Total: ", label),
        Span::styled(locale.format_money(summary.total_amount), value),
        Span::raw("  │  "),
        Span::styled("Count: ", label),
        Span::styled(summary.total_count.to_string(), value),
        Span::raw("  │  "),
        Span::styled("Average/day: ", label),
        Span::styled(locale.format_money(summary.average_per_day), value),
        Span::raw("  │  "),
        Span::styled("All time: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(
                "{} in {} expenses",
                locale.format_money(all_time.total_amount),
                all_time.expense_count
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let block = Block::default()
        .title(" tally ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
