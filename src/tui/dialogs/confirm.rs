//! Confirmation dialog
//!
//! Simple yes/no confirmation

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::ExpenseId;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

/// Question shown before deleting an expense
pub fn delete_message(app: &App, id: &ExpenseId) -> String {
    match app.dashboard.state.cache.expenses().iter().find(|e| &e.id == id) {
        Some(expense) => format!(
            "Delete '{}' ({}, {})?",
            expense.title,
            app.locale.format_money(expense.amount),
            app.locale.format_date(expense.date)
        ),
        None => format!("Delete expense {}?", id),
    }
}

/// Render a confirmation dialog
pub fn render(frame: &mut Frame, message: &str) {
    let area = centered_rect_fixed(54, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(Color::Green)),
            Span::raw(" Yes  "),
            Span::styled("[N]", Style::default().fg(Color::Red)),
            Span::raw(" No  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
