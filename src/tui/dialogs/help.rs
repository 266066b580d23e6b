//! Help dialog
//!
//! Shows keyboard shortcuts for the focused panel

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{App, FocusedPanel};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.focused_panel))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines(panel: FocusedPanel) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Global Keys"),
        Line::from(""),
        key_line("q", "Quit"),
        key_line("?", "Show/hide help"),
        key_line("Tab", "Next panel"),
        key_line("j/k", "Move selection down/up"),
        key_line("f or /", "Edit filter"),
        key_line("x", "Clear filter"),
        key_line("a", "Add expense"),
        key_line("u", "Import a file"),
        key_line("r", "Refresh from server"),
        key_line("Esc", "Clear chart selection"),
        Line::from(""),
    ];

    match panel {
        FocusedPanel::Expenses => {
            lines.push(heading("Expenses"));
            lines.push(Line::from(""));
            lines.push(key_line("d", "Delete selected expense"));
            lines.push(key_line("g/G", "Go to top/bottom"));
        }
        FocusedPanel::Monthly => {
            lines.push(heading("Monthly Chart"));
            lines.push(Line::from(""));
            lines.push(key_line("h/l", "Previous/next month"));
            lines.push(key_line("Enter", "Show expenses for the month"));
        }
        FocusedPanel::Categories => {
            lines.push(heading("Categories"));
            lines.push(Line::from(""));
            lines.push(key_line("Enter", "Show expenses in the category"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
