//! Upload dialog
//!
//! Asks for the path of a statement to import.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::state::UploadStatus;
use crate::tui::app::App;
use crate::tui::dialogs::expense::edit_input;
use crate::tui::layout::centered_rect_fixed;

/// Render the upload dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(70, 8, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Import File ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Formats
            Constraint::Length(1), // Path
            Constraint::Length(1), // Status
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "CSV, Excel (.xlsx/.xls) or PDF bank statement",
            Style::default().fg(Color::DarkGray),
        )),
        chunks[0],
    );
    frame.render_widget(&app.upload_input, chunks[1]);

    if let UploadStatus::Failed(message) = &app.dashboard.state.upload {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("Last upload failed: {}", message),
                Style::default().fg(Color::Red),
            )),
            chunks[2],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Upload  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[4]);
}

/// Handle key input for the upload dialog
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => app.submit_upload(),
        code => {
            edit_input(&mut app.upload_input, code);
        }
    }
}
