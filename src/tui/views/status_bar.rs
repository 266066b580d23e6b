//! Status bar view
//!
//! Shows upload progress, the last refresh time, and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::UploadStatus;
use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.dashboard.state;
    let mut spans = vec![];

    match state.cache.refreshed_at() {
        Some(at) => spans.push(Span::styled(
            format!(" Updated {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::White),
        )),
        None => spans.push(Span::styled(
            " Not loaded",
            Style::default().fg(Color::Red),
        )),
    }

    match &state.upload {
        UploadStatus::Idle => {}
        UploadStatus::InProgress(file) => {
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled(
                format!("Uploading {}", file),
                Style::default().fg(Color::Yellow),
            ));
        }
        UploadStatus::Done(result) => {
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled(
                format!(
                    "Last import: {} of {} rows",
                    result.imported + result.auto_added,
                    result.total_rows
                ),
                Style::default().fg(Color::Green),
            ));
        }
        UploadStatus::Failed(_) => {
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled(
                "Last import failed",
                Style::default().fg(Color::Red),
            ));
        }
    }

    let hints = " a:Add  f:Filter  u:Import  r:Refresh  ?:Help  q:Quit ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
