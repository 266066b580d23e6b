//! Toast notification widget
//!
//! Shows the dashboard's current [`Notice`] in a corner box and tracks how
//! long it has been on screen.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::state::{Notice, NoticeLevel};

/// Styling for each notice level
pub trait NoticeStyle {
    fn color(&self) -> Color;
    fn icon(&self) -> &'static str;
    fn title(&self) -> &'static str;
    /// How long a toast of this level stays up
    fn lifetime(&self) -> Duration;
}

impl NoticeStyle for NoticeLevel {
    fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Success => "+",
            Self::Warning => "!",
            Self::Error => "x",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }

    fn lifetime(&self) -> Duration {
        match self {
            Self::Info | Self::Success => Duration::from_secs(3),
            Self::Warning | Self::Error => Duration::from_secs(6),
        }
    }
}

/// A notice and the moment it appeared
#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(notice: Notice, shown_at: Instant) -> Self {
        Self { notice, shown_at }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.notice.level.lifetime()
    }
}

/// Widget for rendering a notice
pub struct NotificationWidget<'a> {
    notice: &'a Notice,
}

impl<'a> NotificationWidget<'a> {
    pub fn new(notice: &'a Notice) -> Self {
        Self { notice }
    }
}

impl Widget for NotificationWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let level = self.notice.level;
        let color = level.color();

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} {} ", level.icon(), level.title()))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        Paragraph::new(self.notice.message.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

/// Top-right corner box for a toast
pub fn toast_area(frame_area: Rect) -> Rect {
    let width = 48.min(frame_area.width);
    let height = 5.min(frame_area.height);
    Rect::new(
        frame_area.x + frame_area.width.saturating_sub(width + 1),
        frame_area.y + 1,
        width,
        height,
    )
}
