//! TUI Views module
//!
//! The dashboard panels: header, filter bar, expense table, the two
//! charts and the status bar.

pub mod charts;
pub mod expenses;
pub mod filter_bar;
pub mod header;
pub mod status_bar;

use ratatui::style::{Color, Style};
use ratatui::Frame;

use super::app::{ActiveDialog, App, FocusedPanel};
use super::dialogs;
use super::layout::AppLayout;
use super::widgets::notification::{toast_area, NotificationWidget};

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    header::render(frame, app, layout.header);
    filter_bar::render(frame, app, layout.filter_bar);
    expenses::render(frame, app, layout.expenses);
    charts::render_monthly(frame, app, layout.monthly);
    charts::render_categories(frame, app, layout.categories);
    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }

    if let Some(notice) = &app.dashboard.state.notice {
        frame.render_widget(NotificationWidget::new(notice), toast_area(frame.area()));
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &App) {
    match &app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::AddExpense => dialogs::expense::render(frame, app),
        ActiveDialog::Filter => dialogs::filter::render(frame, app),
        ActiveDialog::Upload => dialogs::upload::render(frame, app),
        ActiveDialog::ConfirmDelete(id) => {
            dialogs::confirm::render(frame, &dialogs::confirm::delete_message(app, id))
        }
        ActiveDialog::None => {}
    }
}

/// Border color for a panel depending on focus
pub(crate) fn border_style(app: &App, panel: FocusedPanel) -> Style {
    if app.focused_panel == panel {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
