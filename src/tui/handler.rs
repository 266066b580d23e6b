//! Event handler for the TUI
//!
//! Routes keyboard events to the open dialog or to the focused panel.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, App, FocusedPanel};
use super::dialogs;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => app.tick(Instant::now()),
        Event::Resize(_, _) => {}
    }
    Ok(())
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
    } else {
        handle_normal_key(app, key);
    }
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),
        KeyCode::Tab => app.next_panel(),
        KeyCode::BackTab => app.prev_panel(),

        KeyCode::Char('f') | KeyCode::Char('/') => app.open_dialog(ActiveDialog::Filter),
        KeyCode::Char('x') => app.clear_filter(),
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_dialog(ActiveDialog::AddExpense),
        KeyCode::Char('u') => app.open_dialog(ActiveDialog::Upload),
        KeyCode::Char('r') => app.refresh(),

        KeyCode::Esc => {
            if app.dashboard.state.notice.is_some() {
                app.dismiss_notice();
            } else {
                app.clear_selection();
            }
        }
        KeyCode::Enter => app.activate(),

        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('h') | KeyCode::Left if app.focused_panel == FocusedPanel::Monthly => {
            app.move_up()
        }
        KeyCode::Char('l') | KeyCode::Right if app.focused_panel == FocusedPanel::Monthly => {
            app.move_down()
        }

        _ if app.focused_panel == FocusedPanel::Expenses => handle_expense_key(app, key),
        _ => {}
    }
}

/// Keys that only apply to the expense table
fn handle_expense_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('g') | KeyCode::Home => app.move_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.move_to_bottom(),
        _ => {}
    }
}

/// Handle keys when a dialog is active
fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog {
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::ConfirmDelete(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
        ActiveDialog::AddExpense => dialogs::expense::handle_key(app, key),
        ActiveDialog::Filter => dialogs::filter::handle_key(app, key),
        ActiveDialog::Upload => dialogs::upload::handle_key(app, key),
        ActiveDialog::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::config::Settings;
    use std::time::Duration;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn started(api: &MockApi) -> App<'_> {
        let mut app = App::new(api, &Settings::default());
        app.start();
        api.clear_calls();
        app
    }

    #[test]
    fn test_quit_keys() {
        let api = MockApi::coffee_and_bus();
        let mut app = started(&api);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = started(&api);
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_in_dialog_does_not_trigger_shortcuts() {
        let api = MockApi::coffee_and_bus();
        let mut app = started(&api);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.active_dialog, ActiveDialog::AddExpense);

        type_text(&mut app, "quick");
        assert!(!app.should_quit);
        assert_eq!(app.expense_form.title_input.value(), "quick");
    }

    #[test]
    fn test_add_expense_through_form() {
        let api = MockApi::coffee_and_bus();
        let mut app = started(&api);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Simit");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "12,50");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert!(!app.has_dialog());
        assert_eq!(api.call_count("create_expense"), 1);
        let created = &api.expenses.borrow()[0];
        assert_eq!(created.title, "Simit");
        assert_eq!(created.category.as_str(), "transport");
        assert_eq!(app.visible_expenses().len(), 3);
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let api = MockApi::coffee_and_bus();
        let mut app = started(&api);
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Simit");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.active_dialog, ActiveDialog::AddExpense);
        assert!(app.expense_form.error_message.is_some());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_filter_dialog_debounces_typing() {
        let api = MockApi::coffee_and_bus();
        let mut app = started(&api);
        press(&mut app, KeyCode::Char('f'));
        type_text(&mut app, "bus");

        // Nothing ran yet; the last keystroke is pending
        assert!(app.filter_debounce.is_pending());
        assert_eq!(app.visible_expenses().len(), 2);

        app.tick(Instant::now() + Duration::from_secs(1));
        assert_eq!(app.visible_expenses().len(), 1);
        assert_eq!(app.dashboard.state.filters.spec.search.as_deref(), Some("bus"));
        assert_eq!(app.active_dialog, ActiveDialog::Filter);
    }

    #[test]
    fn test_filter_enter_applies_immediately() {
        let api = MockApi::coffee_and_bus();
        let mut app = started(&api);
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "food");
        press(&mut app, KeyCode::Enter);

        assert!(!app.has_dialog());
        assert!(!app.filter_debounce.is_pending());
        assert_eq!(app.visible_expenses().len(), 1);
        assert_eq!(api.call_count("search_expenses"), 1);
    }

    #[test]
    fn test_invalid_filter_field_is_not_scheduled() {
        let api = MockApi::coffee_and_bus();
        let mut app = started(&api);
        press(&mut app, KeyCode::Char('f'));
        for _ in 0..2 {
            press(&mut app, KeyCode::Tab);
        }
        type_text(&mut app, "abc");

        assert!(app.filter_form.error_message.is_some());
        assert!(!app.filter_debounce.is_pending());
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let api = MockApi::coffee_and_bus();
        let mut app = started(&api);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert!(!app.has_dialog());
        assert!(api.calls().is_empty());

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(api.call_count("delete_expense"), 1);
        assert_eq!(app.visible_expenses().len(), 1);
    }

    #[test]
    fn test_chart_enter_and_escape() {
        let api = MockApi::coffee_and_bus();
        let mut app = started(&api);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_panel, FocusedPanel::Categories);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.visible_expenses().len(), 1);
        assert_eq!(app.focused_panel, FocusedPanel::Expenses);

        press(&mut app, KeyCode::Esc);
        assert!(app.dashboard.state.selection.is_idle());
        assert_eq!(app.visible_expenses().len(), 2);
    }

    #[test]
    fn test_delete_key_ignored_on_charts() {
        let api = MockApi::coffee_and_bus();
        let mut app = started(&api);
        app.focused_panel = FocusedPanel::Monthly;
        press(&mut app, KeyCode::Char('d'));
        assert!(!app.has_dialog());
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let api = MockApi::coffee_and_bus();
        let mut app = started(&api);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.active_dialog, ActiveDialog::Help);
        press(&mut app, KeyCode::Char('z'));
        assert!(!app.has_dialog());
    }
}
