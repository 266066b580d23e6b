//! Application state for the TUI
//!
//! `App` wraps the [`Dashboard`] controller with what only the terminal
//! needs: focus, cursor positions, open dialogs, the filter debouncer and
//! the toast clock.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::api::ExpenseApi;
use crate::config::Settings;
use crate::display::DisplayLocale;
use crate::models::{CategoryId, Expense, ExpenseId, FilterSpec, Money, MonthlyStat};
use crate::services::{Dashboard, Debouncer};
use crate::state::NoticeLevel;

use super::dialogs::expense::ExpenseFormState;
use super::dialogs::filter::FilterFormState;
use super::widgets::input::TextInput;
use super::widgets::notification::Toast;

/// Which panel has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    #[default]
    Expenses,
    Monthly,
    Categories,
}

impl FocusedPanel {
    pub fn next(self) -> Self {
        match self {
            Self::Expenses => Self::Monthly,
            Self::Monthly => Self::Categories,
            Self::Categories => Self::Expenses,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Expenses => Self::Categories,
            Self::Monthly => Self::Expenses,
            Self::Categories => Self::Monthly,
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddExpense,
    Filter,
    Upload,
    ConfirmDelete(ExpenseId),
    Help,
}

/// Input mode for text entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// One row of the category breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub id: CategoryId,
    /// Name used to select the category
    pub name: String,
    /// Icon and name for display
    pub label: String,
    pub color: Option<(u8, u8, u8)>,
    pub total: Money,
    pub count: usize,
}

/// Main application state
pub struct App<'a> {
    pub dashboard: Dashboard<'a, dyn ExpenseApi + 'a>,
    pub locale: DisplayLocale,

    /// Whether the application should quit
    pub should_quit: bool,

    pub focused_panel: FocusedPanel,
    pub input_mode: InputMode,
    pub active_dialog: ActiveDialog,

    /// Cursor in the expense table
    pub expense_index: usize,
    /// Highlighted bar in the monthly chart
    pub month_index: usize,
    /// Highlighted row in the category breakdown
    pub category_index: usize,

    pub filter_debounce: Debouncer<FilterSpec>,

    pub expense_form: ExpenseFormState,
    pub filter_form: FilterFormState,
    pub upload_input: TextInput,

    toast: Option<Toast>,
}

impl<'a> App<'a> {
    pub fn new(api: &'a (dyn ExpenseApi + 'a), settings: &Settings) -> Self {
        Self {
            dashboard: Dashboard::new(api, settings),
            locale: settings.locale(),
            should_quit: false,
            focused_panel: FocusedPanel::default(),
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            expense_index: 0,
            month_index: 0,
            category_index: 0,
            filter_debounce: Debouncer::new(Duration::from_millis(settings.filter_debounce_ms)),
            expense_form: ExpenseFormState::new(),
            filter_form: FilterFormState::new(),
            upload_input: TextInput::new().label("File"),
            toast: None,
        }
    }

    /// Initial data load
    pub fn start(&mut self) {
        self.dashboard.start();
        self.month_index = self.months().len().saturating_sub(1);
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Expenses shown in the table: the drill-down when something is
    /// selected, the filtered view otherwise
    pub fn visible_expenses(&self) -> &[Expense] {
        let state = &self.dashboard.state;
        if state.selection.is_idle() {
            &state.filters.view.expenses
        } else {
            state.selection.matches()
        }
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.visible_expenses().get(self.expense_index)
    }

    pub fn months(&self) -> &[MonthlyStat] {
        self.dashboard.state.cache.monthly()
    }

    /// Category breakdown rows, largest total first
    pub fn category_rows(&self) -> Vec<CategoryRow> {
        let cache = &self.dashboard.state.cache;
        cache
            .summary()
            .ranked()
            .into_iter()
            .map(|(id, stat)| {
                let info = cache.category_info(id);
                let (name, label) = if info.is_unknown() {
                    let name = stat.name.clone().unwrap_or_else(|| id.to_string());
                    let icon = stat.icon.clone().unwrap_or_else(|| info.icon.clone());
                    (name.clone(), format!("{} {}", icon, name))
                } else {
                    (info.name.clone(), info.to_string())
                };
                CategoryRow {
                    id: id.clone(),
                    name,
                    label,
                    color: info.rgb(),
                    total: stat.total,
                    count: stat.count,
                }
            })
            .collect()
    }

    pub fn next_panel(&mut self) {
        self.focused_panel = self.focused_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.focused_panel = self.focused_panel.prev();
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        match &dialog {
            ActiveDialog::AddExpense => {
                self.expense_form = ExpenseFormState::new();
                self.input_mode = InputMode::Editing;
            }
            ActiveDialog::Filter => {
                self.filter_form = FilterFormState::from_spec(
                    &self.dashboard.state.filters.spec,
                    &self.dashboard.state.cache,
                );
                self.input_mode = InputMode::Editing;
            }
            ActiveDialog::Upload => {
                self.upload_input.focused = true;
                self.input_mode = InputMode::Editing;
            }
            _ => {}
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
        self.input_mode = InputMode::Normal;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Move the cursor of the focused panel up (or left on the chart)
    pub fn move_up(&mut self) {
        match self.focused_panel {
            FocusedPanel::Expenses => self.expense_index = self.expense_index.saturating_sub(1),
            FocusedPanel::Monthly => self.month_index = self.month_index.saturating_sub(1),
            FocusedPanel::Categories => {
                self.category_index = self.category_index.saturating_sub(1)
            }
        }
    }

    /// Move the cursor of the focused panel down (or right on the chart)
    pub fn move_down(&mut self) {
        let len = match self.focused_panel {
            FocusedPanel::Expenses => self.visible_expenses().len(),
            FocusedPanel::Monthly => self.months().len(),
            FocusedPanel::Categories => self.category_rows().len(),
        };
        let index = match self.focused_panel {
            FocusedPanel::Expenses => &mut self.expense_index,
            FocusedPanel::Monthly => &mut self.month_index,
            FocusedPanel::Categories => &mut self.category_index,
        };
        if *index + 1 < len {
            *index += 1;
        }
    }

    pub fn move_to_top(&mut self) {
        self.expense_index = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.expense_index = self.visible_expenses().len().saturating_sub(1);
    }

    /// Enter on a chart: select the highlighted bar or row and show its
    /// expenses
    pub fn activate(&mut self) {
        match self.focused_panel {
            FocusedPanel::Expenses => {}
            FocusedPanel::Monthly => {
                let label = self.months().get(self.month_index).map(|m| m.month.clone());
                self.dashboard.select_month(label.as_deref());
                self.show_drill_down();
            }
            FocusedPanel::Categories => {
                let name = self
                    .category_rows()
                    .get(self.category_index)
                    .map(|row| row.name.clone());
                self.dashboard.select_category(name.as_deref());
                self.show_drill_down();
            }
        }
    }

    fn show_drill_down(&mut self) {
        if !self.dashboard.state.selection.is_idle() {
            self.focused_panel = FocusedPanel::Expenses;
            self.expense_index = 0;
        }
    }

    pub fn clear_selection(&mut self) {
        self.dashboard.clear_selection();
        self.clamp_indices();
    }

    /// Keep cursors inside their lists after the data changed
    pub fn clamp_indices(&mut self) {
        self.expense_index = self
            .expense_index
            .min(self.visible_expenses().len().saturating_sub(1));
        self.month_index = self.month_index.min(self.months().len().saturating_sub(1));
        self.category_index = self
            .category_index
            .min(self.category_rows().len().saturating_sub(1));
    }

    pub fn refresh(&mut self) {
        self.dashboard.refresh();
        self.clamp_indices();
    }

    /// Re-read the filter form; a valid spec is recorded and its run
    /// scheduled, an invalid one only shows its error
    pub fn filter_form_changed(&mut self) {
        self.filter_form.error_message = None;
        match self.filter_form.build(&self.dashboard.state.cache) {
            Ok(spec) => self.schedule_filter(spec, Instant::now()),
            Err(e) => self.filter_form.error_message = Some(e),
        }
    }

    pub fn schedule_filter(&mut self, spec: FilterSpec, now: Instant) {
        if spec == self.dashboard.state.filters.spec && !self.filter_debounce.is_pending() {
            return;
        }
        self.dashboard.set_filter(spec.clone());
        self.filter_debounce.schedule(spec, now);
    }

    /// Enter in the filter dialog: run now and close
    pub fn submit_filter(&mut self) {
        match self.filter_form.build(&self.dashboard.state.cache) {
            Ok(spec) => {
                self.filter_debounce.cancel();
                self.dashboard.filter_now(spec);
                self.expense_index = 0;
                self.close_dialog();
            }
            Err(e) => self.filter_form.error_message = Some(e),
        }
    }

    pub fn clear_filter(&mut self) {
        self.filter_debounce.cancel();
        self.dashboard.filter_now(FilterSpec::new());
        self.clamp_indices();
    }

    pub fn submit_expense(&mut self) {
        let input = match self.expense_form.build(self.dashboard.state.cache.categories()) {
            Ok(input) => input,
            Err(e) => {
                self.expense_form.set_error(e);
                return;
            }
        };
        if self.dashboard.create_expense(input).is_some() {
            self.close_dialog();
            self.clamp_indices();
        } else if let Some(notice) = &self.dashboard.state.notice {
            self.expense_form.error_message = Some(notice.message.clone());
        }
    }

    /// `d` on the expense table asks before deleting
    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_expense().map(|e| e.id.clone()) {
            self.open_dialog(ActiveDialog::ConfirmDelete(id));
        }
    }

    pub fn confirm_delete(&mut self) {
        if let ActiveDialog::ConfirmDelete(id) = std::mem::take(&mut self.active_dialog) {
            self.dashboard.delete_expense(&id);
        }
        self.close_dialog();
        self.clamp_indices();
    }

    pub fn submit_upload(&mut self) {
        let path = self.upload_input.value().trim().to_string();
        if path.is_empty() {
            return;
        }
        self.close_dialog();
        if self.dashboard.upload(Path::new(&path)).is_some() {
            self.upload_input.clear();
        }
        self.clamp_indices();
    }

    /// Periodic work: fire a due filter run and expire the toast
    pub fn tick(&mut self, now: Instant) {
        if let Some(spec) = self.filter_debounce.poll(now) {
            self.dashboard.filter_now(spec);
            self.clamp_indices();
        }
        self.sync_toast(now);
    }

    /// Start the toast clock for a new notice; dismiss it once it expired
    fn sync_toast(&mut self, now: Instant) {
        match &self.dashboard.state.notice {
            None => self.toast = None,
            Some(notice) => {
                let is_new = self.toast.as_ref().map_or(true, |t| &t.notice != notice);
                if is_new {
                    self.toast = Some(Toast::new(notice.clone(), now));
                } else if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
                    self.dashboard.dismiss_notice();
                    self.toast = None;
                }
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.dashboard.dismiss_notice();
        self.toast = None;
    }

    /// True when the current notice is an error the user should see
    pub fn has_error_notice(&self) -> bool {
        self.dashboard
            .state
            .notice
            .as_ref()
            .is_some_and(|n| n.level == NoticeLevel::Error)
    }
}
