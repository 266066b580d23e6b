//! Dashboard controller
//!
//! Performs the side effects behind each user intent and feeds their
//! outcomes into the [`AppState`] reducer. The TUI and the `drill` command
//! both drive the dashboard through this type.

use std::path::Path;

use tracing::{info, warn};

use crate::api::ExpenseApi;
use crate::config::Settings;
use crate::models::{Expense, ExpenseId, FilterSpec, NewExpense, UploadResult};
use crate::services::cache::{DataCache, RefreshReport};
use crate::services::expense::ExpenseService;
use crate::services::filter::{FilterEngine, FilterService};
use crate::services::upload::UploadService;
use crate::state::{reduce, Action, AppState, Notice};

pub struct Dashboard<'a, A: ExpenseApi + ?Sized> {
    api: &'a A,
    engine: FilterEngine,
    remote_filtering: bool,
    pub state: AppState,
}

impl<'a, A: ExpenseApi + ?Sized> Dashboard<'a, A> {
    pub fn new(api: &'a A, settings: &Settings) -> Self {
        Self {
            api,
            engine: FilterEngine::new(settings.average_divisor),
            remote_filtering: settings.remote_filtering,
            state: AppState::new(DataCache::new()),
        }
    }

    /// Replace the filter engine (tests pin "today" with this)
    pub fn with_engine(mut self, engine: FilterEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn dispatch(&mut self, action: Action) {
        reduce(&mut self.state, action);
    }

    /// Initial load: categories, every data slice, then the current filter
    pub fn start(&mut self) {
        if let Err(e) = self.state.cache.load_categories(self.api) {
            warn!(error = %e, "could not load categories");
            self.dispatch(Action::Notify(Notice::warning(format!(
                "Categories unavailable: {}",
                e
            ))));
        }
        self.refresh();
    }

    /// Re-fetch everything and re-derive the filtered view and selection
    pub fn refresh(&mut self) -> RefreshReport {
        if !self.state.cache.categories_loaded() {
            if let Err(e) = self.state.cache.load_categories(self.api) {
                warn!(error = %e, "could not load categories");
            }
        }
        let report = self.state.cache.refresh_all(self.api);
        self.dispatch(Action::CacheRefreshed(report.clone()));
        self.apply_filter();
        report
    }

    /// Record a new filter without running it (the caller debounces)
    pub fn set_filter(&mut self, spec: FilterSpec) {
        self.dispatch(Action::SetFilter(spec));
    }

    /// Record a new filter and run it immediately
    pub fn filter_now(&mut self, spec: FilterSpec) {
        self.set_filter(spec);
        self.apply_filter();
    }

    /// Run the current filter spec
    pub fn apply_filter(&mut self) {
        let spec = self.state.filters.spec.clone();
        let service = FilterService::new(self.api, self.engine).remote(self.remote_filtering);
        match service.run(&spec, self.state.cache.expenses()) {
            Ok(view) => self.dispatch(Action::FilterApplied { spec, view }),
            Err(e) => {
                warn!(error = %e, "filter failed, keeping previous results");
                self.dispatch(Action::FilterFailed {
                    spec,
                    message: e.to_string(),
                });
            }
        }
    }

    pub fn select_month(&mut self, label: Option<&str>) {
        self.dispatch(Action::SelectMonth(label.map(str::to_string)));
    }

    pub fn select_category(&mut self, name: Option<&str>) {
        self.dispatch(Action::SelectCategory(name.map(str::to_string)));
    }

    pub fn clear_selection(&mut self) {
        self.dispatch(Action::ClearSelection);
    }

    pub fn dismiss_notice(&mut self) {
        self.dispatch(Action::DismissNotice);
    }

    /// Submit a new expense and refresh on success
    pub fn create_expense(&mut self, input: NewExpense) -> Option<Expense> {
        let service = ExpenseService::new(self.api);
        match service.create(input, self.state.cache.categories()) {
            Ok(expense) => {
                let report = self.refresh();
                self.notify_done(Notice::success(format!("Added '{}'", expense.title)), &report);
                Some(expense)
            }
            Err(e) => {
                self.dispatch(Action::CommandFailed(format!("Could not add expense: {}", e)));
                None
            }
        }
    }

    /// Delete an expense and refresh on success
    pub fn delete_expense(&mut self, id: &ExpenseId) -> bool {
        let service = ExpenseService::new(self.api);
        match service.delete(id) {
            Ok(()) => {
                let report = self.refresh();
                self.notify_done(Notice::success("Expense deleted"), &report);
                true
            }
            Err(e) => {
                self.dispatch(Action::CommandFailed(format!("Could not delete expense: {}", e)));
                false
            }
        }
    }

    /// Import a file; refresh when the import changed anything
    pub fn upload(&mut self, path: &Path) -> Option<UploadResult> {
        self.dispatch(Action::UploadStarted(path.display().to_string()));
        match UploadService::new(self.api).upload(path) {
            Ok(result) => {
                let report = if result.changed_data() {
                    info!("upload changed data, refreshing");
                    Some(self.refresh())
                } else {
                    None
                };
                self.dispatch(Action::UploadFinished(result.clone()));
                if let (Some(report), Some(notice)) = (report, self.state.notice.clone()) {
                    self.notify_done(notice, &report);
                }
                Some(result)
            }
            Err(e) => {
                self.dispatch(Action::UploadFailed(e.to_string()));
                None
            }
        }
    }

    /// Show the outcome of a command, naming any slices its refresh left stale
    fn notify_done(&mut self, notice: Notice, report: &RefreshReport) {
        let notice = match report.summary() {
            Some(stale) => Notice::warning(format!("{}. {}", notice.message, stale)),
            None => notice,
        };
        self.dispatch(Action::Notify(notice));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{date, MockApi};
    use crate::models::{Money, UploadResult};
    use crate::state::{NoticeLevel, UploadStatus};
    use tempfile::TempDir;

    fn dashboard(api: &MockApi) -> Dashboard<'_, MockApi> {
        let mut dashboard = Dashboard::new(api, &Settings::default())
            .with_engine(FilterEngine::default().with_today(date(2024, 1, 31)));
        dashboard.start();
        api.clear_calls();
        dashboard
    }

    #[test]
    fn test_start_loads_everything() {
        let api = MockApi::coffee_and_bus();
        let dashboard = dashboard(&api);
        assert_eq!(dashboard.state.cache.categories().len(), 8);
        assert_eq!(dashboard.state.filters.view.expenses.len(), 2);
        assert!(dashboard.state.notice.is_none());
    }

    #[test]
    fn test_filter_failure_keeps_stale_view() {
        let api = MockApi::coffee_and_bus();
        let mut dashboard = dashboard(&api);
        api.fail("search_expenses");

        dashboard.filter_now(FilterSpec::new().category("food"));
        assert_eq!(dashboard.state.filters.view.expenses.len(), 2);
        assert!(dashboard.state.filters.last_error.is_some());
    }

    #[test]
    fn test_upload_with_imports_refreshes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bank.csv");
        std::fs::write(&path, "title,amount\n").unwrap();

        let api = MockApi::coffee_and_bus().with_upload_result(UploadResult {
            imported: 1,
            ..Default::default()
        });
        let mut dashboard = dashboard(&api);
        dashboard.upload(&path).unwrap();

        assert_eq!(api.call_count("upload/csv"), 1);
        assert_eq!(api.call_count("expenses"), 1);
        assert!(matches!(dashboard.state.upload, UploadStatus::Done(_)));
    }

    #[test]
    fn test_upload_without_imports_does_not_refresh() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let api = MockApi::coffee_and_bus();
        let mut dashboard = dashboard(&api);
        dashboard.upload(&path).unwrap();
        assert_eq!(api.calls(), vec!["upload/pdf"]);
    }

    #[test]
    fn test_unsupported_upload_is_a_notice() {
        let api = MockApi::coffee_and_bus();
        let mut dashboard = dashboard(&api);
        assert!(dashboard.upload(Path::new("receipts.docx")).is_none());

        assert!(api.calls().is_empty());
        let notice = dashboard.state.notice.clone().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("Unsupported file format"));
    }

    #[test]
    fn test_create_and_delete_refresh() {
        let api = MockApi::coffee_and_bus();
        let mut dashboard = dashboard(&api);

        let expense = dashboard
            .create_expense(NewExpense {
                title: "Lunch".into(),
                amount: Money::from_units(80),
                category: "food".into(),
                description: None,
                date: date(2024, 1, 20),
            })
            .unwrap();
        assert_eq!(dashboard.state.cache.expenses().len(), 3);
        assert_eq!(dashboard.state.filters.view.expenses.len(), 3);

        assert!(dashboard.delete_expense(&expense.id));
        assert_eq!(dashboard.state.cache.expenses().len(), 2);
    }

    #[test]
    fn test_create_keeps_stale_slices_in_notice() {
        let api = MockApi::coffee_and_bus();
        let mut dashboard = dashboard(&api);
        api.fail("stats_trends");

        dashboard
            .create_expense(NewExpense {
                title: "Lunch".into(),
                amount: Money::from_units(80),
                category: "food".into(),
                description: None,
                date: date(2024, 1, 20),
            })
            .unwrap();

        let notice = dashboard.state.notice.clone().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("Added 'Lunch'"));
        assert!(notice.message.contains("trends"));
    }

    #[test]
    fn test_delete_with_complete_refresh_is_success() {
        let api = MockApi::coffee_and_bus();
        let mut dashboard = dashboard(&api);
        assert!(dashboard.delete_expense(&"2".into()));

        let notice = dashboard.state.notice.clone().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Expense deleted");
    }

    #[test]
    fn test_delete_missing_expense_notifies() {
        let api = MockApi::coffee_and_bus();
        let mut dashboard = dashboard(&api);
        assert!(!dashboard.delete_expense(&"404".into()));
        assert_eq!(api.call_count("expenses"), 0);
        assert!(dashboard
            .state
            .notice
            .as_ref()
            .unwrap()
            .message
            .contains("not found"));
    }

    #[test]
    fn test_refresh_recomputes_selection() {
        let api = MockApi::coffee_and_bus();
        let mut dashboard = dashboard(&api);
        dashboard.select_category(Some("Yiyecek & İçecek"));
        assert_eq!(dashboard.state.selection.matches().len(), 1);

        api.expenses.borrow_mut().push(crate::models::Expense::new(
            "9",
            "Tea",
            Money::from_units(5),
            "food",
            date(2024, 1, 2),
        ));
        dashboard.refresh();
        assert_eq!(dashboard.state.selection.matches().len(), 2);
    }
}
