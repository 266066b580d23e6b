//! Dashboard state and its reducer
//!
//! All state the dashboard renders lives in one [`AppState`]. It changes
//! only through [`reduce`], which is pure: side effects (HTTP calls,
//! timers) happen in `services::dashboard`, which turns their outcomes into
//! [`Action`]s.

use crate::models::{FilterSpec, FilteredView, UploadResult};
use crate::services::cache::{DataCache, RefreshReport};
use crate::services::selection::SelectionModel;

/// Severity of a user-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A dismissible message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Current filter, the last view computed for it, and its last failure
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub spec: FilterSpec,
    pub view: FilteredView,
    /// True between `SetFilter` and the matching result
    pub pending: bool,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum UploadStatus {
    #[default]
    Idle,
    InProgress(String),
    Done(UploadResult),
    Failed(String),
}

impl UploadStatus {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub filters: FilterState,
    pub selection: SelectionModel,
    pub cache: DataCache,
    pub upload: UploadStatus,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(cache: DataCache) -> Self {
        Self {
            cache,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    /// The user changed the filter; a result will follow
    SetFilter(FilterSpec),
    /// A filter run finished for `spec`
    FilterApplied { spec: FilterSpec, view: FilteredView },
    /// A filter run failed for `spec`
    FilterFailed { spec: FilterSpec, message: String },
    /// A month bar was clicked
    SelectMonth(Option<String>),
    /// A category slice was clicked
    SelectCategory(Option<String>),
    ClearSelection,
    /// `DataCache::refresh_all` finished
    CacheRefreshed(RefreshReport),
    UploadStarted(String),
    UploadFinished(UploadResult),
    UploadFailed(String),
    /// A create or delete command failed
    CommandFailed(String),
    Notify(Notice),
    DismissNotice,
}

pub fn reduce(state: &mut AppState, action: Action) {
    match action {
        Action::SetFilter(spec) => {
            state.filters.spec = spec;
            state.filters.pending = true;
        }
        Action::FilterApplied { spec, view } => {
            // A result for an older spec is dropped
            if spec == state.filters.spec {
                state.filters.view = view;
                state.filters.pending = false;
                state.filters.last_error = None;
            }
        }
        Action::FilterFailed { spec, message } => {
            if spec == state.filters.spec {
                state.filters.pending = false;
                state.filters.last_error = Some(message.clone());
                state.notice = Some(Notice::error(format!("Filter failed: {}", message)));
            }
        }
        Action::SelectMonth(label) => {
            state
                .selection
                .select_month(label.as_deref(), state.cache.expenses());
        }
        Action::SelectCategory(name) => {
            state.selection.select_category(
                name.as_deref(),
                state.cache.categories(),
                state.cache.expenses(),
            );
        }
        Action::ClearSelection => state.selection.clear(),
        Action::CacheRefreshed(report) => {
            state
                .selection
                .recompute(state.cache.expenses(), state.cache.categories());
            if let Some(summary) = report.summary() {
                state.notice = Some(Notice::warning(summary));
            }
        }
        Action::UploadStarted(file) => {
            state.upload = UploadStatus::InProgress(file);
        }
        Action::UploadFinished(result) => {
            let message = if result.message.is_empty() {
                format!("Imported {} expenses", result.imported + result.auto_added)
            } else {
                result.message.clone()
            };
            state.notice = Some(if result.errors.is_empty() {
                Notice::success(message)
            } else {
                Notice::warning(format!("{} ({} row errors)", message, result.errors.len()))
            });
            state.upload = UploadStatus::Done(result);
        }
        Action::UploadFailed(message) => {
            state.notice = Some(Notice::error(format!("Upload failed: {}", message)));
            state.upload = UploadStatus::Failed(message);
        }
        Action::CommandFailed(message) => {
            state.notice = Some(Notice::error(message));
        }
        Action::Notify(notice) => state.notice = Some(notice),
        Action::DismissNotice => state.notice = None,
    }
}
