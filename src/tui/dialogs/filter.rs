//! Filter dialog
//!
//! Edits the filter spec field by field. Every valid edit is scheduled
//! through the debouncer, so the table follows the typing; Enter applies
//! at once.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::cli::{parse_amount, parse_date, resolve_category};
use crate::models::FilterSpec;
use crate::services::DataCache;
use crate::tui::app::App;
use crate::tui::dialogs::expense::edit_input;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Search,
    Category,
    MinAmount,
    MaxAmount,
    From,
    To,
}

impl FilterField {
    pub fn next(self) -> Self {
        match self {
            Self::Search => Self::Category,
            Self::Category => Self::MinAmount,
            Self::MinAmount => Self::MaxAmount,
            Self::MaxAmount => Self::From,
            Self::From => Self::To,
            Self::To => Self::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Search => Self::To,
            Self::Category => Self::Search,
            Self::MinAmount => Self::Category,
            Self::MaxAmount => Self::MinAmount,
            Self::From => Self::MaxAmount,
            Self::To => Self::From,
        }
    }
}

/// State for the filter form
#[derive(Debug, Clone)]
pub struct FilterFormState {
    pub focused_field: FilterField,
    pub search_input: TextInput,
    pub category_input: TextInput,
    pub min_input: TextInput,
    pub max_input: TextInput,
    pub from_input: TextInput,
    pub to_input: TextInput,
    pub error_message: Option<String>,
}

impl Default for FilterFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterFormState {
    pub fn new() -> Self {
        let mut state = Self {
            focused_field: FilterField::Search,
            search_input: TextInput::new().label("Search").placeholder("title or description"),
            category_input: TextInput::new().label("Category").placeholder("all"),
            min_input: TextInput::new().label("Min amount").placeholder("any"),
            max_input: TextInput::new().label("Max amount").placeholder("any"),
            from_input: TextInput::new().label("From").placeholder("YYYY-MM-DD"),
            to_input: TextInput::new().label("To").placeholder("YYYY-MM-DD"),
            error_message: None,
        };
        state.update_focus();
        state
    }

    /// Pre-fill the form from the active filter
    pub fn from_spec(spec: &FilterSpec, cache: &DataCache) -> Self {
        let mut state = Self::new();
        if let Some(search) = &spec.search {
            state.search_input = state.search_input.content(search.as_str());
        }
        if let Some(id) = spec.category.id() {
            let info = cache.category_info(id);
            let shown = if info.is_unknown() {
                id.to_string()
            } else {
                info.name.clone()
            };
            state.category_input = state.category_input.content(shown);
        }
        if let Some(min) = spec.min_amount {
            state.min_input = state.min_input.content(min.to_string());
        }
        if let Some(max) = spec.max_amount {
            state.max_input = state.max_input.content(max.to_string());
        }
        if let Some(from) = spec.start_date {
            state.from_input = state.from_input.content(from.format("%Y-%m-%d").to_string());
        }
        if let Some(to) = spec.end_date {
            state.to_input = state.to_input.content(to.format("%Y-%m-%d").to_string());
        }
        state.update_focus();
        state
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.update_focus();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.update_focus();
    }

    fn update_focus(&mut self) {
        let focused = self.focused_field;
        self.search_input.focused = focused == FilterField::Search;
        self.category_input.focused = focused == FilterField::Category;
        self.min_input.focused = focused == FilterField::MinAmount;
        self.max_input.focused = focused == FilterField::MaxAmount;
        self.from_input.focused = focused == FilterField::From;
        self.to_input.focused = focused == FilterField::To;
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            FilterField::Search => &mut self.search_input,
            FilterField::Category => &mut self.category_input,
            FilterField::MinAmount => &mut self.min_input,
            FilterField::MaxAmount => &mut self.max_input,
            FilterField::From => &mut self.from_input,
            FilterField::To => &mut self.to_input,
        }
    }

    /// Build a spec from the form. Blank fields are left unset.
    pub fn build(&self, cache: &DataCache) -> Result<FilterSpec, String> {
        let mut spec = FilterSpec::new();

        let search = self.search_input.value().trim();
        if !search.is_empty() {
            spec = spec.search(search);
        }

        let category = self.category_input.value().trim();
        if !category.is_empty() && !category.eq_ignore_ascii_case("all") {
            spec = spec.category(resolve_category(cache, category).map_err(|e| e.to_string())?);
        }

        if let Some(min) = non_blank(&self.min_input) {
            spec = spec.min_amount(parse_amount(min).map_err(|e| e.to_string())?);
        }
        if let Some(max) = non_blank(&self.max_input) {
            spec = spec.max_amount(parse_amount(max).map_err(|e| e.to_string())?);
        }
        if let Some(from) = non_blank(&self.from_input) {
            spec = spec.start_date(parse_date(from).map_err(|e| e.to_string())?);
        }
        if let Some(to) = non_blank(&self.to_input) {
            spec = spec.end_date(parse_date(to).map_err(|e| e.to_string())?);
        }

        Ok(spec)
    }
}

fn non_blank(input: &TextInput) -> Option<&str> {
    Some(input.value().trim()).filter(|s| !s.is_empty())
}

/// Render the filter dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(64, 13, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Filter Expenses ")
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
            Constraint::Length(1), // Search
            Constraint::Length(1), // Category
            Constraint::Length(1), // Min
            Constraint::Length(1), // Max
            Constraint::Length(1), // From
            Constraint::Length(1), // To
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.filter_form;
    frame.render_widget(&form.search_input, chunks[0]);
    frame.render_widget(&form.category_input, chunks[1]);
    frame.render_widget(&form.min_input, chunks[2]);
    frame.render_widget(&form.max_input, chunks[3]);
    frame.render_widget(&form.from_input, chunks[4]);
    frame.render_widget(&form.to_input, chunks[5]);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[7],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Apply  "),
        Span::styled("[Ctrl+U]", Style::default().fg(Color::Yellow)),
        Span::raw(" Clear field  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Close"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[8]);
}

/// Handle key input for the filter dialog
pub fn handle_key(app: &mut App, key: KeyEvent) {
    let form = &mut app.filter_form;
    let changed = match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            return;
        }
        KeyCode::Enter => {
            app.submit_filter();
            return;
        }
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            form.prev_field();
            false
        }
        KeyCode::Tab | KeyCode::Down => {
            form.next_field();
            false
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.prev_field();
            false
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.focused_input().clear();
            true
        }
        code => edit_input(form.focused_input(), code),
    };

    if changed {
        app.filter_form_changed();
    }
}
