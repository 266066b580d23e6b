//! Add-expense dialog
//!
//! Modal form with tab navigation. The category field cycles through the
//! loaded categories instead of taking free text.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::cli::parse_date;
use crate::models::{Category, CategoryId, Money, NewExpense};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

/// Category used when no category list could be loaded
const FALLBACK_CATEGORY: &str = "other";

/// Which field is currently focused in the expense form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    #[default]
    Title,
    Amount,
    Category,
    Date,
    Description,
}

impl ExpenseField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::Date,
            Self::Date => Self::Description,
            Self::Description => Self::Title,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Amount => Self::Title,
            Self::Category => Self::Amount,
            Self::Date => Self::Category,
            Self::Description => Self::Date,
        }
    }
}

/// State for the add-expense form
#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    pub focused_field: ExpenseField,
    pub title_input: TextInput,
    pub amount_input: TextInput,
    /// Index into the loaded category list
    pub category_index: usize,
    pub date_input: TextInput,
    pub description_input: TextInput,
    pub error_message: Option<String>,
}

impl Default for ExpenseFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseFormState {
    /// Empty form dated today
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        let mut state = Self {
            focused_field: ExpenseField::Title,
            title_input: TextInput::new().label("Title").placeholder("What was it?"),
            amount_input: TextInput::new().label("Amount").placeholder("e.g. 50 or 1.234,56"),
            category_index: 0,
            date_input: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD")
                .content(today.format("%Y-%m-%d").to_string()),
            description_input: TextInput::new()
                .label("Description")
                .placeholder("Optional note"),
            error_message: None,
        };
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
        self.title_input.focused = self.focused_field == ExpenseField::Title;
        self.amount_input.focused = self.focused_field == ExpenseField::Amount;
        self.date_input.focused = self.focused_field == ExpenseField::Date;
        self.description_input.focused = self.focused_field == ExpenseField::Description;
    }

    /// The focused text input; the category field has none
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            ExpenseField::Title => Some(&mut self.title_input),
            ExpenseField::Amount => Some(&mut self.amount_input),
            ExpenseField::Category => None,
            ExpenseField::Date => Some(&mut self.date_input),
            ExpenseField::Description => Some(&mut self.description_input),
        }
    }

    /// Step through the category list, wrapping at both ends
    pub fn cycle_category(&mut self, forward: bool, count: usize) {
        if count == 0 {
            return;
        }
        let current = self.category_index.min(count - 1);
        self.category_index = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
    }

    pub fn selected_category<'c>(&self, categories: &'c [Category]) -> Option<&'c Category> {
        categories.get(self.category_index)
    }

    /// Build the submission, or a message for the first invalid field
    pub fn build(&self, categories: &[Category]) -> Result<NewExpense, String> {
        let amount = Money::parse(self.amount_input.value().trim())
            .map_err(|_| "Invalid amount. Use a format like 50 or 1.234,56".to_string())?;

        let date = if self.date_input.value().trim().is_empty() {
            Local::now().date_naive()
        } else {
            parse_date(self.date_input.value()).map_err(|e| e.to_string())?
        };

        let category = self
            .selected_category(categories)
            .map(|c| c.id.clone())
            .unwrap_or_else(|| CategoryId::new(FALLBACK_CATEGORY));

        let description = Some(self.description_input.value().to_string());

        let input = NewExpense {
            title: self.title_input.value().to_string(),
            amount,
            category,
            description,
            date,
        }
        .normalized();
        input.validate().map_err(|e| e.to_string())?;
        Ok(input)
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the add-expense dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(64, 12, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Add Expense ")
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
            Constraint::Length(1), // Title
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Category
            Constraint::Length(1), // Date
            Constraint::Length(1), // Description
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.expense_form;
    frame.render_widget(&form.title_input, chunks[0]);
    frame.render_widget(&form.amount_input, chunks[1]);
    render_category_field(frame, app, chunks[2]);
    frame.render_widget(&form.date_input, chunks[3]);
    frame.render_widget(&form.description_input, chunks[4]);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[6],
        );
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Next  "),
        Span::styled("[Shift+Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Prev  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[7]);
}

fn render_category_field(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.expense_form;
    let focused = form.focused_field == ExpenseField::Category;
    let categories = app.dashboard.state.cache.categories();

    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let value = match form.selected_category(categories) {
        Some(category) => category.to_string(),
        None => format!("{} (categories not loaded)", FALLBACK_CATEGORY),
    };
    let value_style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let mut spans = vec![Span::styled(format!("{:>12}: ", "Category"), label_style)];
    if focused {
        spans.push(Span::styled("◀ ", Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(value, value_style));
        spans.push(Span::styled(" ▶", Style::default().fg(Color::Cyan)));
    } else {
        spans.push(Span::styled(value, value_style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Handle key input for the expense dialog
pub fn handle_key(app: &mut App, key: KeyEvent) {
    let category_count = app.dashboard.state.cache.categories().len();
    let form = &mut app.expense_form;

    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => form.prev_field(),
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Enter => app.submit_expense(),
        KeyCode::Left | KeyCode::Right if form.focused_field == ExpenseField::Category => {
            form.cycle_category(key.code == KeyCode::Right, category_count);
        }
        code => {
            form.clear_error();
            if let Some(input) = form.focused_input() {
                edit_input(input, code);
            }
        }
    }
}

/// Apply an editing key to a text input. Returns true if the content changed.
pub fn edit_input(input: &mut TextInput, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) => {
            input.insert(c);
            true
        }
        KeyCode::Backspace => {
            let before = input.value().len();
            input.backspace();
            before != input.value().len()
        }
        KeyCode::Delete => {
            let before = input.value().len();
            input.delete();
            before != input.value().len()
        }
        KeyCode::Left => {
            input.move_left();
            false
        }
        KeyCode::Right => {
            input.move_right();
            false
        }
        KeyCode::Home => {
            input.move_start();
            false
        }
        KeyCode::End => {
            input.move_end();
            false
        }
        _ => false,
    }
}
