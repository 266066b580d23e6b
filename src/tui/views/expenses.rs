//! Expense table
//!
//! Shows the filtered view, or the drill-down matches while a chart
//! selection is active.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::format::truncate;
use crate::tui::app::{App, FocusedPanel};

use super::border_style;

/// Render the expense table
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.dashboard.state;
    let expenses = app.visible_expenses();

    let title = match state.selection.selection().describe() {
        Some(selection) => format!(" Expenses - {} ({}) ", selection, expenses.len()),
        None => format!(" Expenses ({}) ", expenses.len()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(app, FocusedPanel::Expenses));

    if expenses.is_empty() {
        let hint = if state.selection.is_idle() {
            "No expenses. Press 'a' to add one or 'u' to import a file."
        } else {
            "Nothing matches this selection. Press Esc to go back."
        };
        frame.render_widget(
            Paragraph::new(hint)
                .block(block)
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let widths = [
        Constraint::Length(10), // Date
        Constraint::Min(16),    // Title
        Constraint::Length(18), // Category
        Constraint::Length(12), // Amount
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Date").style(bold),
        Cell::from("Title").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("Amount").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = expenses
        .iter()
        .map(|expense| {
            let category = state.cache.category_info(&expense.category);
            let category_style = match category.rgb() {
                Some((r, g, b)) => Style::default().fg(Color::Rgb(r, g, b)),
                None => Style::default(),
            };
            Row::new(vec![
                Cell::from(app.locale.format_date(expense.date)),
                Cell::from(truncate(&expense.title, 40)),
                Cell::from(truncate(&category.to_string(), 18)).style(category_style),
                Cell::from(format!("{:>12}", app.locale.format_money(expense.amount))),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default();
    if app.focused_panel == FocusedPanel::Expenses {
        table_state.select(Some(app.expense_index.min(expenses.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}
