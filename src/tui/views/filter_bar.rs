//! One-line summary of the active filter and drill-down

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::display::DisplayLocale;
use crate::models::FilterSpec;
use crate::services::DataCache;
use crate::tui::app::App;

/// Describe each set clause of a filter, e.g. `search "bus"`, `≥ ₺10,00`
pub fn describe_filter(spec: &FilterSpec, cache: &DataCache, locale: &DisplayLocale) -> Vec<String> {
    let mut parts = Vec::new();
    if let Some(needle) = spec.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        parts.push(format!("search \"{}\"", needle));
    }
    if let Some(id) = spec.category.id() {
        parts.push(format!("category {}", cache.category_info(id).name));
    }
    match (spec.min_amount, spec.max_amount) {
        (Some(min), Some(max)) => parts.push(format!(
            "{} to {}",
            locale.format_money(min),
            locale.format_money(max)
        )),
        (Some(min), None) => parts.push(format!("≥ {}", locale.format_money(min))),
        (None, Some(max)) => parts.push(format!("≤ {}", locale.format_money(max))),
        (None, None) => {}
    }
    match (spec.start_date, spec.end_date) {
        (Some(start), Some(end)) => parts.push(format!(
            "{} to {}",
            locale.format_date(start),
            locale.format_date(end)
        )),
        (Some(start), None) => parts.push(format!("from {}", locale.format_date(start))),
        (None, Some(end)) => parts.push(format!("until {}", locale.format_date(end))),
        (None, None) => {}
    }
    parts
}

/// Render the filter bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = &app.dashboard.state;
    let parts = describe_filter(&state.filters.spec, &state.cache, &app.locale);

    let mut spans = vec![Span::styled(" Filter: ", Style::default().fg(Color::White))];
    if parts.is_empty() {
        spans.push(Span::styled(
            "none (f to edit)",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(parts.join(", "), Style::default().fg(Color::Cyan)));
    }

    if state.filters.pending {
        spans.push(Span::styled(" …", Style::default().fg(Color::Yellow)));
    }
    if state.filters.last_error.is_some() {
        spans.push(Span::styled(
            " (showing previous results)",
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(selection) = state.selection.selection().describe() {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            selection,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            " (Esc to clear)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
