//! Monthly bar chart and category breakdown
//!
//! Both act as clickable charts: the highlighted bar or row is what Enter
//! selects.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::display::format::truncate;
use crate::models::{Money, MonthLabel};
use crate::tui::app::{App, FocusedPanel};

use super::border_style;

const BAR_WIDTH: u16 = 6;
const BAR_GAP: u16 = 1;

/// Short axis label: "01/24" for "Ocak 2024"
pub fn short_month(label: &str) -> String {
    match MonthLabel::parse(label) {
        Some(month) => format!("{:02}/{:02}", month.month, month.year.rem_euclid(100)),
        None => truncate(label, BAR_WIDTH as usize),
    }
}

/// First bar to draw so that `selected` stays visible in `capacity` bars
pub fn window_start(selected: usize, len: usize, capacity: usize) -> usize {
    if capacity == 0 || len <= capacity {
        return 0;
    }
    selected
        .saturating_sub(capacity - 1)
        .min(len - capacity)
}

/// Render the monthly totals as a bar chart
pub fn render_monthly(frame: &mut Frame, app: &App, area: Rect) {
    let months = app.months();
    let focused = app.focused_panel == FocusedPanel::Monthly;

    let title = match months.get(app.month_index) {
        Some(m) if focused => format!(
            " Monthly - {}: {} ",
            m.month,
            app.locale.format_money(m.total)
        ),
        _ => " Monthly ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(app, FocusedPanel::Monthly));

    if months.is_empty() {
        frame.render_widget(
            Paragraph::new("No monthly data")
                .block(block)
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let capacity = (area.width.saturating_sub(2) / (BAR_WIDTH + BAR_GAP)) as usize;
    let start = window_start(app.month_index, months.len(), capacity);

    let bars: Vec<Bar> = months
        .iter()
        .enumerate()
        .skip(start)
        .take(capacity.max(1))
        .map(|(i, m)| {
            let style = if focused && i == app.month_index {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Cyan)
            };
            Bar::default()
                .value(m.total.units().max(0) as u64)
                .text_value(compact(m.total))
                .label(Line::from(short_month(&m.month)))
                .style(style)
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Bar caption that fits in a narrow bar: 950, 1.2k, 34k
fn compact(amount: Money) -> String {
    let units = amount.units();
    if units >= 10_000 {
        format!("{}k", units / 1000)
    } else if units >= 1000 {
        format!("{:.1}k", units as f64 / 1000.0)
    } else {
        units.to_string()
    }
}

/// Render the per-category totals as horizontal bars
pub fn render_categories(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.category_rows();
    let block = Block::default()
        .title(" Categories ")
        .borders(Borders::ALL)
        .border_style(border_style(app, FocusedPanel::Categories));

    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new("No category data")
                .block(block)
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let grand_total: i64 = rows.iter().map(|r| r.total.cents()).sum();
    let bar_room = area.width.saturating_sub(40) as usize;

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let share = if grand_total > 0 {
                row.total.cents() as f64 / grand_total as f64
            } else {
                0.0
            };
            let color = row
                .color
                .map(|(r, g, b)| Color::Rgb(r, g, b))
                .unwrap_or(Color::Gray);
            let bar = "█".repeat((share * bar_room as f64).round() as usize);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<18} ", truncate(&row.label, 18))),
                Span::styled(
                    format!("{:>12} ", app.locale.format_money(row.total)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("{:>5.1}% ", share * 100.0),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(bar, Style::default().fg(color)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if app.focused_panel == FocusedPanel::Categories {
        state.select(Some(app.category_index.min(rows.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
