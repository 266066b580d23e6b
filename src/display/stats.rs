//! Statistics display formatting
//!
//! Text renderings of the backend's aggregate endpoints, including simple
//! bar charts for the monthly totals.

use super::format::{truncate, DisplayLocale};
use crate::models::{Advisory, AdvisoryKind, CategoryTrend, MonthlyStat, Money, StatsSummary};
use crate::services::DataCache;

const BAR_WIDTH: usize = 30;

/// Overall totals plus the per-category breakdown
pub fn format_stats_summary(
    summary: &StatsSummary,
    cache: &DataCache,
    locale: &DisplayLocale,
) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Total spent: {} in {} expenses\n",
        locale.format_money(summary.total_amount),
        summary.expense_count
    ));

    if summary.category_stats.is_empty() {
        return output;
    }

    output.push_str("\nBy category:\n");
    for (id, stat) in summary.ranked() {
        let label = match &stat.name {
            Some(name) => match &stat.icon {
                Some(icon) => format!("{} {}", icon, name),
                None => name.clone(),
            },
            None => cache.category_info(id).to_string(),
        };
        output.push_str(&format!(
            "  {:24} {:>14}  ({})  {}\n",
            truncate(&label, 24),
            locale.format_money(stat.total),
            stat.count,
            percentage(stat.total, summary.total_amount)
        ));
    }
    output
}

fn percentage(part: Money, whole: Money) -> String {
    if whole.is_zero() {
        return "-".to_string();
    }
    format!("{:.1}%", part.as_f64() / whole.as_f64() * 100.0)
}

/// Monthly totals as a horizontal bar chart
pub fn format_monthly(monthly: &[MonthlyStat], locale: &DisplayLocale) -> String {
    if monthly.is_empty() {
        return "No monthly data.\n".to_string();
    }

    let max = monthly.iter().map(|m| m.total).max().unwrap_or_default();
    let mut output = String::new();
    for stat in monthly {
        output.push_str(&format!(
            "{:14} {:width$} {:>14} ({})\n",
            stat.month,
            bar(stat.total, max),
            locale.format_money(stat.total),
            stat.count,
            width = BAR_WIDTH
        ));
    }
    output
}

fn bar(value: Money, max: Money) -> String {
    if !max.is_positive() || !value.is_positive() {
        return String::new();
    }
    let len = (value.cents() as f64 / max.cents() as f64 * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.max(1))
}

/// Per-category monthly series
pub fn format_trends(trends: &[CategoryTrend], locale: &DisplayLocale) -> String {
    if trends.is_empty() {
        return "No trend data.\n".to_string();
    }

    let mut output = String::new();
    for trend in trends {
        output.push_str(&format!("{}\n", trend.category_name));
        for point in &trend.data {
            output.push_str(&format!(
                "  {:14} {:>14}\n",
                point.month,
                locale.format_money(point.total)
            ));
        }
    }
    output
}

/// Insights, predictions and limit checks are printed as the backend sent them
pub fn format_advisory(kind: AdvisoryKind, advisory: &Advisory) -> String {
    if advisory.is_empty() {
        return format!("{}: nothing to report.\n", kind.title());
    }
    let body = serde_yaml::to_string(&advisory.0).unwrap_or_else(|_| advisory.0.to_string());
    format!("{}:\n{}", kind.title(), body)
}
