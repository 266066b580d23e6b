//! Statistics payloads
//!
//! These are computed by the backend and only rendered by the client.
//! Insights, predictions and limit checks have no fixed shape on our side and
//! are kept as raw JSON in an [`Advisory`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::CategoryId;
use super::money::Money;

/// `GET /expenses/stats/summary`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsSummary {
    #[serde(default)]
    pub total_amount: Money,
    #[serde(default)]
    pub expense_count: usize,
    #[serde(default)]
    pub category_stats: BTreeMap<CategoryId, CategoryStat>,
}

impl StatsSummary {
    /// Category stats ordered by total, largest first
    pub fn ranked(&self) -> Vec<(&CategoryId, &CategoryStat)> {
        let mut ranked: Vec<_> = self.category_stats.iter().collect();
        ranked.sort_by(|a, b| b.1.total.cmp(&a.1.total));
        ranked
    }
}

/// Per-category aggregate inside the stats summary
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryStat {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub total: Money,
}

/// One entry of `GET /expenses/stats/monthly`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStat {
    /// Display label, e.g. "Ocak 2024"
    pub month: String,
    #[serde(default)]
    pub total: Money,
    #[serde(default)]
    pub count: usize,
}

/// One category line of `GET /expenses/stats/trends`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrend {
    pub category_id: CategoryId,
    #[serde(default, alias = "name")]
    pub category_name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub data: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    #[serde(default, alias = "amount")]
    pub total: Money,
}

/// Insights, predictions, and limit checks, rendered as-is
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Advisory(pub serde_json::Value);

impl Advisory {
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            serde_json::Value::Null => true,
            serde_json::Value::Array(items) => items.is_empty(),
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}

/// Which advisory endpoint a payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryKind {
    Insights,
    Predictions,
    Limits,
}

impl AdvisoryKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Insights => "Insights",
            Self::Predictions => "Predictions",
            Self::Limits => "Limit warnings",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_payload() {
        let json = r##"{
            "total_amount": 70.0,
            "expense_count": 2,
            "category_stats": {
                "food": {"name": "Yiyecek & İçecek", "icon": "🍽️", "color": "#FF6B6B", "count": 1, "total": 50.0},
                "mystery": {"count": 1, "total": 20.0}
            }
        }"##;
        let summary: StatsSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_amount, Money::from_units(70));
        assert_eq!(summary.category_stats.len(), 2);
        assert!(summary.category_stats[&CategoryId::new("mystery")].name.is_none());

        let ranked = summary.ranked();
        assert_eq!(ranked[0].0.as_str(), "food");
    }

    #[test]
    fn test_trend_payload_aliases() {
        let json = r#"{"category_id": "food", "name": "Food", "data": [{"month": "Ocak 2024", "amount": 12.5}]}"#;
        let trend: CategoryTrend = serde_json::from_str(json).unwrap();
        assert_eq!(trend.category_name, "Food");
        assert_eq!(trend.data[0].total, Money::from_cents(1250));
    }

    #[test]
    fn test_advisory_emptiness() {
        assert!(Advisory::default().is_empty());
        assert!(Advisory(serde_json::json!([])).is_empty());
        assert!(!Advisory(serde_json::json!({"warning": "over budget"})).is_empty());
    }
}
