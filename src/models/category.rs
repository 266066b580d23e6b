//! Category model
//!
//! Categories are read-only reference data owned by the backend. The client
//! only looks them up for display (name, color, icon) and for resolving a
//! chart label back to an id.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::fold_case;
use super::ids::CategoryId;

/// Name shown for expenses whose category id is not in the cached list
pub const UNKNOWN_CATEGORY_NAME: &str = "Bilinmeyen";
/// Neutral gray used for the unknown category
pub const UNKNOWN_CATEGORY_COLOR: &str = "#A0A0A0";
/// Icon used for the unknown category
pub const UNKNOWN_CATEGORY_ICON: &str = "❓";

/// An expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Display color as a `#RRGGBB` hex string
    #[serde(default = "default_color")]
    pub color: String,

    /// Display icon (usually a single emoji)
    #[serde(default)]
    pub icon: String,
}

fn default_color() -> String {
    UNKNOWN_CATEGORY_COLOR.to_string()
}

impl Category {
    pub fn new(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
        }
    }

    /// The sentinel returned for ids missing from the cached list
    pub fn unknown() -> Self {
        Self::new(
            "",
            UNKNOWN_CATEGORY_NAME,
            UNKNOWN_CATEGORY_COLOR,
            UNKNOWN_CATEGORY_ICON,
        )
    }

    /// Whether this is the unknown-category sentinel
    pub fn is_unknown(&self) -> bool {
        self.id.as_str().is_empty()
    }

    /// The category set the backend ships with
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("food", "Yiyecek & İçecek", "#FF6B6B", "🍽️"),
            Self::new("transport", "Ulaşım", "#4ECDC4", "🚗"),
            Self::new("entertainment", "Eğlence", "#45B7D1", "🎬"),
            Self::new("shopping", "Alışveriş", "#96CEB4", "🛍️"),
            Self::new("health", "Sağlık", "#FFEAA7", "🏥"),
            Self::new("education", "Eğitim", "#DDA0DD", "📚"),
            Self::new("bills", "Faturalar", "#FF7675", "💡"),
            Self::new("other", "Diğer", "#A0A0A0", "📦"),
        ]
    }

    /// Parse the hex color into RGB components
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.icon.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.icon, self.name)
        }
    }
}

/// Find a category by display name: exact match first, then case-insensitive
pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    let name = name.trim();
    categories
        .iter()
        .find(|c| c.name == name)
        .or_else(|| {
            let folded = fold_case(name);
            categories.iter().find(|c| fold_case(&c.name) == folded)
        })
}
