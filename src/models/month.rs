//! Calendar month labels
//!
//! Monthly statistics arrive keyed by a human label such as `"Ocak 2024"`, and
//! chart clicks hand that same label back. `MonthLabel` converts between the
//! label and a concrete `(year, month)` so expenses can be matched by date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::fold_case;

/// Language used for month names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Tr,
    En,
}

const TR_MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Language {
    pub fn month_names(&self) -> &'static [&'static str; 12] {
        match self {
            Self::Tr => &TR_MONTHS,
            Self::En => &EN_MONTHS,
        }
    }
}

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthLabel {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl MonthLabel {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse `"Ocak 2024"`, `"January 2024"`, `"2024-01"` or `"01/2024"`
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();

        if let Some((year, month)) = label.split_once('-') {
            return Self::new(year.trim().parse().ok()?, month.trim().parse().ok()?);
        }
        if let Some((month, year)) = label.split_once('/') {
            return Self::new(year.trim().parse().ok()?, month.trim().parse().ok()?);
        }

        let mut parts = label.split_whitespace();
        let name = parts.next()?;
        let year: i32 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }

        let lowered = fold_case(name);
        let index = [Language::Tr, Language::En].iter().find_map(|lang| {
            lang.month_names()
                .iter()
                .position(|m| fold_case(m) == lowered)
        })?;

        Self::new(year, index as u32 + 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Human label in the given language
    pub fn label(&self, language: Language) -> String {
        let index = (self.month.clamp(1, 12) - 1) as usize;
        format!("{} {}", language.month_names()[index], self.year)
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
