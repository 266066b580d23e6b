//! Locale-aware formatting of amounts and dates

use chrono::NaiveDate;

use crate::models::{Language, Money};

/// How amounts and dates are written for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLocale {
    pub currency_symbol: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub date_format: String,
    pub language: Language,
}

impl Default for DisplayLocale {
    fn default() -> Self {
        Self {
            currency_symbol: "₺".into(),
            thousands_separator: ".".into(),
            decimal_separator: ",".into(),
            date_format: "%d.%m.%Y".into(),
            language: Language::Tr,
        }
    }
}

impl DisplayLocale {
    /// Format an amount, e.g. `₺1.234,56`
    pub fn format_money(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}",
            sign,
            self.currency_symbol,
            self.format_number(amount)
        )
    }

    /// Format an amount without the currency symbol, e.g. `1.234,56`
    pub fn format_number(&self, amount: Money) -> String {
        let units = amount.cents().unsigned_abs() / 100;
        format!(
            "{}{}{:02}",
            group_thousands(units, &self.thousands_separator),
            self.decimal_separator,
            amount.cents_part()
        )
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

fn group_thousands(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Cut a string to at most `max_chars` characters, ending in "..." when cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_turkish() {
        let locale = DisplayLocale::default();
        assert_eq!(locale.format_money(Money::from_cents(123456)), "₺1.234,56");
        assert_eq!(locale.format_money(Money::from_cents(5)), "₺0,05");
        assert_eq!(locale.format_money(Money::from_units(1_000_000)), "₺1.000.000,00");
        assert_eq!(locale.format_money(Money::from_cents(-2050)), "-₺20,50");
    }

    #[test]
    fn test_format_money_custom() {
        let locale = DisplayLocale {
            currency_symbol: "$".into(),
            thousands_separator: ",".into(),
            decimal_separator: ".".into(),
            ..Default::default()
        };
        assert_eq!(locale.format_money(Money::from_cents(123456)), "$1,234.56");
    }

    #[test]
    fn test_format_date() {
        let locale = DisplayLocale::default();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(locale.format_date(date), "05.01.2024");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Short", 10), "Short");
        assert_eq!(truncate("Alışveriş merkezi", 10), "Alışver...");
        assert_eq!(truncate("abc", 2), "...");
    }
}
