//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (i64) to avoid floating-point
//! drift when summing. The backend speaks decimal JSON numbers, so the wire
//! form is a float rounded to the nearest minor unit on the way in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A monetary amount stored as minor units (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use tally_cli::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Minor-unit portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Amount as a float, for the wire and for charts
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Divide evenly, rounding half away from zero. Division by zero yields zero.
    pub fn div_round(&self, divisor: i64) -> Self {
        if divisor == 0 {
            return Self::zero();
        }
        let q = self.0 as f64 / divisor as f64;
        Self(q.round() as i64)
    }

    /// Parse a user-entered amount
    ///
    /// Accepts `10.50`, `10,50`, `1.234,56`, `1,234.56`, `₺10`, `$10.50`.
    /// When both separators appear, the last one is the decimal separator.
    /// At most two fraction digits are accepted.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let raw = s.trim();
        let (negative, rest) = match raw.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, raw),
        };
        let rest = rest.trim_start_matches(['$', '₺', '€', '£']).trim();

        if rest.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let decimal_pos = match (rest.rfind('.'), rest.rfind(',')) {
            (Some(d), Some(c)) => Some(d.max(c)),
            (Some(d), None) if rest.matches('.').count() == 1 => Some(d),
            (None, Some(c)) if rest.matches(',').count() == 1 => Some(c),
            _ => None,
        };

        // A lone separator before exactly three digits groups thousands: 1.500
        let decimal_pos = decimal_pos.filter(|&pos| {
            let lone = rest.matches(['.', ',']).count() == 1;
            let head = &rest[..pos];
            let grouped = lone
                && rest.len() - pos - 1 == 3
                && !head.is_empty()
                && !head.trim_start_matches('0').is_empty();
            !grouped
        });

        let (int_part, frac_part) = match decimal_pos {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => (rest, ""),
        };

        let digits: String = int_part.chars().filter(|c| *c != '.' && *c != ',').collect();
        if digits.is_empty() && frac_part.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
            || frac_part.len() > 2
        {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let units: i64 = if digits.is_empty() {
            0
        } else {
            digits
                .parse()
                .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
        };
        let cents: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().unwrap_or(0) * 10,
            _ => frac_part.parse().unwrap_or(0),
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?;
        Ok(Self(if negative { -total } else { total }))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl TryFrom<f64> for Money {
    type Error = MoneyParseError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(MoneyParseError::NotFinite);
        }
        Ok(Self((value * 100.0).round() as i64))
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.as_f64()
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    NotFinite,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            Self::NotFinite => write!(f, "Amount is not a finite number"),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10,50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("₺10,5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("1.234,56").unwrap().cents(), 123456);
        assert_eq!(Money::parse("1,234.56").unwrap().cents(), 123456);
        assert_eq!(Money::parse("1.234.567").unwrap().cents(), 123456700);
        assert_eq!(Money::parse("50").unwrap().cents(), 5000);
        assert_eq!(Money::parse("-3").unwrap().cents(), -300);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("12.x5").is_err());
    }

    #[test]
    fn test_parse_three_digit_group_is_thousands() {
        assert_eq!(Money::parse("1.500").unwrap(), Money::from_units(1500));
        assert_eq!(Money::parse("₺12,000").unwrap(), Money::from_units(12000));
        assert!(Money::parse("0.500").is_err());
    }

    #[test]
    fn test_parse_rejects_extra_fraction_digits() {
        assert!(Money::parse("10.999").is_err());
        assert!(Money::parse("1.234,567").is_err());
        assert_eq!(Money::parse("10.99").unwrap().cents(), 1099);
    }

    #[test]
    fn test_parse_overflow_is_an_error() {
        assert!(matches!(
            Money::parse("92233720368547759"),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_wire_format_is_decimal() {
        let m = Money::from_cents(1544);
        assert_eq!(serde_json::to_string(&m).unwrap(), "15.44");

        let parsed: Money = serde_json::from_str("1544.14").unwrap();
        assert_eq!(parsed.cents(), 154414);

        let integer: Money = serde_json::from_str("50").unwrap();
        assert_eq!(integer, Money::from_units(50));
    }

    #[test]
    fn test_float_noise_is_rounded() {
        let m = Money::try_from(0.1 + 0.2).unwrap();
        assert_eq!(m.cents(), 30);
        assert!(Money::try_from(f64::NAN).is_err());
    }

    #[test]
    fn test_div_round() {
        assert_eq!(Money::from_cents(1000).div_round(3).cents(), 333);
        assert_eq!(Money::from_cents(1000).div_round(6).cents(), 167);
        assert_eq!(Money::from_cents(1000).div_round(0), Money::zero());
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(100), Money::from_cents(200)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 300);
    }
}
