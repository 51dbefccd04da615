//! Money type for currency amounts
//!
//! Amounts are held in cents (i64). All splitting and aggregation happens in
//! whole cents, so sums are exact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount stored as cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use debt_drainer::models::Money;
    /// let amount = Money::from_cents(12050); // $120.50
    /// assert_eq!(amount.to_string(), "$120.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion (0-99)
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

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Multiply by a whole count, `None` on overflow
    pub fn times(&self, count: i64) -> Option<Self> {
        self.0.checked_mul(count).map(Self)
    }

    /// Integer percentage of `self` relative to `whole` (0 when `whole` is zero)
    pub fn percent_of(&self, whole: Money) -> i64 {
        if whole.is_zero() {
            return 0;
        }
        (i128::from(self.0) * 100 / i128::from(whole.0)) as i64
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "120.50", "-120.50", "$120.50", "120", "120.5". Digits past
    /// the second decimal place are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };
        let s = s.strip_prefix('$').unwrap_or(s).replace(',', "");
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let (whole, frac) = s.split_once('.').unwrap_or((s.as_str(), ""));
        let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        // Signs are only accepted once, before the amount
        if !digits_only(whole) || !digits_only(frac) || (whole.is_empty() && frac.is_empty()) {
            return Err(invalid());
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac[..2].parse().map_err(|_| invalid())?,
        };
        let cents = dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol from settings
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.dollars().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad so width and alignment flags apply in tables
        f.pad(&self.format_with_symbol("$"))
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

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
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
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(12050).to_string(), "$120.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-12000).to_string(), "-$120.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-5).format_with_symbol("€"), "-€0.05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("120.50").unwrap().cents(), 12050);
        assert_eq!(Money::parse("$120.50").unwrap().cents(), 12050);
        assert_eq!(Money::parse("-120.50").unwrap().cents(), -12050);
        assert_eq!(Money::parse("1,200").unwrap().cents(), 120000);
        assert_eq!(Money::parse("30.125").unwrap().cents(), 3012);
        assert_eq!(Money::parse("1.5").unwrap().cents(), 150);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1.x0").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse(".").is_err());
    }

    #[test]
    fn test_parse_rejects_misplaced_signs() {
        assert!(Money::parse("--5").is_err());
        assert!(Money::parse("$-3.50").is_err());
        assert!(Money::parse("+7").is_err());
        assert!(Money::parse("3.-5").is_err());
        assert_eq!(Money::parse("-$3.50").unwrap().cents(), -350);
    }

    #[test]
    fn test_times_and_percent() {
        assert_eq!(Money::from_cents(450).times(30), Some(Money::from_cents(13500)));
        assert_eq!(Money::from_cents(i64::MAX).times(2), None);
        assert_eq!(Money::from_dollars(620).percent_of(Money::from_dollars(500)), 124);
        assert_eq!(Money::from_dollars(10).percent_of(Money::zero()), 0);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);

        let amounts = [Money::from_cents(3013), Money::from_cents(3012)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 6025);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(12050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "12050");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
