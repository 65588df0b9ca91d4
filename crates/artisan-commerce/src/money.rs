//! Money type for representing monetary values.
//!
//! Uses an integer count of minor units (cents) to avoid floating-point
//! precision issues in price comparisons and cart totals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
/// Ordering compares the amount first, so sorting prices of one currency
/// works as expected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from whole major units (e.g., dollars).
    ///
    /// ```
    /// use artisan_commerce::money::{Money, Currency};
    /// assert_eq!(Money::from_major(28, Currency::USD).amount_cents, 2800);
    /// ```
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount * currency.minor_per_major(), currency)
    }

    /// Parse a decimal string such as `"28"`, `"28.5"` or `"$28.50"`.
    ///
    /// Returns `None` for anything that is not a plain non-negative decimal
    /// with at most the currency's number of fraction digits.
    ///
    /// ```
    /// use artisan_commerce::money::{Money, Currency};
    /// let price = Money::parse_decimal("49.99", Currency::USD).unwrap();
    /// assert_eq!(price.amount_cents, 4999);
    /// assert!(Money::parse_decimal("4.999", Currency::USD).is_none());
    /// ```
    pub fn parse_decimal(input: &str, currency: Currency) -> Option<Self> {
        let s = input.trim();
        let s = s.strip_prefix(currency.symbol()).unwrap_or(s).trim();
        if s.is_empty() {
            return None;
        }

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        let places = currency.decimal_places() as usize;
        if frac.len() > places
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
            || (whole.is_empty() && frac.is_empty())
        {
            return None;
        }

        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut frac_value: i64 = if frac.is_empty() { 0 } else { frac.parse().ok()? };
        for _ in frac.len()..places {
            frac_value *= 10;
        }

        let amount = whole
            .checked_mul(currency.minor_per_major())?
            .checked_add(frac_value)?;
        Some(Self::new(amount, currency))
    }

    /// Create a zero amount in the given currency.
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        let per = self.currency.minor_per_major();
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let major = abs / per as u64;
        if places == 0 {
            return format!("{}{}", sign, major);
        }
        let minor = abs % per as u64;
        format!("{}{}.{:0places$}", sign, major, minor)
    }

    /// Signed difference from `base` for option labels, e.g. "+$4.00".
    ///
    /// Returns `None` when the amounts are equal or the currencies differ.
    pub fn delta_label(&self, base: &Money) -> Option<String> {
        let diff = self.try_subtract(base)?;
        if diff.is_zero() {
            return None;
        }
        let sign = if diff.is_negative() { "-" } else { "+" };
        let abs = Money::new(diff.amount_cents.abs(), diff.currency);
        Some(format!("{}{}", sign, abs.display()))
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.checked_add(other.amount_cents)?,
            self.currency,
        ))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.checked_sub(other.amount_cents)?,
            self.currency,
        ))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        Some(Money::new(self.amount_cents.checked_mul(factor)?, self.currency))
    }

    /// Sum an iterator of Money values, returning None on mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_major() {
        let m = Money::from_major(28, Currency::USD);
        assert_eq!(m.amount_cents, 2800);

        let m = Money::from_major(100, Currency::JPY);
        assert_eq!(m.amount_cents, 100); // JPY has no decimals
    }

    #[test]
    fn test_parse_decimal() {
        let usd = Currency::USD;
        assert_eq!(Money::parse_decimal("28", usd), Some(Money::new(2800, usd)));
        assert_eq!(Money::parse_decimal("28.5", usd), Some(Money::new(2850, usd)));
        assert_eq!(Money::parse_decimal("$0.99", usd), Some(Money::new(99, usd)));
        assert_eq!(Money::parse_decimal(".5", usd), Some(Money::new(50, usd)));
        assert_eq!(Money::parse_decimal("", usd), None);
        assert_eq!(Money::parse_decimal("-3", usd), None);
        assert_eq!(Money::parse_decimal("abc", usd), None);
        assert_eq!(Money::parse_decimal("1.234", usd), None);
        assert_eq!(Money::parse_decimal("12.5", Currency::JPY), None);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(2800, Currency::USD).display(), "$28.00");
        assert_eq!(Money::new(5, Currency::USD).display(), "$0.05");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
        assert_eq!(Money::new(-250, Currency::USD).display_amount(), "-2.50");
    }

    #[test]
    fn test_delta_label() {
        let base = Money::from_major(28, Currency::USD);
        assert_eq!(Money::from_major(32, Currency::USD).delta_label(&base).as_deref(), Some("+$4.00"));
        assert_eq!(Money::from_major(25, Currency::USD).delta_label(&base).as_deref(), Some("-$3.00"));
        assert_eq!(base.delta_label(&base), None);
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(500, Currency::USD);
        assert_eq!(a.try_add(&b).unwrap().amount_cents, 1500);
        assert_eq!(a.try_subtract(&b).unwrap().amount_cents, 500);
        assert_eq!(a.try_multiply(3).unwrap().amount_cents, 3000);
        assert!(Money::new(i64::MAX, Currency::USD).try_multiply(2).is_none());
    }

    #[test]
    fn test_try_sum() {
        let prices = [
            Money::from_major(28, Currency::USD),
            Money::new(450, Currency::USD),
            Money::new(50, Currency::USD),
        ];
        assert_eq!(Money::try_sum(prices.iter(), Currency::USD).unwrap().amount_cents, 3300);
        assert_eq!(Money::try_sum([].iter(), Currency::USD), Some(Money::zero(Currency::USD)));

        let huge = [Money::new(i64::MAX, Currency::USD), Money::new(1, Currency::USD)];
        assert!(Money::try_sum(huge.iter(), Currency::USD).is_none());
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(usd.try_add(&eur).is_none());
        assert!(Money::try_sum([usd, eur].iter(), Currency::USD).is_none());
    }

    #[test]
    fn test_ordering_by_amount() {
        let mut prices = vec![
            Money::from_major(30, Currency::USD),
            Money::from_major(25, Currency::USD),
        ];
        prices.sort();
        assert_eq!(prices[0].amount_cents, 2500);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
