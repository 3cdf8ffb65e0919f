//! Money type for representing rupee amounts.
//!
//! Amounts are stored as whole paise (1/100 rupee) to avoid floating-point
//! drift when summing line totals. The storefront prices everything in
//! Indian Rupees, so there is no currency field.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

/// Currency symbol used when formatting.
pub const RUPEE_SYMBOL: &str = "\u{20b9}";

/// A rupee amount in paise. May be negative (e.g. an order total after a
/// fixed discount larger than the subtotal).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money {
    /// Amount in paise.
    pub paise: i64,
}

impl Money {
    /// Create a value from paise.
    pub const fn from_paise(paise: i64) -> Self {
        Self { paise }
    }

    /// Create a value from a decimal rupee amount, rounding to the nearest paisa.
    ///
    /// ```
    /// use storefront_commerce::money::Money;
    /// let price = Money::from_rupees(109.95);
    /// assert_eq!(price.paise, 10995);
    /// ```
    pub fn from_rupees(rupees: f64) -> Self {
        Self::from_paise((rupees * 100.0).round() as i64)
    }

    /// Like [`from_rupees`](Self::from_rupees), but `None` when the amount is
    /// not finite or has no exact paise representation in an `i64`.
    pub fn try_from_rupees(rupees: f64) -> Option<Self> {
        let paise = (rupees * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which itself does not fit.
        if !paise.is_finite() || paise >= i64::MAX as f64 || paise < i64::MIN as f64 {
            return None;
        }
        Some(Self::from_paise(paise as i64))
    }

    /// Zero rupees.
    pub const fn zero() -> Self {
        Self::from_paise(0)
    }

    pub fn is_zero(&self) -> bool {
        self.paise == 0
    }

    pub fn is_negative(&self) -> bool {
        self.paise < 0
    }

    /// Convert to a decimal rupee value.
    pub fn to_rupees(&self) -> f64 {
        self.paise as f64 / 100.0
    }

    /// Format as INR with Indian digit grouping, e.g. `₹1,23,456.50`.
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, RUPEE_SYMBOL, self.display_amount_unsigned())
    }

    /// Format without the currency symbol, e.g. `1,234.50` or `-150.00`.
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}", sign, self.display_amount_unsigned())
    }

    fn display_amount_unsigned(&self) -> String {
        let abs = self.paise.unsigned_abs();
        format!("{}.{:02}", group_indian(abs / 100), abs % 100)
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.paise.checked_add(other.paise).map(Money::from_paise)
    }

    /// Checked subtraction.
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.paise.checked_sub(other.paise).map(Money::from_paise)
    }

    /// Checked multiplication by a whole factor (e.g. a quantity).
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.paise.checked_mul(factor).map(Money::from_paise)
    }

    /// A percentage of this amount, rounded to the nearest paisa.
    pub fn percentage(&self, percent: f64) -> Money {
        Money::from_paise((self.paise as f64 * percent / 100.0).round() as i64)
    }

    /// Sum values, returning `None` on overflow.
    pub fn try_sum<I: IntoIterator<Item = Money>>(iter: I) -> Option<Money> {
        iter.into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }
}

/// Group an integer with the Indian numbering convention: the last three
/// digits, then pairs (`12345678` → `1,23,45,678`).
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_paise(self.paise + other.paise)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::from_paise(self.paise - other.paise)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money::from_paise(-self.paise)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
