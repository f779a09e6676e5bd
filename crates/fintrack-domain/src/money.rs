//! Fixed-point monetary amounts stored as integer minor units (cents).

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

const MINOR_PER_MAJOR: i64 = 100;

/// An amount of currency held as a whole number of cents.
///
/// Arithmetic saturates at the `i64` bounds instead of wrapping, so a sum can
/// never silently flip sign. `Sum` accumulates in `i128` and clamps once, so a
/// total does not depend on the order of its terms. Negative amounts are valid and represent credits
/// or corrections entered by the user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Converts a floating-point amount of currency units, rounding to the
    /// nearest cent. Returns `None` for NaN, infinities and out-of-range values.
    pub fn from_major(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * MINOR_PER_MAJOR as f64).round();
        fits_in_cents(cents).then(|| Self(cents as i64))
    }

    /// Lossy conversion back to currency units, for display layers only.
    /// Clamps a widened cent count into the `i64` range.
    pub fn saturating_from_i128(cents: i128) -> Self {
        Self(cents.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }

    pub fn to_major(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Reads a masked entry field such as `"R$ 1.234,56"` by keeping only the
    /// ASCII digits and interpreting them as cents. Empty input is zero.
    pub fn from_masked_input(input: &str) -> Result<Self, MoneyParseError> {
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Ok(Self::ZERO);
        }
        digits
            .parse::<i64>()
            .map(Self)
            .map_err(|_| MoneyParseError::Overflow)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }
}

// `i64::MAX as f64` rounds up to 2^63, which is already out of range.
fn fits_in_cents(cents: f64) -> bool {
    cents >= i64::MIN as f64 && cents < i64::MAX as f64
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{}.{:02}",
            magnitude / MINOR_PER_MAJOR as u64,
            magnitude % MINOR_PER_MAJOR as u64
        )
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    /// Parses plain decimal text: `"12"`, `"12.5"`, `"-3,75"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, fraction, has_separator) = match body.find(|c| c == '.' || c == ',') {
            Some(pos) => (&body[..pos], &body[pos + 1..], true),
            None => (body, "", false),
        };
        let invalid = || MoneyParseError::Invalid(trimmed.to_string());
        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if (has_separator && fraction.is_empty())
            || fraction.len() > 2
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: i64 = whole.parse().map_err(|_| MoneyParseError::Overflow)?;
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse::<i64>().map_err(|_| invalid())?,
        };
        let total = units
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|value| value.checked_add(cents))
            .ok_or(MoneyParseError::Overflow)?;
        Ok(Self(if negative { -total } else { total }))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money::saturating_from_i128(iter.map(|money| i128::from(money.0)).sum())
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised while reading monetary text.
pub enum MoneyParseError {
    Empty,
    Invalid(String),
    Overflow,
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => f.write_str("amount is empty"),
            MoneyParseError::Invalid(raw) => write!(f, "`{raw}` is not a valid amount"),
            MoneyParseError::Overflow => f.write_str("amount is too large"),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_text() {
        assert_eq!("12".parse::<Money>().unwrap(), Money::from_cents(1200));
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_cents(1250));
        assert_eq!("250.50".parse::<Money>().unwrap(), Money::from_cents(25050));
        assert_eq!("-3,75".parse::<Money>().unwrap(), Money::from_cents(-375));
        assert_eq!(" +0.01 ".parse::<Money>().unwrap(), Money::from_cents(1));
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!("".parse::<Money>(), Err(MoneyParseError::Empty));
        assert!(matches!(
            "1.234".parse::<Money>(),
            Err(MoneyParseError::Invalid(_))
        ));
        assert!(matches!("12.".parse::<Money>(), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(".5".parse::<Money>(), Err(MoneyParseError::Invalid(_))));
        assert!(matches!("abc".parse::<Money>(), Err(MoneyParseError::Invalid(_))));
        assert_eq!(
            "99999999999999999999".parse::<Money>(),
            Err(MoneyParseError::Overflow)
        );
    }

    #[test]
    fn masked_input_reads_digits_as_cents() {
        assert_eq!(
            Money::from_masked_input("R$ 1.234,56").unwrap(),
            Money::from_cents(123_456)
        );
        assert_eq!(Money::from_masked_input("R$ 0,00").unwrap(), Money::ZERO);
        assert_eq!(Money::from_masked_input("").unwrap(), Money::ZERO);
        assert_eq!(
            Money::from_masked_input("99999999999999999999"),
            Err(MoneyParseError::Overflow)
        );
    }

    #[test]
    fn from_major_rounds_and_rejects_non_finite() {
        assert_eq!(Money::from_major(0.1 + 0.2), Some(Money::from_cents(30)));
        assert_eq!(Money::from_major(-19.999), Some(Money::from_cents(-2000)));
        assert_eq!(Money::from_major(f64::NAN), None);
        assert_eq!(Money::from_major(f64::INFINITY), None);
        assert_eq!(Money::from_major(1e17), None);
        assert_eq!(
            Money::from_major(-1e16),
            Some(Money::from_cents(-1_000_000_000_000_000_000))
        );
    }

    #[test]
    fn cent_range_excludes_two_to_the_sixty_third() {
        assert!(!fits_in_cents(i64::MAX as f64));
        assert!(!fits_in_cents(9_223_372_036_854_775_808.0));
        assert!(fits_in_cents(i64::MIN as f64));
        assert!(fits_in_cents(9_223_372_036_854_774_784.0));
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_cents(75_050).to_string(), "750.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max + Money::from_cents(1), max);
        let total: Money = [Money::from_cents(150), Money::from_cents(-50)]
            .iter()
            .sum();
        assert_eq!(total, Money::from_cents(100));
    }

    #[test]
    fn sum_is_independent_of_term_order() {
        let terms = [
            Money::from_cents(i64::MAX),
            Money::from_cents(1),
            Money::from_cents(-1),
        ];
        let forward: Money = terms.iter().sum();
        let reordered: Money = [terms[2], terms[0], terms[1]].iter().sum();
        assert_eq!(forward, Money::from_cents(i64::MAX));
        assert_eq!(forward, reordered);

        let floor: Money = [Money::from_cents(i64::MIN), Money::from_cents(-1)]
            .iter()
            .sum();
        assert_eq!(floor, Money::from_cents(i64::MIN));
    }

    #[test]
    fn serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(12_345)).unwrap();
        assert_eq!(json, "12345");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_cents(12_345));
    }
}
