use anyhow::bail;
use serde_with::DeserializeFromStr;

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Represents an amount of money in USD currency.
///
/// The amount is stored internally as an integer number of cents, but the
/// [`Display`] implementation formats it for display as dollars to 2 decimal
/// places.
#[derive(Clone, Copy, Default, DeserializeFromStr, Eq, PartialEq, Ord, PartialOrd)]
pub struct Usd(i64);

impl Usd {
    /// Creates an amount from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the amount as fractional dollars.
    #[must_use]
    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Debug for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.as_dollars())
    }
}

impl FromStr for Usd {
    type Err = anyhow::Error;

    /// Parses a decimal dollar amount, with or without cents or thousands
    /// separators: `20`, `20.5`, and `1,234.56` are all valid.
    #[allow(clippy::cast_possible_truncation)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let dollars: f64 = s.replace(',', "").parse()?;
        if dollars < 0.0 {
            bail!("negative amount: {s}");
        }
        let cents = (dollars * 100.0).round() as i64;
        Ok(Self(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_fn_parses_various_decimal_forms() {
        assert_eq!(Usd::from_str("20").unwrap(), Usd::from_cents(2000));
        assert_eq!(Usd::from_str("20.5").unwrap(), Usd::from_cents(2050));
        assert_eq!(Usd::from_str("1,234.56").unwrap(), Usd::from_cents(123_456));
    }

    #[test]
    fn from_str_fn_rejects_junk_and_negatives() {
        assert!(Usd::from_str("bogus").is_err());
        assert!(Usd::from_str("-1.00").is_err());
    }

    #[test]
    fn display_impl_formats_as_dollars_and_cents() {
        assert_eq!(Usd::from_cents(123_456).to_string(), "$1234.56");
    }

    #[test]
    fn as_dollars_fn_converts_cents() {
        assert!((Usd::from_cents(2050).as_dollars() - 20.5).abs() < f64::EPSILON);
    }
}
