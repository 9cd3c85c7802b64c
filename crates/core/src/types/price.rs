//! Product unit price.
//!
//! Prices are plain floating-point amounts in the shop's single currency.
//! Only finite values are representable.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Nothing was entered.
    #[error("price is required")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number, got {0:?}")]
    NotANumber(String),
    /// The input parsed to infinity or NaN.
    #[error("price must be a finite number")]
    NotFinite,
}

/// A finite unit price.
///
/// ```
/// use stockroom_core::Price;
///
/// assert_eq!(Price::parse("19.99").unwrap().as_f64(), 19.99);
/// assert!(Price::parse("abc").is_err());
/// assert!(Price::parse("inf").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// The column default for products created without a price.
    pub const ZERO: Self = Self(0.0);

    /// Parse a price from form input.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] when the trimmed input is empty, not a decimal
    /// number, or not finite.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let value: f64 = trimmed
            .parse()
            .map_err(|_| PriceError::NotANumber(trimmed.to_owned()))?;

        Self::try_from(value)
    }

    /// Returns the amount.
    #[must_use]
    pub const fn as_f64(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(PriceError::NotFinite)
        }
    }
}

/// Shortest representation that round-trips, so stored prices are never rounded.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Price::parse("19.99").unwrap().as_f64(), 19.99);
        assert_eq!(Price::parse(" 5 ").unwrap().as_f64(), 5.0);
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
        assert_eq!(Price::parse("1e2").unwrap().as_f64(), 100.0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            Price::parse("abc"),
            Err(PriceError::NotANumber("abc".to_string()))
        );
        assert!(matches!(Price::parse("x"), Err(PriceError::NotANumber(_))));
        assert!(matches!(Price::parse("1,50"), Err(PriceError::NotANumber(_))));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("  "), Err(PriceError::Empty));
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert_eq!(Price::parse("inf"), Err(PriceError::NotFinite));
        assert_eq!(Price::parse("NaN"), Err(PriceError::NotFinite));
        assert_eq!(Price::try_from(f64::NEG_INFINITY), Err(PriceError::NotFinite));
    }

    #[test]
    fn test_display_is_unrounded() {
        assert_eq!(Price::parse("19.999").unwrap().to_string(), "19.999");
        assert_eq!(Price::parse("0.004").unwrap().to_string(), "0.004");
        assert_eq!(Price::parse("19.99").unwrap().to_string(), "19.99");
        assert_eq!(Price::ZERO.to_string(), "0");
    }
}
