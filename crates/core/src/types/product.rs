//! Product field types: name, quantity and the optional reference code.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductNameError {
    /// Nothing was entered.
    #[error("product name is required")]
    Empty,
    /// The name is too long.
    #[error("product name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A product's display name, trimmed and at most 80 characters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProductName(String);

impl ProductName {
    /// Maximum length of a product name, matching the `product.name` column width.
    pub const MAX_LENGTH: usize = 80;

    /// Parse a product name from form input.
    ///
    /// # Errors
    ///
    /// Returns [`ProductNameError`] when the trimmed value is empty or too long.
    pub fn parse(s: &str) -> Result<Self, ProductNameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ProductNameError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(ProductNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when parsing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Nothing was entered.
    #[error("quantity is required")]
    Empty,
    /// The input is not a whole number.
    #[error("quantity must be a whole number, got {0:?}")]
    NotAnInteger(String),
}

/// A stock count.
///
/// ```
/// use stockroom_core::Quantity;
///
/// assert_eq!(Quantity::parse("5").unwrap().as_i64(), 5);
/// assert!(Quantity::parse("1.5").is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    /// The column default for products created without a quantity.
    pub const ZERO: Self = Self(0);

    /// Parse a quantity from form input.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError`] when the trimmed input is empty or is not a
    /// base-10 integer that fits in 64 bits.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(QuantityError::Empty);
        }
        trimmed
            .parse::<i64>()
            .map(Self)
            .map_err(|_| QuantityError::NotAnInteger(trimmed.to_owned()))
    }

    /// Returns the count.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur when parsing a [`Reference`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// The code is too long.
    #[error("reference must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// An owner-unique product reference code (SKU-like).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    /// Maximum length of a reference code.
    pub const MAX_LENGTH: usize = 64;

    /// Parse an optional reference from form input. Blank input means "no reference".
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::TooLong`] when the trimmed value exceeds 64 characters.
    ///
    /// ```
    /// use stockroom_core::Reference;
    ///
    /// assert_eq!(Reference::parse_optional("  ").unwrap(), None);
    /// assert_eq!(Reference::parse_optional(" W-1 ").unwrap().unwrap().as_str(), "W-1");
    /// ```
    pub fn parse_optional(s: &str) -> Result<Option<Self>, ReferenceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(ReferenceError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Some(Self(trimmed.to_owned())))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_name_trims() {
        assert_eq!(ProductName::parse(" Widget ").unwrap().as_str(), "Widget");
    }

    #[test]
    fn test_product_name_rejects_empty_and_long() {
        assert_eq!(ProductName::parse("   "), Err(ProductNameError::Empty));
        assert_eq!(
            ProductName::parse(&"n".repeat(81)),
            Err(ProductNameError::TooLong { max: 80 })
        );
        assert!(ProductName::parse(&"n".repeat(80)).is_ok());
    }

    #[test]
    fn test_quantity_parses_integers() {
        assert_eq!(Quantity::parse("5").unwrap().as_i64(), 5);
        assert_eq!(Quantity::parse(" 0 ").unwrap(), Quantity::ZERO);
        assert_eq!(Quantity::parse("-3").unwrap().as_i64(), -3);
    }

    #[test]
    fn test_quantity_rejects_non_integers() {
        assert_eq!(
            Quantity::parse("1.5"),
            Err(QuantityError::NotAnInteger("1.5".to_string()))
        );
        assert!(matches!(
            Quantity::parse("five"),
            Err(QuantityError::NotAnInteger(_))
        ));
        assert_eq!(Quantity::parse(""), Err(QuantityError::Empty));
    }

    #[test]
    fn test_quantity_rejects_overflow() {
        assert!(Quantity::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_reference_blank_is_none() {
        assert_eq!(Reference::parse_optional("").unwrap(), None);
        assert_eq!(Reference::parse_optional(" \t").unwrap(), None);
    }

    #[test]
    fn test_reference_too_long() {
        assert_eq!(
            Reference::parse_optional(&"r".repeat(65)),
            Err(ReferenceError::TooLong { max: 64 })
        );
    }
}
