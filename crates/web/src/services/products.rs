//! Product service.
//!
//! Parses raw form input into a [`NewProduct`] before touching storage, so a
//! malformed price or quantity can never produce a partial write.

use serde::Deserialize;
use sqlx::SqlitePool;
use thiserror::Error;

use stockroom_core::{
    Price, PriceError, ProductId, ProductName, ProductNameError, Quantity, QuantityError,
    Reference, ReferenceError, UserId,
};

use crate::db::{ProductRepository, RepositoryError};
use crate::models::product::{NewProduct, Product};

/// Raw add-product form fields.
///
/// Missing fields deserialize as empty strings so they surface as
/// validation errors instead of extractor rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub reference: String,
}

/// Which field failed to parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    /// The name is blank or too long.
    #[error(transparent)]
    Name(#[from] ProductNameError),
    /// The price is blank or not a finite decimal number.
    #[error(transparent)]
    Price(#[from] PriceError),
    /// The quantity is blank or not a whole number.
    #[error(transparent)]
    Quantity(#[from] QuantityError),
    /// The reference code is too long.
    #[error(transparent)]
    Reference(#[from] ReferenceError),
}

/// Errors that can occur during product operations.
#[derive(Debug, Error)]
pub enum ProductError {
    /// The submitted form was malformed; nothing was written.
    #[error("invalid product: {0}")]
    Validation(#[from] ProductValidationError),

    /// The owner already has a product with this reference.
    #[error("duplicate reference: {0}")]
    DuplicateReference(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ProductError {
    /// Message safe to show on the add-product form, if the user can fix it.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Validation(
                ProductValidationError::Price(_) | ProductValidationError::Quantity(_),
            ) => Some(
                "Price must be a number and quantity must be a whole number.".to_string(),
            ),
            Self::Validation(ProductValidationError::Name(ProductNameError::Empty)) => {
                Some("Product name is required.".to_string())
            }
            Self::Validation(ProductValidationError::Name(ProductNameError::TooLong { max })) => {
                Some(format!("Product name must be at most {max} characters."))
            }
            Self::Validation(ProductValidationError::Reference(ReferenceError::TooLong {
                max,
            })) => Some(format!("Reference must be at most {max} characters.")),
            Self::DuplicateReference(reference) => Some(format!(
                "You already have a product with reference '{reference}'."
            )),
            Self::Repository(_) => None,
        }
    }
}

impl ProductForm {
    /// Parse every field, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns the `ProductValidationError` for the first field that does not parse.
    pub fn parse(&self, owner: Option<UserId>) -> Result<NewProduct, ProductValidationError> {
        Ok(NewProduct {
            name: ProductName::parse(&self.name)?,
            price: Price::parse(&self.price)?,
            quantity: Quantity::parse(&self.quantity)?,
            reference: Reference::parse_optional(&self.reference)?,
            owner,
        })
    }
}

/// Product service.
pub struct ProductService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> ProductService<'a> {
    /// Create a new product service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// Validate the form and insert a product owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Validation` if any field is malformed (no row is written).
    /// Returns `ProductError::DuplicateReference` if the owner already uses the reference.
    /// Returns `ProductError::Repository` for other storage failures.
    pub async fn add_product(
        &self,
        owner: UserId,
        form: &ProductForm,
    ) -> Result<ProductId, ProductError> {
        let product = form.parse(Some(owner))?;

        let id = self.products.create(&product).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => ProductError::DuplicateReference(
                product
                    .reference
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            ),
            other => ProductError::Repository(other),
        })?;

        tracing::info!(
            product_id = %id,
            owner_id = %owner,
            name = %product.name,
            "Product added"
        );
        Ok(id)
    }

    /// List the owner's products sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Repository` if the query fails.
    pub async fn list_products(&self, owner: UserId) -> Result<Vec<Product>, ProductError> {
        Ok(self.products.list_by_owner(owner).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::auth::AuthService;

    fn form(name: &str, price: &str, quantity: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            price: price.to_string(),
            quantity: quantity.to_string(),
            reference: String::new(),
        }
    }

    async fn setup() -> (SqlitePool, UserId) {
        let pool = test_pool().await.unwrap();
        let user = AuthService::new(&pool)
            .register("alice", "abcdef")
            .await
            .unwrap();
        (pool, user.id)
    }

    #[tokio::test]
    async fn test_add_then_list_contains_exact_values() {
        let (pool, owner) = setup().await;
        let service = ProductService::new(&pool);

        service.add_product(owner, &form("Widget", "19.99", "5")).await.unwrap();

        let products = service.list_products(owner).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].price.as_f64(), 19.99);
        assert_eq!(products[0].quantity.as_i64(), 5);
    }

    #[tokio::test]
    async fn test_name_is_stored_trimmed() {
        let (pool, owner) = setup().await;
        let service = ProductService::new(&pool);

        service.add_product(owner, &form(" Widget ", "1", "1")).await.unwrap();

        let products = service.list_products(owner).await.unwrap();
        assert_eq!(products[0].name, "Widget");
    }

    #[tokio::test]
    async fn test_listing_sorted_by_name() {
        let (pool, owner) = setup().await;
        let service = ProductService::new(&pool);

        for name in ["Mallet", "Bolt", "Washer", "Clamp"] {
            service.add_product(owner, &form(name, "1", "1")).await.unwrap();
        }

        let names: Vec<String> = service
            .list_products(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Bolt", "Clamp", "Mallet", "Washer"]);
    }

    #[tokio::test]
    async fn test_malformed_numbers_write_nothing() {
        let (pool, owner) = setup().await;
        let service = ProductService::new(&pool);

        let cases = [
            form("Bad", "x", "5"),
            form("Bad", "abc", "5"),
            form("Bad", "1.00", "five"),
            form("Bad", "1.00", "2.5"),
            form("Bad", "", "5"),
            form("Bad", "NaN", "5"),
        ];

        for case in &cases {
            let err = service.add_product(owner, case).await.unwrap_err();
            assert!(matches!(err, ProductError::Validation(_)), "{case:?}");
            assert_eq!(
                err.user_message().as_deref(),
                Some("Price must be a number and quantity must be a whole number.")
            );
        }

        assert!(service.list_products(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (pool, owner) = setup().await;
        let service = ProductService::new(&pool);

        let err = service.add_product(owner, &form("  ", "1", "1")).await.unwrap_err();
        assert!(matches!(
            err,
            ProductError::Validation(ProductValidationError::Name(ProductNameError::Empty))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_reference_is_reported() {
        let (pool, owner) = setup().await;
        let service = ProductService::new(&pool);

        let mut first = form("Widget", "1", "1");
        first.reference = "W-1".to_string();
        service.add_product(owner, &first).await.unwrap();

        let mut second = form("Other widget", "2", "2");
        second.reference = " W-1 ".to_string();
        let err = service.add_product(owner, &second).await.unwrap_err();

        assert!(matches!(err, ProductError::DuplicateReference(ref r) if r == "W-1"));
        assert_eq!(service.list_products(owner).await.unwrap().len(), 1);
    }
}
