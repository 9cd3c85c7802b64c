//! Product repository for database operations.

use sqlx::SqlitePool;

use stockroom_core::{Price, ProductId, Quantity, UserId};

use super::RepositoryError;
use crate::models::product::{NewProduct, Product};

/// Raw `product` row.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    price: f64,
    quantity: i64,
    reference: Option<String>,
    owner_id: Option<UserId>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::try_from(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            price,
            quantity: Quantity::from(row.quantity),
            reference: row.reference,
            owner_id: row.owner_id,
        })
    }
}

fn collect_products(rows: Vec<ProductRow>) -> Result<Vec<Product>, RepositoryError> {
    rows.into_iter().map(Product::try_from).collect()
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List the products owned by a user, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is not finite.
    pub async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, quantity, reference, owner_id
            FROM product
            WHERE owner_id = ?1
            ORDER BY name ASC, id ASC
            ",
        )
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        collect_products(rows)
    }

    #[cfg(any(test, feature = "test-util"))]
    /// List every product regardless of owner, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is not finite.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, quantity, reference, owner_id
            FROM product
            ORDER BY name ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        collect_products(rows)
    }

    /// Insert a product and return its generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the owner already has a product
    /// with the same reference.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, product: &NewProduct) -> Result<ProductId, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO product (name, price, quantity, reference, owner_id)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(product.name.as_str())
        .bind(product.price.as_f64())
        .bind(product.quantity.as_i64())
        .bind(product.reference.as_ref().map(|r| r.as_str()))
        .bind(product.owner)
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "reference already used by this owner"))?;

        Ok(ProductId::new(result.last_insert_rowid()))
    }

    #[cfg(any(test, feature = "test-util"))]
    /// Count the products owned by a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_owner(&self, owner: UserId) -> Result<i64, RepositoryError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product WHERE owner_id = ?1")
                .bind(owner)
                .fetch_one(self.pool)
                .await?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use stockroom_core::{ProductName, Reference, Username};

    use super::*;
    use crate::db::{UserRepository, test_pool};

    async fn owner(pool: &SqlitePool, name: &str) -> UserId {
        UserRepository::new(pool)
            .create(&Username::parse(name).unwrap(), "hash")
            .await
            .unwrap()
            .id
    }

    fn new_product(name: &str, reference: Option<&str>, owner: UserId) -> NewProduct {
        NewProduct {
            name: ProductName::parse(name).unwrap(),
            price: Price::parse("1.50").unwrap(),
            quantity: Quantity::parse("3").unwrap(),
            reference: reference.map(|r| Reference::parse_optional(r).unwrap().unwrap()),
            owner: Some(owner),
        }
    }

    #[tokio::test]
    async fn test_create_returns_id_and_lists_sorted() {
        let pool = test_pool().await.unwrap();
        let alice = owner(&pool, "alice").await;
        let repo = ProductRepository::new(&pool);

        let gadget = repo.create(&new_product("Gadget", None, alice)).await.unwrap();
        let anvil = repo.create(&new_product("Anvil", None, alice)).await.unwrap();
        assert_ne!(gadget, anvil);

        let products = repo.list_by_owner(alice).await.unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Anvil", "Gadget"]);
        assert_eq!(products[0].price.as_f64(), 1.5);
        assert_eq!(products[0].quantity.as_i64(), 3);
        assert_eq!(products[0].owner_id, Some(alice));
    }

    #[tokio::test]
    async fn test_listing_is_scoped_to_owner() {
        let pool = test_pool().await.unwrap();
        let alice = owner(&pool, "alice").await;
        let bob = owner(&pool, "bob").await;
        let repo = ProductRepository::new(&pool);

        repo.create(&new_product("Widget", None, alice)).await.unwrap();
        repo.create(&new_product("Sprocket", None, bob)).await.unwrap();

        let alice_products = repo.list_by_owner(alice).await.unwrap();
        assert_eq!(alice_products.len(), 1);
        assert_eq!(alice_products[0].name, "Widget");
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_reference_for_same_owner_conflicts() {
        let pool = test_pool().await.unwrap();
        let alice = owner(&pool, "alice").await;
        let bob = owner(&pool, "bob").await;
        let repo = ProductRepository::new(&pool);

        repo.create(&new_product("Widget", Some("W-1"), alice)).await.unwrap();

        let err = repo
            .create(&new_product("Widget v2", Some("W-1"), alice))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.count_by_owner(alice).await.unwrap(), 1);

        // Same reference under another owner is fine.
        repo.create(&new_product("Widget", Some("W-1"), bob)).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_reference_never_conflicts() {
        let pool = test_pool().await.unwrap();
        let alice = owner(&pool, "alice").await;
        let repo = ProductRepository::new(&pool);

        repo.create(&new_product("One", None, alice)).await.unwrap();
        repo.create(&new_product("Two", None, alice)).await.unwrap();

        assert_eq!(repo.count_by_owner(alice).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unknown_owner_violates_foreign_key() {
        let pool = test_pool().await.unwrap();
        let repo = ProductRepository::new(&pool);

        let err = repo
            .create(&new_product("Orphan", None, UserId::new(404)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
