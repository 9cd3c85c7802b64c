//! User repository for database operations.
//!
//! Queries are checked at runtime with `query_as` and mapped through row
//! structs so the crate builds without a live database.

use sqlx::SqlitePool;

use stockroom_core::{UserId, Username};

use super::RepositoryError;
use crate::models::user::User;

/// Raw `user` row without the password hash.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    username: Username,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
        }
    }
}

/// Raw `user` row including the password hash, used only for login.
#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    id: UserId,
    username: Username,
    password_hash: String,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username
            FROM "user"
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Get a user by their username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username
            FROM "user"
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Get a user together with their stored password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, username, password_hash
            FROM "user"
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            (
                User {
                    id: r.id,
                    username: r.username,
                },
                r.password_hash,
            )
        }))
    }

    /// Create a new user with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO "user" (username, password_hash)
            VALUES (?1, ?2)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "username already exists"))?;

        Ok(User {
            id: UserId::new(result.last_insert_rowid()),
            username: username.clone(),
        })
    }

    #[cfg(any(test, feature = "test-util"))]
    /// Delete a user (and, through the foreign key, their products).
    ///
    /// # Returns
    ///
    /// Returns `true` if the user was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(r#"DELETE FROM "user" WHERE id = ?1"#)
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[cfg(any(test, feature = "test-util"))]
    /// Count registered users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM "user""#)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn name(s: &str) -> Username {
        Username::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let pool = test_pool().await.unwrap();
        let repo = UserRepository::new(&pool);

        let user = repo.create(&name("alice"), "hash").await.unwrap();

        let by_id = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.username.as_str(), "alice");

        let by_name = repo.get_by_username(&name("alice")).await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);

        let (_, hash) = repo.get_password_hash(&name("alice")).await.unwrap().unwrap();
        assert_eq!(hash, "hash");
    }

    #[tokio::test]
    async fn test_lookup_missing_returns_none() {
        let pool = test_pool().await.unwrap();
        let repo = UserRepository::new(&pool);

        assert!(repo.get_by_id(UserId::new(99)).await.unwrap().is_none());
        assert!(repo.get_by_username(&name("nobody")).await.unwrap().is_none());
        assert!(repo.get_password_hash(&name("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let pool = test_pool().await.unwrap();
        let repo = UserRepository::new(&pool);

        repo.create(&name("alice"), "first").await.unwrap();
        let err = repo.create(&name("alice"), "second").await.unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);

        let (_, hash) = repo.get_password_hash(&name("alice")).await.unwrap().unwrap();
        assert_eq!(hash, "first");
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let pool = test_pool().await.unwrap();
        let repo = UserRepository::new(&pool);

        let first = repo.create(&name("alice"), "h").await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());
        let second = repo.create(&name("bob"), "h").await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(repo.get_by_id(first.id).await.unwrap().is_none());
    }
}
