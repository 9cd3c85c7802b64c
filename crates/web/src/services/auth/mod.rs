//! Authentication service.
//!
//! Provides password registration/login and the user loader that turns a
//! session's stored user id back into a full [`User`].

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use stockroom_core::{UserId, Username, validate_password};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::User;

/// Hash verified when the username is unknown, so a miss costs the same as a
/// wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("stockroom-timing-equaliser").ok());

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username is blank or too long.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the username is already registered,
    /// including when a concurrent registration wins the insert.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = Username::parse(username)?;
        validate_password(password)?;

        match self.find_by_username(username.as_str()).await {
            Ok(_) => return Err(AuthError::UserAlreadyExists),
            Err(AuthError::UserNotFound) => {}
            Err(e) => return Err(e),
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Login with username and password.
    ///
    /// Every failure, whatever its cause, is reported as
    /// `AuthError::InvalidCredentials`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let Ok(username) = Username::parse(username) else {
            equalise_timing(password);
            return Err(AuthError::InvalidCredentials);
        };

        let Some((user, password_hash)) = self.users.get_password_hash(&username).await? else {
            equalise_timing(password);
            return Err(AuthError::InvalidCredentials);
        };

        if !check_password(password, &password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Resolve a session's user id to the full user record.
    ///
    /// Returns `None` when the account no longer exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn load_user(&self, user_id: UserId) -> Result<Option<User>, AuthError> {
        Ok(self.users.get_by_id(user_id).await?)
    }

    /// Get a user by username. Also backs the duplicate check in `register`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no such user exists.
    pub async fn find_by_username(&self, username: &str) -> Result<User, AuthError> {
        let username = Username::parse(username).map_err(|_| AuthError::UserNotFound)?;
        self.users
            .get_by_username(&username)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Hash a password using Argon2id with a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Check a password against a stored PHC hash string.
///
/// Malformed hashes never match.
#[must_use]
pub fn check_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

fn equalise_timing(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = check_password(password, hash);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stockroom_core::{PasswordError, UsernameError};

    use super::*;
    use crate::db::test_pool;

    #[test]
    fn test_hash_is_salted_and_not_plaintext() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert!(!first.contains("secret1"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_check_password() {
        let hash = hash_password("secret1").unwrap();
        assert!(check_password("secret1", &hash));
        assert!(!check_password("secret2", &hash));
    }

    #[test]
    fn test_check_password_rejects_malformed_hash() {
        assert!(!check_password("secret1", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let pool = test_pool().await.unwrap();
        let auth = AuthService::new(&pool);

        let user = auth.register("alice", "abcdef").await.unwrap();
        let logged_in = auth.login("alice", "abcdef").await.unwrap();

        assert_eq!(user, logged_in);
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let pool = test_pool().await.unwrap();
        let auth = AuthService::new(&pool);

        auth.register("alice", "abcdef").await.unwrap();
        let err = auth.register("alice", "ghijkl").await.unwrap_err();

        assert!(matches!(err, AuthError::UserAlreadyExists));
        assert_eq!(UserRepository::new(&pool).count().await.unwrap(), 1);
        // The original password still works.
        assert!(auth.login("alice", "abcdef").await.is_ok());
    }

    #[tokio::test]
    async fn test_register_duplicate_ignores_surrounding_whitespace() {
        let pool = test_pool().await.unwrap();
        let auth = AuthService::new(&pool);

        auth.register("alice", "abcdef").await.unwrap();

        assert!(matches!(
            auth.register("  alice ", "ghijkl").await,
            Err(AuthError::UserAlreadyExists)
        ));
        assert!(auth.find_by_username("alice").await.is_ok());
        assert_eq!(UserRepository::new(&pool).count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let pool = test_pool().await.unwrap();
        let auth = AuthService::new(&pool);

        assert!(matches!(
            auth.register("", "abcdef").await,
            Err(AuthError::InvalidUsername(UsernameError::Empty))
        ));
        assert!(matches!(
            auth.register("alice", "").await,
            Err(AuthError::WeakPassword(PasswordError::Missing))
        ));
        assert!(matches!(
            auth.register("alice", "abc").await,
            Err(AuthError::WeakPassword(PasswordError::TooShort { min: 6 }))
        ));
        assert_eq!(UserRepository::new(&pool).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let pool = test_pool().await.unwrap();
        let auth = AuthService::new(&pool);
        auth.register("alice", "secret1").await.unwrap();

        let wrong_password = auth.login("alice", "secret2").await.unwrap_err();
        let unknown_user = auth.login("mallory", "secret1").await.unwrap_err();
        let blank_user = auth.login("", "secret1").await.unwrap_err();

        for err in [wrong_password, unknown_user, blank_user] {
            assert!(matches!(err, AuthError::InvalidCredentials));
            assert_eq!(
                err.user_message().as_deref(),
                Some("Invalid username or password.")
            );
        }
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let pool = test_pool().await.unwrap();
        let auth = AuthService::new(&pool);
        let user = auth.register("alice", "abcdef").await.unwrap();

        assert_eq!(auth.find_by_username(" alice ").await.unwrap(), user);
        assert!(matches!(
            auth.find_by_username("bob").await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_load_user_after_delete_is_none() {
        let pool = test_pool().await.unwrap();
        let auth = AuthService::new(&pool);
        let user = auth.register("alice", "abcdef").await.unwrap();

        assert!(auth.load_user(user.id).await.unwrap().is_some());
        UserRepository::new(&pool).delete(user.id).await.unwrap();
        assert!(auth.load_user(user.id).await.unwrap().is_none());
    }
}
