//! # User Repository
//!
//! Database operations for registered customers.
//!
//! In scope, users are written exactly once (registration) and read by
//! email (login) or by id (purchase guard). No updates, no deletes.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use bookery_core::User;

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, created_at";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user (registration).
    ///
    /// ## Arguments
    /// * `user` - User to insert; `password_hash` must already be an argon2
    ///   hash - this layer never sees plain passwords
    ///
    /// ## Returns
    /// * `Ok(User)` - Inserted user
    /// * `Err(DbError::UniqueViolation)` - Email already registered
    pub async fn insert(&self, user: &User) -> DbResult<User> {
        debug!(id = %user.id, email = %user.email, "Inserting user");

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                id, first_name, last_name, email, password_hash, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user.clone()),
            // Re-shape the raw constraint message into something the API
            // can show ("Duplicate email: 'x' already exists")
            Err(e) => match DbError::from(e) {
                DbError::UniqueViolation { .. } => Err(DbError::duplicate("email", &user.email)),
                other => Err(other),
            },
        }
    }

    /// Gets a user by email (login lookup).
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - User found (password verification is the caller's job)
    /// * `Ok(None)` - No account with that email
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user: Option<User> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user: Option<User> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Counts total users (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new user ID.
pub fn generate_user_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;

    fn sample_user(email: &str) -> User {
        User {
            id: generate_user_id(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$dGVzdHNhbHQ$hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user = sample_user("ada@example.com");

        db.users().insert(&user).await.unwrap();

        let by_email = db
            .users()
            .get_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);
        assert_eq!(by_email.first_name, "Ada");

        let by_id = db.users().get_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_unknown_email_returns_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let found = db.users().get_by_email("nobody@example.com").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.users()
            .insert(&sample_user("ada@example.com"))
            .await
            .unwrap();

        let err = db
            .users()
            .insert(&sample_user("ada@example.com"))
            .await
            .unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "email");
                assert_eq!(value, "ada@example.com");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }
}
