//! MySQL implementation of the UserRepository trait.
//!
//! Persists user accounts in the `users` table. UUIDs are stored as
//! CHAR(36) strings and the role as its lowercase name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use auth_core::domain::entities::user::{User, UserRole};
use auth_core::errors::{AuthError, DomainError};
use auth_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        let role: String = row.try_get("role").map_err(|e| DomainError::Internal {
            message: format!("Failed to get role: {}", e),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            first_name: row.try_get("first_name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get first_name: {}", e),
            })?,
            last_name: row.try_get("last_name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get last_name: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            password_hash: row.try_get("password_hash").map_err(|e| {
                DomainError::Internal {
                    message: format!("Failed to get password_hash: {}", e),
                }
            })?,
            role: UserRole::parse(&role).ok_or_else(|| DomainError::Internal {
                message: format!("Unknown role in users table: {}", role),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, first_name, last_name, email, password_hash, role, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(user),
            // The unique index on email is the authoritative duplicate check
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AuthError::EmailTaken.into())
            }
            Err(e) => Err(DomainError::Internal {
                message: format!("Failed to create user: {}", e),
            }),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, first_name, last_name, email, password_hash, role, created_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user by id: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, first_name, last_name, email, password_hash, role, created_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user by email: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}
