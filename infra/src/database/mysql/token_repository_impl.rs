//! MySQL implementation of the TokenRepository trait.
//!
//! Persists refresh token records in the `refresh_tokens` table. A row is
//! the revocation handle for one refresh grant: deleting it invalidates
//! the corresponding token on its next verification.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use auth_core::domain::entities::token::RefreshTokenRecord;
use auth_core::errors::DomainError;
use auth_core::repositories::TokenRepository;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshTokenRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshTokenRecord, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get user_id: {}", e),
        })?;

        Ok(RefreshTokenRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid record UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn create(
        &self,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let record = RefreshTokenRecord::new(user_id, ttl);

        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, created_at, expires_at
            ) VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(record.created_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create refresh token record: {}", e),
            })?;

        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, created_at, expires_at
            FROM refresh_tokens
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find refresh token record: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let query = "DELETE FROM refresh_tokens WHERE id = ?";

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete refresh token record: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let query = "DELETE FROM refresh_tokens WHERE expires_at <= ?";

        let result = sqlx::query(query)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete expired records: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }
}
