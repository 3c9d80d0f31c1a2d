//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository for testing
#[derive(Clone, Default)]
pub struct MockTokenRepository {
    records: Arc<RwLock<HashMap<Uuid, RefreshTokenRecord>>>,
    fail_creates: Arc<RwLock<bool>>,
    fail_deletes: Arc<RwLock<bool>>,
}

impl MockTokenRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `create` calls fail with a persistence error
    pub async fn fail_next_creates(&self) {
        *self.fail_creates.write().await = true;
    }

    /// Make subsequent `delete` calls fail with a persistence error
    pub async fn fail_next_deletes(&self) {
        *self.fail_deletes.write().await = true;
    }

    /// Number of records currently stored
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Inserts a record directly, bypassing `create`
    pub async fn insert(&self, record: RefreshTokenRecord) {
        self.records.write().await.insert(record.id, record);
    }

    /// Records belonging to one user, for multi-session assertions
    pub async fn records_for_user(&self, user_id: Uuid) -> Vec<RefreshTokenRecord> {
        self.records
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn create(&self, user_id: Uuid, ttl: Duration) -> Result<RefreshTokenRecord, DomainError> {
        if *self.fail_creates.read().await {
            return Err(DomainError::Internal {
                message: "token store unavailable".to_string(),
            });
        }

        let record = RefreshTokenRecord::new(user_id, ttl);
        self.records.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        if *self.fail_deletes.read().await {
            return Err(DomainError::Internal {
                message: "token store unavailable".to_string(),
            });
        }

        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired());
        Ok(before - records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = MockTokenRepository::new();
        let record = repo.create(Uuid::new_v4(), Duration::days(365)).await.unwrap();

        assert!(repo.delete(record.id).await.unwrap());
        assert!(!repo.delete(record.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_expired_keeps_live_records() {
        let repo = MockTokenRepository::new();
        let live = repo.create(Uuid::new_v4(), Duration::days(365)).await.unwrap();
        repo.create(Uuid::new_v4(), Duration::seconds(-5)).await.unwrap();

        let deleted = repo.delete_expired().await.unwrap();

        assert_eq!(deleted, 1);
        assert!(repo.find_by_id(live.id).await.unwrap().is_some());
    }
}
