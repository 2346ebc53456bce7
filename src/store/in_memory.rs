//! In-memory record store.
//!
//! The one concrete store shipped in-repo; production deployments implement
//! [`RecordStore`] against their own database. Records are never deleted here —
//! expiry is evaluated at read time by the controller, and sweeping is an
//! external concern.

use super::{MarkUsed, RecordStore};
use crate::error::Result;
use crate::record::{NewOtpRecord, OtpRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Record store backed by a process-local map.
///
/// Cloning is cheap and shares the underlying map, so one store can serve
/// many concurrent flows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held. Test and diagnostics helper.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create(&self, record: NewOtpRecord) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let mut records = self.records.write().await;
        records.insert(id.clone(), record.into_record(id.clone()));
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<OtpRecord>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn mark_used_if_unused(&self, id: &str) -> Result<MarkUsed> {
        // Check and set under one write lock: this is the atomicity the
        // single-use guarantee rides on.
        let mut records = self.records.write().await;
        match records.get_mut(id) {
            Some(record) if !record.used => {
                record.used = true;
                record.verified = true;
                Ok(MarkUsed::Marked)
            }
            _ => Ok(MarkUsed::AlreadyUsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use chrono::{Duration, Utc};

    fn new_record() -> NewOtpRecord {
        let now = Utc::now();
        NewOtpRecord {
            channel_hash: "channel-digest".to_string(),
            channel: Channel::Email,
            otp_hash: "otp-digest".to_string(),
            expires_at: now + Duration::minutes(5),
            created_at: now,
            user_id: None,
            purpose: "authentication".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let store = InMemoryRecordStore::new();
        let a = store.create(new_record()).await.unwrap();
        let b = store.create(new_record()).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_get_round_trip() {
        let store = InMemoryRecordStore::new();
        let id = store.create(new_record()).await.unwrap();

        let record = store.get(&id).await.unwrap().unwrap();
        assert_eq!(record.id, id);
        assert!(!record.used);
        assert!(!record.verified);

        assert!(store.get("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mark_used_flips_once() {
        let store = InMemoryRecordStore::new();
        let id = store.create(new_record()).await.unwrap();

        assert_eq!(store.mark_used_if_unused(&id).await.unwrap(), MarkUsed::Marked);
        assert_eq!(
            store.mark_used_if_unused(&id).await.unwrap(),
            MarkUsed::AlreadyUsed
        );

        let record = store.get(&id).await.unwrap().unwrap();
        assert!(record.used);
        assert!(record.verified);
    }

    #[tokio::test]
    async fn test_mark_used_unknown_id() {
        let store = InMemoryRecordStore::new();
        assert_eq!(
            store.mark_used_if_unused("missing").await.unwrap(),
            MarkUsed::AlreadyUsed
        );
    }

    #[tokio::test]
    async fn test_concurrent_mark_used_single_winner() {
        let store = InMemoryRecordStore::new();
        let id = store.create(new_record()).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                store.mark_used_if_unused(&id).await.unwrap()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() == MarkUsed::Marked {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
