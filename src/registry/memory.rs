// In-memory host registry

use crate::Result;
use crate::error::DeadlineError;
use crate::registry::{HostRecord, HostRegistry};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

/// Process-local registry keeping records in insertion order
#[derive(Default)]
pub struct MemoryRegistry {
    records: RwLock<Vec<HostRecord>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered hosts
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Change a stored threshold, as an external editor would
    pub async fn set_threshold(&self, hostname: &str, threshold: i64) -> Result<()> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.hostname == hostname)
            .ok_or_else(|| DeadlineError::HostNotFound {
                hostname: hostname.to_string(),
            })?;

        record.notification_threshold = threshold;
        Ok(())
    }
}

#[async_trait]
impl HostRegistry for MemoryRegistry {
    async fn list_hostnames(&self) -> Result<Vec<String>> {
        let records = self.records.read().await;
        Ok(records.iter().map(|r| r.hostname.clone()).collect())
    }

    async fn list(&self) -> Result<Vec<HostRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, hostname: &str) -> Result<HostRecord> {
        let records = self.records.read().await;
        records
            .iter()
            .find(|r| r.hostname == hostname)
            .cloned()
            .ok_or_else(|| DeadlineError::HostNotFound {
                hostname: hostname.to_string(),
            })
    }

    async fn insert(&self, record: &HostRecord) -> Result<HostRecord> {
        let mut records = self.records.write().await;

        if records.iter().any(|r| r.hostname == record.hostname) {
            return Err(DeadlineError::HostAlreadyRegistered {
                hostname: record.hostname.clone(),
            });
        }

        let now = Utc::now();
        let stored = HostRecord {
            id: Some(records.len() as i64 + 1),
            created_at: Some(now),
            updated_at: Some(now),
            ..record.clone()
        };

        records.push(stored.clone());
        Ok(stored)
    }

    async fn update_expiry(
        &self,
        hostname: &str,
        display_date: &str,
        remaining_days: i64,
    ) -> Result<()> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.hostname == hostname)
            .ok_or_else(|| DeadlineError::HostNotFound {
                hostname: hostname.to_string(),
            })?;

        record.expiry_display = display_date.to_string();
        record.remaining_days = remaining_days;
        record.updated_at = Some(Utc::now());

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
