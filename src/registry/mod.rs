// Host Registry - persistence boundary for tracked hostnames

pub mod memory;
pub mod sql;

use crate::Result;
use crate::config::DatabaseSettings;
use crate::deadline::Deadline;
use crate::error::DeadlineError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use memory::MemoryRegistry;
pub use sql::{DatabasePool, SqlRegistry};

/// A tracked hostname and the result of its latest check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub id: Option<i64>,
    pub hostname: String,
    #[serde(rename = "timelimit")]
    pub expiry_display: String,
    pub remaining_days: i64,
    #[serde(rename = "notification_days")]
    pub notification_threshold: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl HostRecord {
    /// Build an unsaved record from a fresh deadline
    pub fn new(hostname: impl Into<String>, deadline: &Deadline, notification_threshold: i64) -> Self {
        Self {
            id: None,
            hostname: hostname.into(),
            expiry_display: deadline.display_date.clone(),
            remaining_days: deadline.remaining_days,
            notification_threshold,
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether the stored remaining days are within the warning threshold
    pub fn within_threshold(&self) -> bool {
        self.remaining_days <= self.notification_threshold
    }
}

/// Storage for host records, keyed by hostname
#[async_trait]
pub trait HostRegistry: Send + Sync {
    /// Registered hostnames in listing order
    async fn list_hostnames(&self) -> Result<Vec<String>>;

    /// All records in listing order
    async fn list(&self) -> Result<Vec<HostRecord>>;

    /// Fetch one record, `HostNotFound` if absent
    async fn get(&self, hostname: &str) -> Result<HostRecord>;

    /// Store a new record and return it as persisted
    async fn insert(&self, record: &HostRecord) -> Result<HostRecord>;

    /// Replace the expiry fields of an existing record
    async fn update_expiry(&self, hostname: &str, display_date: &str, remaining_days: i64)
    -> Result<()>;

    /// Whether `hostname` is registered
    async fn contains(&self, hostname: &str) -> Result<bool> {
        match self.get(hostname).await {
            Ok(_) => Ok(true),
            Err(DeadlineError::HostNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}

/// Open the registry described by `settings`
pub async fn connect(settings: &DatabaseSettings) -> Result<Arc<dyn HostRegistry>> {
    if settings.url == "memory" {
        tracing::warn!("Using in-memory registry, hosts are lost on exit");
        return Ok(Arc::new(MemoryRegistry::new()));
    }

    let registry = SqlRegistry::connect(&settings.url, settings.max_connections).await?;
    Ok(Arc::new(registry))
}
