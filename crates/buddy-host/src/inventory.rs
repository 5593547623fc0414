//! Integration inventory backends.
//!
//! The inventory is the list of integrations a host knows about. It answers
//! type lookups made through the `getIntegrations` query.

use crate::error::HostError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// One integration as listed by the inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntegrationRecord {
    pub hash_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub integration_type: String,
}

impl IntegrationRecord {
    pub fn new(
        hash_id: impl Into<String>,
        name: impl Into<String>,
        integration_type: impl Into<String>,
    ) -> Self {
        Self {
            hash_id: hash_id.into(),
            name: name.into(),
            integration_type: integration_type.into(),
        }
    }
}

/// Trait for inventory backends.
#[async_trait]
pub trait IntegrationInventory: Send + Sync {
    /// List every known integration, in declaration order.
    async fn list(&self) -> Result<Vec<IntegrationRecord>, HostError>;

    /// Record a newly declared integration.
    fn insert(&self, record: IntegrationRecord) -> Result<(), HostError>;
}

/// Inventory kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    records: RwLock<Vec<IntegrationRecord>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inventory pre-populated with existing integrations.
    pub fn with_records(records: Vec<IntegrationRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl IntegrationInventory for InMemoryInventory {
    async fn list(&self) -> Result<Vec<IntegrationRecord>, HostError> {
        let records = self.records.read().map_err(|e| {
            HostError::Unavailable(format!("Failed to acquire inventory read lock: {}", e))
        })?;
        Ok(records.clone())
    }

    fn insert(&self, record: IntegrationRecord) -> Result<(), HostError> {
        let mut records = self.records.write().map_err(|e| {
            HostError::Unavailable(format!("Failed to acquire inventory write lock: {}", e))
        })?;
        records.push(record);
        Ok(())
    }
}
