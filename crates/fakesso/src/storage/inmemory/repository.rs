//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use fakesso_core::identity::{provision_identity, Identity, Provisioned};
use fakesso_core::storage::{IdentityRepository, RepositoryError, Result};

#[derive(Debug, Default)]
struct Table {
    rows: HashMap<String, Identity>,
    /// Ids in insertion order.
    order: Vec<String>,
}

/// In-memory storage backend for testing.
///
/// Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryRepository {
    async fn exists(&self, id: &str) -> Result<bool> {
        let table = self.table.read().await;
        Ok(table.rows.contains_key(id))
    }

    async fn get_or_create(&self, id: &str) -> Result<Provisioned> {
        let mut table = self.table.write().await;
        if let Some(identity) = table.rows.get(id) {
            return Ok(Provisioned::Found(identity.clone()));
        }

        let identity = provision_identity(id)?;
        table.order.push(identity.id.clone());
        table.rows.insert(identity.id.clone(), identity.clone());
        Ok(Provisioned::Created(identity))
    }

    async fn get_identity(&self, id: &str) -> Result<Identity> {
        let table = self.table.read().await;
        table
            .rows
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "Identity",
                id: id.to_string(),
            })
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        let table = self.table.read().await;
        Ok(table.order.clone())
    }
}
