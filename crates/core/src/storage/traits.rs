use async_trait::async_trait;

use crate::identity::{Identity, Provisioned};

use super::Result;

/// Persistent registry of identities.
///
/// Rows are only ever inserted. Implementations must make [`get_or_create`]
/// atomic: two callers racing on the same unseen id both end up with the single
/// stored record.
///
/// [`get_or_create`]: IdentityRepository::get_or_create
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Checks whether an identity with this id is stored.
    async fn exists(&self, id: &str) -> Result<bool>;

    /// Loads the identity for `id`, provisioning and storing a new one if absent.
    ///
    /// Fails with `InvalidData` for an empty id.
    async fn get_or_create(&self, id: &str) -> Result<Provisioned>;

    /// Loads a stored identity. Fails with `NotFound` if there is none.
    async fn get_identity(&self, id: &str) -> Result<Identity>;

    /// Lists every stored identity id in insertion order.
    async fn list_ids(&self) -> Result<Vec<String>>;
}
