use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::Product;

/// Durable storage for the catalog.
///
/// Absence is reported as `Ok(None)` / `Ok(false)`, never as an error.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persists a new record. Fails with `Duplicated` when the id is taken.
    async fn insert(&self, product: &Product) -> Result<Uuid, RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError>;
    /// Overwrites the mutable fields of the record with `product.id`.
    /// Returns whether a record was affected.
    async fn update(&self, product: &Product) -> Result<bool, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError>;
}
