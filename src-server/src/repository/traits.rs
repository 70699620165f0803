//! Repository Traits
//!
//! Generic CRUD contract implemented by each table's repository.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity};

/// Create, list and delete records of one entity type
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert a record carrying its client-generated id
    async fn create(&self, entity: &T) -> DomainResult<()>;

    /// All records, in the table's listing order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Deleting an unknown id is not an error
    async fn delete(&self, id: &str) -> DomainResult<()>;
}

/// Repositories whose records can be replaced in place
#[async_trait]
pub trait MutableRepository<T: Entity>: Repository<T> {
    /// Overwrite the editable fields of the record with `id`; no-op when
    /// the record is gone
    async fn update(&self, id: &str, entity: &T) -> DomainResult<()>;
}
