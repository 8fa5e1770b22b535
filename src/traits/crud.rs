//! Create/update/delete capability.

use async_trait::async_trait;

use crate::error::MutationError;
use crate::models::RecordId;

/// Mutations on the collection behind a list.
///
/// `C` is the create DTO, `U` the update DTO.
#[async_trait]
pub trait CrudAccessor<R, C, U>: Send + Sync {
    async fn create(&self, dto: C) -> Result<R, MutationError>;

    async fn update(&self, id: &RecordId, dto: U) -> Result<R, MutationError>;

    async fn delete_one(&self, id: &RecordId) -> Result<(), MutationError>;

    async fn delete_many(&self, ids: &[RecordId]) -> Result<(), MutationError>;
}
