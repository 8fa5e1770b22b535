//! CRUD accessor that records calls and can be told to fail.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::MutationError;
use crate::models::RecordId;
use crate::traits::CrudAccessor;

/// A recorded mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum CrudCall<R> {
    Create(R),
    Update(RecordId, R),
    DeleteOne(RecordId),
    DeleteMany(Vec<RecordId>),
}

/// CRUD accessor whose DTOs are the row type itself. Create and update echo
/// the DTO back.
#[derive(Debug, Clone)]
pub struct RecordingCrud<R> {
    calls: Arc<Mutex<Vec<CrudCall<R>>>>,
    failure: Arc<Mutex<Option<MutationError>>>,
}

impl<R: Clone> RecordingCrud<R> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Make every following call fail with `error` (`None` to recover).
    pub fn set_failure(&self, error: Option<MutationError>) {
        *self.failure.lock().unwrap() = error;
    }

    pub fn calls(&self) -> Vec<CrudCall<R>> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: CrudCall<R>) -> Result<(), MutationError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<R: Clone> Default for RecordingCrud<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> CrudAccessor<R, R, R> for RecordingCrud<R>
where
    R: Clone + Send + Sync + 'static,
{
    async fn create(&self, dto: R) -> Result<R, MutationError> {
        self.record(CrudCall::Create(dto.clone()))?;
        Ok(dto)
    }

    async fn update(&self, id: &RecordId, dto: R) -> Result<R, MutationError> {
        self.record(CrudCall::Update(id.clone(), dto.clone()))?;
        Ok(dto)
    }

    async fn delete_one(&self, id: &RecordId) -> Result<(), MutationError> {
        self.record(CrudCall::DeleteOne(id.clone()))
    }

    async fn delete_many(&self, ids: &[RecordId]) -> Result<(), MutationError> {
        self.record(CrudCall::DeleteMany(ids.to_vec()))
    }
}
