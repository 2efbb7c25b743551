//! Persistence port for dog records

use std::future::Future;

use thiserror::Error;

use crate::models::{Dog, DogPatch, NewDog};

/// Failure of a persistence call
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
}

/// Repository for the dogs table, keyed by integer id.
///
/// Lookups by id return `None` when no record matches.
pub trait DogStore: Send + Sync + 'static {
    /// All dogs, in id order
    fn list(&self) -> impl Future<Output = Result<Vec<Dog>, StoreError>> + Send;

    /// First dog with the given id
    fn find(&self, id: i32) -> impl Future<Output = Result<Option<Dog>, StoreError>> + Send;

    /// Insert a dog; the store assigns its id
    fn create(&self, dog: NewDog) -> impl Future<Output = Result<Dog, StoreError>> + Send;

    /// Apply a partial update and return the updated record
    fn update(
        &self,
        id: i32,
        patch: DogPatch,
    ) -> impl Future<Output = Result<Option<Dog>, StoreError>> + Send;

    /// Remove a dog and return what was removed
    fn delete(&self, id: i32) -> impl Future<Output = Result<Option<Dog>, StoreError>> + Send;
}
