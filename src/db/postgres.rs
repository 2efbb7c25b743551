//! PostgreSQL-backed dog store

use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tracing::debug;

use super::queries::{DELETE_DOG, FIND_DOG, INSERT_DOG, LIST_DOGS, UPDATE_DOG};
use super::store::{DogStore, StoreError};
use crate::models::{Dog, DogPatch, NewDog};

pub struct PgDogStore {
    pool: Pool,
}

impl PgDogStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn dog_from_row(row: &Row) -> Dog {
    Dog {
        id: row.get("id"),
        name: row.get("name"),
        age: row.get("age"),
        breed: row.get("breed"),
        description: row.get("description"),
    }
}

impl DogStore for PgDogStore {
    async fn list(&self) -> Result<Vec<Dog>, StoreError> {
        let client = self.pool.get().await?;
        let rows = client.query(LIST_DOGS, &[]).await?;

        debug!("Fetched {} dogs", rows.len());
        Ok(rows.iter().map(dog_from_row).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Dog>, StoreError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(FIND_DOG, &[&id]).await?;

        Ok(row.as_ref().map(dog_from_row))
    }

    async fn create(&self, dog: NewDog) -> Result<Dog, StoreError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                INSERT_DOG,
                &[&dog.name, &dog.age, &dog.breed, &dog.description],
            )
            .await?;

        Ok(dog_from_row(&row))
    }

    async fn update(&self, id: i32, patch: DogPatch) -> Result<Option<Dog>, StoreError> {
        if patch.is_empty() {
            return self.find(id).await;
        }

        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                UPDATE_DOG,
                &[
                    &id,
                    &patch.name,
                    &patch.age,
                    &patch.breed,
                    &patch.description,
                ],
            )
            .await?;

        Ok(row.as_ref().map(dog_from_row))
    }

    async fn delete(&self, id: i32) -> Result<Option<Dog>, StoreError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(DELETE_DOG, &[&id]).await?;

        Ok(row.as_ref().map(dog_from_row))
    }
}
