//! In-memory dog store for handler tests

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use deadpool_postgres::PoolError;
use tokio::sync::RwLock;

use super::store::{DogStore, StoreError};
use crate::models::{Dog, DogPatch, NewDog};

fn apply(patch: DogPatch, dog: &mut Dog) {
    if let Some(name) = patch.name {
        dog.name = name;
    }
    if let Some(age) = patch.age {
        dog.age = age;
    }
    if let Some(breed) = patch.breed {
        dog.breed = breed;
    }
    if let Some(description) = patch.description {
        dog.description = description;
    }
}

#[derive(Default)]
struct Table {
    last_id: i32,
    dogs: BTreeMap<i32, Dog>,
}

/// Ids are assigned sequentially from 1 and never reused.
#[derive(Default)]
pub struct MemoryDogStore {
    table: RwLock<Table>,
    failing: AtomicBool,
}

impl MemoryDogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call fail as if the pool had been closed
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Pool(PoolError::Closed))
        } else {
            Ok(())
        }
    }
}

impl DogStore for MemoryDogStore {
    async fn list(&self) -> Result<Vec<Dog>, StoreError> {
        self.check()?;
        Ok(self.table.read().await.dogs.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Dog>, StoreError> {
        self.check()?;
        Ok(self.table.read().await.dogs.get(&id).cloned())
    }

    async fn create(&self, dog: NewDog) -> Result<Dog, StoreError> {
        self.check()?;
        let mut table = self.table.write().await;
        table.last_id += 1;
        let dog = Dog {
            id: table.last_id,
            name: dog.name,
            age: dog.age,
            breed: dog.breed,
            description: dog.description,
        };
        table.dogs.insert(dog.id, dog.clone());
        Ok(dog)
    }

    async fn update(&self, id: i32, patch: DogPatch) -> Result<Option<Dog>, StoreError> {
        self.check()?;
        let mut table = self.table.write().await;
        Ok(table.dogs.get_mut(&id).map(|dog| {
            apply(patch, dog);
            dog.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Dog>, StoreError> {
        self.check()?;
        Ok(self.table.write().await.dogs.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn new_dog(name: &str) -> NewDog {
        NewDog {
            name: name.to_string(),
            age: 2,
            breed: "Beagle".to_string(),
            description: "loud".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_not_reused() {
        let store = MemoryDogStore::new();

        let first = assert_ok!(store.create(new_dog("Rex")).await);
        let second = assert_ok!(store.create(new_dog("Max")).await);
        assert_eq!((first.id, second.id), (1, 2));

        assert_ok!(store.delete(2).await);
        let third = assert_ok!(store.create(new_dog("Bo")).await);
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_update_keeps_untouched_fields() {
        let store = MemoryDogStore::new();
        let rex = assert_ok!(store.create(new_dog("Rex")).await);

        let patch = DogPatch {
            breed: Some("Basset".to_string()),
            ..DogPatch::default()
        };
        let updated = assert_ok!(store.update(rex.id, patch).await).unwrap();

        assert_eq!(
            updated,
            Dog {
                breed: "Basset".to_string(),
                ..rex
            }
        );
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = MemoryDogStore::new();

        assert!(assert_ok!(store.find(9).await).is_none());
        assert!(assert_ok!(store.update(9, DogPatch::default()).await).is_none());
        assert!(assert_ok!(store.delete(9).await).is_none());
    }

    #[tokio::test]
    async fn test_fail_all() {
        let store = MemoryDogStore::new();
        store.fail_all();

        assert_err!(store.list().await);
        assert_err!(store.create(new_dog("Rex")).await);
    }
}
