//! Dog record and its write models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::validation::whole_number;

/// A persisted dog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub breed: String,
    pub description: String,
}

/// Fields for a dog that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDog {
    pub name: String,
    pub age: i32,
    pub breed: String,
    pub description: String,
}

/// A value in a PATCH body that does not fit its column
#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{field}' has an unsupported value")]
pub struct FieldTypeError {
    pub field: String,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DogPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub breed: Option<String>,
    pub description: Option<String>,
}

impl DogPatch {
    /// Build a patch from an already key-checked body.
    ///
    /// Values are taken as sent: strings must be JSON strings and `age` must be
    /// a whole JSON number that fits the column. Anything else is refused.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, FieldTypeError> {
        let mut patch = Self::default();

        for (key, value) in body {
            let refused = || FieldTypeError { field: key.clone() };
            match key.as_str() {
                "name" => patch.name = Some(value.as_str().ok_or_else(refused)?.to_string()),
                "breed" => patch.breed = Some(value.as_str().ok_or_else(refused)?.to_string()),
                "description" => {
                    patch.description = Some(value.as_str().ok_or_else(refused)?.to_string())
                }
                "age" => {
                    let age = value
                        .as_f64()
                        .and_then(whole_number)
                        .ok_or_else(refused)?;
                    patch.age = Some(age);
                }
                _ => return Err(refused()),
            }
        }

        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.breed.is_none()
            && self.description.is_none()
    }
}
