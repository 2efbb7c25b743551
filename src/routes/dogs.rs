//! Dog route handlers
//!
//! Each handler validates its input, makes one call to the dog store and maps
//! the outcome to a response. Failures of create, update and delete are
//! logged and answered with the generic responses of [`AppError`].

use crate::db::DogStore;
use crate::error::{ApiResult, AppError};
use crate::models::{Dog, DogPatch};
use crate::state::SharedState;
use crate::validation::{parse_number, validate_new_dog, validate_patch, whole_number};
use axum::{
    body::Bytes,
    extract::{FromRequest, Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// JSON object request body.
///
/// A request without a JSON content type, or with an empty body, is read as
/// an empty object.
pub struct JsonObject(pub Map<String, Value>);

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

impl<S: Send + Sync> FromRequest<S> for JsonObject {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        if !is_json || bytes.is_empty() {
            return Ok(Self(Map::new()));
        }

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            AppError::BadRequest(format!("Failed to parse the request body as JSON: {e}"))
        })
    }
}

/// List every dog
pub async fn list_dogs<S: DogStore>(
    State(state): State<SharedState<S>>,
) -> ApiResult<Json<Vec<Dog>>> {
    let dogs = state.dogs.list().await?;

    debug!("Listed {} dogs", dogs.len());
    Ok(Json(dogs))
}

/// Fetch one dog by id
pub async fn get_dog<S: DogStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Dog>> {
    let id = parse_number(&id);
    if id.is_nan() {
        return Err(AppError::InvalidId);
    }

    // Numeric ids that are not whole can never match a record
    let id = whole_number(id).ok_or(AppError::DogNotFound)?;

    state
        .dogs
        .find(id)
        .await?
        .map(Json)
        .ok_or(AppError::DogNotFound)
}

/// Create a dog from a validated body
pub async fn create_dog<S: DogStore>(
    State(state): State<SharedState<S>>,
    JsonObject(body): JsonObject,
) -> ApiResult<(StatusCode, Json<Dog>)> {
    let draft = validate_new_dog(&body).map_err(AppError::InvalidDog)?;

    let Some(new_dog) = draft.into_new_dog() else {
        warn!("Refusing to store dog: age is not a whole number");
        return Err(AppError::CreateFailed);
    };

    match state.dogs.create(new_dog).await {
        Ok(dog) => {
            info!("Created dog {}", dog.id);
            Ok((StatusCode::CREATED, Json(dog)))
        }
        Err(e) => {
            warn!("Failed to create dog: {}", e);
            Err(AppError::CreateFailed)
        }
    }
}

/// Partially update a dog. Answers 201 with the updated record.
pub async fn update_dog<S: DogStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> ApiResult<(StatusCode, Json<Dog>)> {
    validate_patch(&body).map_err(AppError::InvalidUpdate)?;

    let Some(id) = whole_number(parse_number(&id)) else {
        debug!("Update for unmatchable id");
        return Err(AppError::UpdateFailed);
    };

    let patch = DogPatch::from_body(&body).map_err(|e| {
        warn!("Failed to update dog {}: {}", id, e);
        AppError::UpdateFailed
    })?;

    match state.dogs.update(id, patch).await {
        Ok(Some(dog)) => {
            info!("Updated dog {}", dog.id);
            Ok((StatusCode::CREATED, Json(dog)))
        }
        Ok(None) => {
            debug!("No dog {} to update", id);
            Err(AppError::UpdateFailed)
        }
        Err(e) => {
            warn!("Failed to update dog {}: {}", id, e);
            Err(AppError::UpdateFailed)
        }
    }
}

/// Delete a dog and return the removed record.
///
/// An id of `0` is rejected together with non-numeric ids.
pub async fn delete_dog<S: DogStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Dog>> {
    let id = parse_number(&id);
    if id == 0.0 || id.is_nan() {
        return Err(AppError::InvalidId);
    }

    let id = whole_number(id).ok_or(AppError::DeleteFailed)?;

    match state.dogs.delete(id).await {
        Ok(Some(dog)) => {
            info!("Deleted dog {}", dog.id);
            Ok(Json(dog))
        }
        Ok(None) => {
            debug!("No dog {} to delete", id);
            Err(AppError::DeleteFailed)
        }
        Err(e) => {
            warn!("Failed to delete dog {}: {}", id, e);
            Err(AppError::DeleteFailed)
        }
    }
}
