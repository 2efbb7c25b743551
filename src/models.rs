//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains the dog record and the response bodies used by the API.

pub mod dog;

pub use dog::*;

use serde::Serialize;

/// Message-only response (`{"message": ...}`)
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validation error list (`{"errors": [...]}`)
#[derive(Debug, Serialize)]
pub struct ErrorListResponse {
    pub errors: Vec<String>,
}
