//!
//! # Error Handling
//!
//! Two layers of errors live here.
//!
//! `StoreError` is what the in-memory stores and the auth service return. Every
//! store operation hands back a `Result<_, StoreError>`; a failed operation never
//! leaves partial writes behind.
//!
//! `AppError` is the HTTP-facing error. It implements `actix_web::error::ResponseError`
//! so handlers can return it directly, and it provides `From` conversions for
//! `StoreError`, `validator::ValidationErrors`, and `actix_web::error::BlockingError`,
//! allowing for easy conversion using the `?` operator.

use actix_web::{error::BlockingError, error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use thiserror::Error;
use validator::ValidationErrors;

/// Why a single task or user field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// The field is blank after trimming whitespace.
    EmptyField,
    /// The field is shorter than its minimum length.
    TooShort,
    /// The field is longer than its maximum length.
    TooLong,
    /// The field is not one of the recognized values.
    InvalidEnum,
}

/// A caller-correctable defect in one field of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.reason {
            ValidationReason::EmptyField => write!(f, "{} must not be empty", self.field),
            ValidationReason::TooShort => write!(f, "{} is too short", self.field),
            ValidationReason::TooLong => write!(f, "{} is too long", self.field),
            ValidationReason::InvalidEnum => write!(f, "{} is invalid", self.field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors returned by `UserStore` and `TaskStore`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("not found")]
    NotFound,
    #[error("username already exists")]
    UsernameTaken,
    /// Deliberately says nothing about which half of the credentials was wrong.
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<bcrypt::BcryptError> for StoreError {
    fn from(error: bcrypt::BcryptError) -> StoreError {
        StoreError::Internal(format!("password hashing failed: {}", error))
    }
}

/// Represents all possible errors that can surface from an HTTP handler.
///
/// Each variant corresponds to a specific HTTP status and carries the message
/// that ends up in the JSON body.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed or is required but missing (HTTP 401).
    Unauthorized(String),
    /// Malformed or conflicting request (HTTP 400).
    BadRequest(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Input failed validation (HTTP 422 Unprocessable Entity).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
        }
    }
}

/// Maps store rejections onto HTTP semantics.
///
/// Token failures collapse into one 401 message; which check failed is logged
/// by the auth service, never reported to the caller. Internal details are
/// logged here and replaced with a generic message.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::Validation(e) => AppError::ValidationError(e.to_string()),
            StoreError::NotFound => AppError::NotFound("Resource not found".into()),
            StoreError::UsernameTaken => AppError::BadRequest("User already exists".into()),
            StoreError::InvalidCredentials => {
                AppError::Unauthorized("Invalid username or password".into())
            }
            StoreError::InvalidSignature | StoreError::Expired => {
                AppError::Unauthorized("Invalid or expired token".into())
            }
            StoreError::Internal(msg) => {
                log::error!("internal store error: {}", msg);
                AppError::InternalServerError("Internal server error".into())
            }
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// The blocking pool went away or the closure panicked.
impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        log::error!("blocking task failed: {}", error);
        AppError::InternalServerError("Internal server error".into())
    }
}
