use service_core::error::AppError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("User already exists for this administrator")]
    DuplicateMember,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Administrator not found")]
    AdminNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("User belongs to a different administrator")]
    NotOwner,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("No reset code outstanding")]
    OtpNotRequested,

    #[error("Incorrect reset code")]
    OtpMismatch,

    #[error("Reset code expired")]
    OtpExpired,

    #[error("Email error: {0}")]
    Email(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            ServiceError::EmailTaken => {
                AppError::Conflict(anyhow::anyhow!("Email already registered"))
            }
            ServiceError::DuplicateMember => {
                AppError::Conflict(anyhow::anyhow!("User already exists for this administrator"))
            }
            ServiceError::InvalidCredentials => {
                AppError::Unauthorized(anyhow::anyhow!("Invalid email or password"))
            }
            ServiceError::AdminNotFound => {
                AppError::NotFound(anyhow::anyhow!("Administrator not found"))
            }
            ServiceError::UserNotFound => AppError::NotFound(anyhow::anyhow!("User not found")),
            ServiceError::NotOwner => {
                AppError::Forbidden(anyhow::anyhow!("User belongs to a different administrator"))
            }
            ServiceError::InvalidToken => AppError::Unauthorized(anyhow::anyhow!("Invalid token")),
            ServiceError::TokenExpired => AppError::Unauthorized(anyhow::anyhow!("Token expired")),
            ServiceError::OtpNotRequested => {
                AppError::BadRequest(anyhow::anyhow!("No reset code outstanding"))
            }
            ServiceError::OtpMismatch => {
                AppError::BadRequest(anyhow::anyhow!("Incorrect reset code"))
            }
            ServiceError::OtpExpired => AppError::BadRequest(anyhow::anyhow!("Reset code expired")),
            ServiceError::Email(e) => AppError::EmailError(e),
            ServiceError::Store(StoreError::Duplicate) => {
                AppError::Conflict(anyhow::anyhow!("Duplicate record"))
            }
            ServiceError::Store(StoreError::Backend(e)) => AppError::DatabaseError(e),
            ServiceError::Internal(e) => AppError::InternalError(e),
        }
    }
}
