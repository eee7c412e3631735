//! Administrator model - credential records for tenant owners.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Administrator credential record.
///
/// `otp_code` and `otp_expires_at` form a single-slot reset challenge:
/// both are set together when a reset is requested and cleared together
/// when the password change consumes the code.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    /// Create a new administrator. Expects the email already normalized
    /// and the password already hashed.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            otp_code: None,
            otp_expires_at: None,
            created_at: Utc::now(),
        }
    }

    /// Convert to sanitized response (no credential material).
    pub fn sanitized(&self) -> AdminResponse {
        AdminResponse::from(self.clone())
    }
}

/// Administrator response for API (without sensitive fields).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Admin> for AdminResponse {
    fn from(a: Admin) -> Self {
        Self {
            id: a.id,
            email: a.email,
            name: a.name,
            created_at: a.created_at,
        }
    }
}
