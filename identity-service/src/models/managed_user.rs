//! Managed user model - directory entries owned by an administrator.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Directory entry scoped to the administrator that created it.
/// Ownership is set once at creation and never reassigned.
#[derive(Debug, Clone, FromRow)]
pub struct ManagedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub owner_admin_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ManagedUser {
    /// Create a new managed user. Expects the email already normalized.
    pub fn new(name: String, email: String, owner_admin_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            owner_admin_id,
            created_at: Utc::now(),
        }
    }
}

/// Managed user response for API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ManagedUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<ManagedUser> for ManagedUserResponse {
    fn from(u: ManagedUser) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at,
        }
    }
}
