//! Persistence boundary for administrator and managed-user records.
//!
//! Services depend on the traits here as `Arc<dyn AdminStore>` /
//! `Arc<dyn ManagedUserStore>` so the PostgreSQL backend and the in-memory
//! test backend are interchangeable.

mod memory;
mod postgres;

pub use memory::{MemoryAdminStore, MemoryManagedUserStore};
pub use postgres::{PostgresAdminStore, PostgresManagedUserStore};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Admin, ManagedUser};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate record")]
    Duplicate,

    #[error("store backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Credential store for administrator records.
///
/// Email keys are expected pre-normalized (lowercased) by callers; the
/// store performs exact matches only.
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Liveness probe for the backend, surfaced by the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;

    async fn insert(&self, admin: &Admin) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError>;

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Overwrite the reset challenge slot in one statement. Any previously
    /// issued code is invalidated by this write.
    async fn set_otp(
        &self,
        admin_id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Set a new password hash and clear the challenge slot, conditional on
    /// the stored code still being `expected_code`. Returns false when the
    /// condition no longer holds (the code was already consumed or
    /// replaced), so a single code can never fund two password changes.
    async fn update_password_and_clear_otp(
        &self,
        admin_id: Uuid,
        password_hash: &str,
        expected_code: &str,
    ) -> Result<bool, StoreError>;
}

/// Directory store for managed-user records.
#[async_trait]
pub trait ManagedUserStore: Send + Sync {
    async fn insert(&self, user: &ManagedUser) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ManagedUser>, StoreError>;

    async fn exists_for_owner(&self, email: &str, owner_admin_id: Uuid)
        -> Result<bool, StoreError>;

    async fn list_by_owner(&self, owner_admin_id: Uuid) -> Result<Vec<ManagedUser>, StoreError>;

    /// Returns false when no row had this id.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}
