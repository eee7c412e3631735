//! In-memory store implementations.
//!
//! Enforce the same uniqueness and conditional-update semantics as the
//! PostgreSQL backend so unit and router tests run without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Admin, ManagedUser};
use crate::store::{AdminStore, ManagedUserStore, StoreError};

#[derive(Default)]
pub struct MemoryAdminStore {
    rows: Mutex<HashMap<Uuid, Admin>>,
}

impl MemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, Admin>>, StoreError> {
        self.rows
            .lock()
            .map_err(|e| StoreError::Backend(anyhow::anyhow!("admin store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }

    async fn insert(&self, admin: &Admin) -> Result<(), StoreError> {
        let mut rows = self.lock()?;
        if rows.values().any(|a| a.email == admin.email) {
            return Err(StoreError::Duplicate);
        }
        rows.insert(admin.id, admin.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        Ok(self.lock()?.values().find(|a| a.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.values().any(|a| a.email == email))
    }

    async fn set_otp(
        &self,
        admin_id: Uuid,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut rows = self.lock()?;
        if let Some(admin) = rows.get_mut(&admin_id) {
            admin.otp_code = Some(code.to_string());
            admin.otp_expires_at = Some(expires_at);
        }
        Ok(())
    }

    async fn update_password_and_clear_otp(
        &self,
        admin_id: Uuid,
        password_hash: &str,
        expected_code: &str,
    ) -> Result<bool, StoreError> {
        let mut rows = self.lock()?;
        match rows.get_mut(&admin_id) {
            Some(admin) if admin.otp_code.as_deref() == Some(expected_code) => {
                admin.password_hash = password_hash.to_string();
                admin.otp_code = None;
                admin.otp_expires_at = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryManagedUserStore {
    rows: Mutex<HashMap<Uuid, ManagedUser>>,
}

impl MemoryManagedUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, ManagedUser>>, StoreError> {
        self.rows.lock().map_err(|e| {
            StoreError::Backend(anyhow::anyhow!("managed user store mutex poisoned: {}", e))
        })
    }
}

#[async_trait]
impl ManagedUserStore for MemoryManagedUserStore {
    async fn insert(&self, user: &ManagedUser) -> Result<(), StoreError> {
        let mut rows = self.lock()?;
        if rows
            .values()
            .any(|u| u.email == user.email && u.owner_admin_id == user.owner_admin_id)
        {
            return Err(StoreError::Duplicate);
        }
        rows.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ManagedUser>, StoreError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    async fn exists_for_owner(
        &self,
        email: &str,
        owner_admin_id: Uuid,
    ) -> Result<bool, StoreError> {
        Ok(self
            .lock()?
            .values()
            .any(|u| u.email == email && u.owner_admin_id == owner_admin_id))
    }

    async fn list_by_owner(&self, owner_admin_id: Uuid) -> Result<Vec<ManagedUser>, StoreError> {
        let mut users: Vec<ManagedUser> = self
            .lock()?
            .values()
            .filter(|u| u.owner_admin_id == owner_admin_id)
            .cloned()
            .collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.lock()?.remove(&id).is_some())
    }
}
