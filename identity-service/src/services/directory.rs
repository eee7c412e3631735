use std::sync::Arc;

use uuid::Uuid;

use crate::models::ManagedUser;
use crate::services::ServiceError;
use crate::store::{ManagedUserStore, StoreError};
use crate::utils::normalize_email;

/// Per-administrator directory of managed users.
///
/// Every operation is scoped to the calling administrator; records owned
/// by someone else are invisible to reads and off limits to writes.
#[derive(Clone)]
pub struct DirectoryService {
    users: Arc<dyn ManagedUserStore>,
}

impl DirectoryService {
    pub fn new(users: Arc<dyn ManagedUserStore>) -> Self {
        Self { users }
    }

    pub async fn add_user(
        &self,
        owner_admin_id: Uuid,
        name: &str,
        email: &str,
    ) -> Result<ManagedUser, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("Name must not be empty".to_string()));
        }

        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ServiceError::Validation("Email must not be empty".to_string()));
        }

        if self.users.exists_for_owner(&email, owner_admin_id).await? {
            return Err(ServiceError::DuplicateMember);
        }

        let user = ManagedUser::new(name.to_string(), email, owner_admin_id);

        match self.users.insert(&user).await {
            Ok(()) => {}
            Err(StoreError::Duplicate) => return Err(ServiceError::DuplicateMember),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user.id, admin_id = %owner_admin_id, "Managed user created");

        Ok(user)
    }

    pub async fn list_users(&self, owner_admin_id: Uuid) -> Result<Vec<ManagedUser>, ServiceError> {
        let users = self.users.list_by_owner(owner_admin_id).await?;
        Ok(users)
    }

    pub async fn delete_user(
        &self,
        id: Uuid,
        requesting_admin_id: Uuid,
    ) -> Result<(), ServiceError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        if user.owner_admin_id != requesting_admin_id {
            return Err(ServiceError::NotOwner);
        }

        let deleted = self.users.delete_by_id(id).await?;
        if !deleted {
            // Raced with another delete between the lookup and here.
            return Err(ServiceError::UserNotFound);
        }

        tracing::info!(user_id = %id, admin_id = %requesting_admin_id, "Managed user deleted");

        Ok(())
    }
}
