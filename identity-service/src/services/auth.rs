use std::sync::Arc;

use crate::models::Admin;
use crate::services::{OtpEngine, PolicyService, ServiceError};
use crate::store::{AdminStore, StoreError};
use crate::utils::{hash_password, normalize_email, verify_password, Password, PasswordHashString};

/// Credential manager for administrator accounts.
///
/// Owns registration, login, and the two-step password reset. Token
/// minting stays with the transport layer; login only proves the
/// credentials and returns the record.
#[derive(Clone)]
pub struct AuthService {
    admins: Arc<dyn AdminStore>,
    otp: OtpEngine,
}

impl AuthService {
    pub fn new(admins: Arc<dyn AdminStore>, otp: OtpEngine) -> Self {
        Self { admins, otp }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Admin, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("Name must not be empty".to_string()));
        }

        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ServiceError::Validation("Email must not be empty".to_string()));
        }

        PolicyService::validate_password(password)?;

        if self.admins.email_exists(&email).await? {
            return Err(ServiceError::EmailTaken);
        }

        let password_hash = hash_password(&Password::new(password.to_string()))
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Password hashing error: {}", e)))?;

        let admin = Admin::new(name.to_string(), email, password_hash.into_string());

        // The unique index closes the race two concurrent registrations
        // would otherwise win together.
        match self.admins.insert(&admin).await {
            Ok(()) => {}
            Err(StoreError::Duplicate) => return Err(ServiceError::EmailTaken),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(admin_id = %admin.id, "Administrator registered");

        Ok(admin)
    }

    /// Verify credentials and return the record for token issuance by the
    /// caller. Unknown email and wrong password are indistinguishable.
    pub async fn login(&self, email: &str, password: &str) -> Result<Admin, ServiceError> {
        let email = normalize_email(email);

        let admin = self
            .admins
            .find_by_email(&email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        verify_password(
            &Password::new(password.to_string()),
            &PasswordHashString::new(admin.password_hash.clone()),
        )
        .map_err(|_| ServiceError::InvalidCredentials)?;

        Ok(admin)
    }

    pub async fn request_reset(&self, email: &str) -> Result<(), ServiceError> {
        let email = normalize_email(email);

        let admin = self
            .admins
            .find_by_email(&email)
            .await?
            .ok_or(ServiceError::AdminNotFound)?;

        self.otp.issue(&admin).await?;

        tracing::info!(admin_id = %admin.id, "Password reset requested");

        Ok(())
    }

    pub async fn complete_reset(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), ServiceError> {
        let email = normalize_email(email);

        let admin = self
            .admins
            .find_by_email(&email)
            .await?
            .ok_or(ServiceError::AdminNotFound)?;

        self.otp.validate(&admin, code)?;

        PolicyService::validate_password(new_password)?;

        let password_hash = hash_password(&Password::new(new_password.to_string()))
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Password hashing error: {}", e)))?;

        let consumed = self
            .admins
            .update_password_and_clear_otp(admin.id, password_hash.as_str(), code)
            .await?;

        // The conditional update lost to a concurrent reset or a fresh
        // issuance; the code in hand no longer funds a change.
        if !consumed {
            return Err(ServiceError::OtpNotRequested);
        }

        tracing::info!(admin_id = %admin.id, "Password reset successful");

        Ok(())
    }
}
