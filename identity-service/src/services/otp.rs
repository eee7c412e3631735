use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;
use subtle::ConstantTimeEq;

use crate::config::OtpConfig;
use crate::models::Admin;
use crate::services::{EmailProvider, ServiceError};
use crate::store::AdminStore;

/// One-time reset challenge engine.
///
/// Each administrator has a single challenge slot; issuing a new code
/// overwrites whatever was outstanding. Validation never consumes the
/// code - consumption is the conditional store update that also changes
/// the password.
#[derive(Clone)]
pub struct OtpEngine {
    admins: Arc<dyn AdminStore>,
    email: Arc<dyn EmailProvider>,
    ttl_minutes: i64,
}

impl OtpEngine {
    pub fn new(admins: Arc<dyn AdminStore>, email: Arc<dyn EmailProvider>, config: &OtpConfig) -> Self {
        Self {
            admins,
            email,
            ttl_minutes: config.ttl_minutes,
        }
    }

    /// Issue a fresh 6-digit code, store it with its expiry in one
    /// overwriting update, and hand it to the delivery channel. The code
    /// itself is never part of any return value.
    pub async fn issue(&self, admin: &Admin) -> Result<(), ServiceError> {
        let code = generate_code();
        let expires_at = Utc::now() + Duration::minutes(self.ttl_minutes);

        self.admins.set_otp(admin.id, &code, expires_at).await?;

        // Delivery is best effort: the stored code stays valid either way,
        // and the administrator can request a fresh one if the email never
        // lands. The code is not logged.
        if let Err(e) = self.email.send_reset_code(&admin.email, &code).await {
            tracing::error!(error = %e, admin_id = %admin.id, "Failed to deliver reset code");
        }

        Ok(())
    }

    /// Check a submitted code against the administrator's outstanding
    /// challenge. Failure order: no challenge, then mismatch, then expiry.
    pub fn validate(&self, admin: &Admin, submitted: &str) -> Result<(), ServiceError> {
        let stored = admin
            .otp_code
            .as_deref()
            .ok_or(ServiceError::OtpNotRequested)?;

        if !bool::from(stored.as_bytes().ct_eq(submitted.as_bytes())) {
            return Err(ServiceError::OtpMismatch);
        }

        match admin.otp_expires_at {
            Some(expires_at) if Utc::now() < expires_at => Ok(()),
            _ => Err(ServiceError::OtpExpired),
        }
    }
}

fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(0..1_000_000))
}
