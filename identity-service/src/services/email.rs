use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;
use crate::services::ServiceError;

/// Out-of-band delivery channel for password reset codes.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send_reset_code(&self, to_email: &str, code: &str) -> Result<(), ServiceError>;
}

pub struct SmtpEmailer {
    config: SmtpConfig,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl SmtpEmailer {
    pub fn new(config: SmtpConfig) -> Result<Self, ServiceError> {
        if !config.enabled {
            return Ok(Self {
                config,
                transport: None,
            });
        }

        let creds = Credentials::new(config.user.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| ServiceError::Email(format!("Failed to create SMTP relay: {}", e)))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            config,
            transport: Some(transport),
        })
    }
}

#[async_trait]
impl EmailProvider for SmtpEmailer {
    async fn send_reset_code(&self, to_email: &str, code: &str) -> Result<(), ServiceError> {
        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| ServiceError::Email("SMTP provider is not enabled".to_string()))?;

        let from_mailbox: Mailbox =
            format!("{} <{}>", self.config.from_name, self.config.from_email)
                .parse()
                .map_err(|e| ServiceError::Email(format!("Invalid from address: {}", e)))?;

        let to_mailbox: Mailbox = to_email
            .parse()
            .map_err(|e| ServiceError::Email(format!("Invalid recipient: {}", e)))?;

        let body = format!(
            "Your password reset code is: {}\n\nThe code expires in 5 minutes. \
             If you did not request a reset, you can ignore this email.",
            code
        );

        let message = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject("Your password reset code")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| ServiceError::Email(format!("Failed to build message: {}", e)))?;

        transport
            .send(message)
            .await
            .map_err(|e| ServiceError::Email(format!("Failed to send email: {}", e)))?;

        tracing::info!(to = %to_email, "Reset code email sent");

        Ok(())
    }
}

/// Mock email provider for testing. Records the last delivery so tests can
/// read the code back instead of scraping an inbox.
pub struct MockEmailProvider {
    send_count: AtomicU64,
    last_send: Mutex<Option<(String, String)>>,
}

impl Default for MockEmailProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmailProvider {
    pub fn new() -> Self {
        Self {
            send_count: AtomicU64::new(0),
            last_send: Mutex::new(None),
        }
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }

    /// Last (recipient, code) pair handed to the channel, if any.
    pub fn last_send(&self) -> Option<(String, String)> {
        self.last_send.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn send_reset_code(&self, to_email: &str, code: &str) -> Result<(), ServiceError> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        *self
            .last_send
            .lock()
            .map_err(|e| ServiceError::Email(format!("Mock mailer mutex poisoned: {}", e)))? =
            Some((to_email.to_string(), code.to_string()));

        tracing::info!(to = %to_email, "[MOCK] Reset code email would be sent");

        Ok(())
    }
}
