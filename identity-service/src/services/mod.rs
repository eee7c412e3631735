//! Services layer for identity-service.
//!
//! Business logic for administrator credentials, reset challenges, and
//! the per-administrator user directory.

mod auth;
mod directory;
mod email;
pub mod error;
mod otp;
mod policy;
mod token;

pub use auth::AuthService;
pub use directory::DirectoryService;
pub use email::{EmailProvider, MockEmailProvider, SmtpEmailer};
pub use error::ServiceError;
pub use otp::OtpEngine;
pub use policy::{PolicyError, PolicyService};
pub use token::{TokenClaims, TokenService};
