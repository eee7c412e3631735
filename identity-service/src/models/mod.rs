pub mod admin;
pub mod managed_user;

pub use admin::{Admin, AdminResponse};
pub use managed_user::{ManagedUser, ManagedUserResponse};
