pub mod email;
pub mod password;
pub mod validation;

pub use email::normalize_email;
pub use password::{hash_password, verify_password, Password, PasswordHashString};
pub use validation::ValidatedJson;
