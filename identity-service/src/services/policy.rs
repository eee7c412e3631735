//! Password policy validation.

use crate::services::ServiceError;

const PASSWORD_MIN_LENGTH: usize = 8;
const SPECIAL_CHARS: &str = "!@#$%^&*()-_=+[]{}|\\;:'\",.<>/?`~";

/// Errors related to password policy validation.
#[derive(Debug, Clone)]
pub enum PolicyError {
    PasswordTooShort { actual_length: usize },
    PasswordMissingLowercase,
    PasswordMissingUppercase,
    PasswordMissingNumber,
    PasswordMissingSpecial,
}

impl std::fmt::Display for PolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyError::PasswordTooShort { actual_length } => {
                write!(
                    f,
                    "Password must be at least {} characters (got {})",
                    PASSWORD_MIN_LENGTH, actual_length
                )
            }
            PolicyError::PasswordMissingLowercase => {
                write!(f, "Password must contain at least one lowercase letter")
            }
            PolicyError::PasswordMissingUppercase => {
                write!(f, "Password must contain at least one uppercase letter")
            }
            PolicyError::PasswordMissingNumber => {
                write!(f, "Password must contain at least one number")
            }
            PolicyError::PasswordMissingSpecial => {
                write!(f, "Password must contain at least one special character")
            }
        }
    }
}

impl std::error::Error for PolicyError {}

impl From<PolicyError> for ServiceError {
    fn from(err: PolicyError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

/// Password policy validation service.
#[derive(Debug, Clone)]
pub struct PolicyService;

impl PolicyService {
    /// Validate a password against the account password policy.
    ///
    /// Returns Ok(()) if the password meets all requirements,
    /// or Err with the first policy violation found.
    pub fn validate_password(password: &str) -> Result<(), PolicyError> {
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(PolicyError::PasswordTooShort {
                actual_length: password.chars().count(),
            });
        }

        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PolicyError::PasswordMissingLowercase);
        }

        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PolicyError::PasswordMissingUppercase);
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PolicyError::PasswordMissingNumber);
        }

        if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
            return Err(PolicyError::PasswordMissingSpecial);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_short() {
        let result = PolicyService::validate_password("Sh0rt!");
        assert!(matches!(result, Err(PolicyError::PasswordTooShort { .. })));
    }

    #[test]
    fn test_password_missing_lowercase() {
        let result = PolicyService::validate_password("ALLCAPS1!");
        assert!(matches!(result, Err(PolicyError::PasswordMissingLowercase)));
    }

    #[test]
    fn test_password_missing_uppercase() {
        let result = PolicyService::validate_password("alllower1!");
        assert!(matches!(result, Err(PolicyError::PasswordMissingUppercase)));
    }

    #[test]
    fn test_password_missing_number() {
        let result = PolicyService::validate_password("NoNumbers!");
        assert!(matches!(result, Err(PolicyError::PasswordMissingNumber)));
    }

    #[test]
    fn test_password_missing_special() {
        let result = PolicyService::validate_password("NoSpecial1");
        assert!(matches!(result, Err(PolicyError::PasswordMissingSpecial)));
    }

    #[test]
    fn test_valid_password() {
        assert!(PolicyService::validate_password("Str0ng!Pw").is_ok());
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 7 multibyte chars plus one ASCII still fails the length rule.
        let result = PolicyService::validate_password("Aá1!aáa");
        assert!(matches!(result, Err(PolicyError::PasswordTooShort { .. })));
    }
}
