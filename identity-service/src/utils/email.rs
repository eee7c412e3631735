/// Normalize an email for storage and comparison.
///
/// All email matching in the service is exact-match on the normalized
/// form; nothing downstream case-folds again.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
