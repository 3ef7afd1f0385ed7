use validator::ValidateEmail;

use super::IdentityError;

/// Returns `true` when `value` is a syntactically valid email address.
///
/// # Examples
///
/// ```
/// use fakesso_core::identity::is_email;
///
/// assert!(is_email("dev@example.test"));
/// assert!(!is_email("abc123"));
/// ```
pub fn is_email(value: &str) -> bool {
    value.validate_email()
}

/// Rejects empty identity ids. Whitespace is significant and kept as-is.
pub fn validate_identity_id(id: &str) -> Result<&str, IdentityError> {
    if id.is_empty() {
        return Err(IdentityError::EmptyId);
    }
    Ok(id)
}
