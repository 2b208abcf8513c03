//! Key name validation.
//!
//! Keys double as file names in [`FileKeyValueStore`](crate::FileKeyValueStore),
//! so the same rules apply to every backend:
//! - Must be non-empty
//! - Must not contain `/`, `\`, whitespace, or control characters
//! - Must not start with `.`

use crate::error::{StoreError, StoreResult};

/// Characters that are forbidden anywhere in a key.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Validate a key name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use linkbio_store::keys::validate_key;
///
/// assert!(validate_key("users").is_ok());
/// assert!(validate_key("linktree_current_user").is_ok());
/// assert!(validate_key("").is_err());
/// assert!(validate_key("../users").is_err());
/// ```
pub fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(invalid(key, "key must not be empty"));
    }

    if key.starts_with('.') {
        return Err(invalid(key, "must not start with '.'"));
    }

    if let Some(ch) = key
        .chars()
        .find(|ch| ch.is_whitespace() || ch.is_control() || FORBIDDEN_CHARS.contains(ch))
    {
        return Err(invalid(key, &format!("contains forbidden character: {ch:?}")));
    }

    Ok(())
}

fn invalid(key: &str, reason: &str) -> StoreError {
    StoreError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_keys() {
        assert!(validate_key("users").is_ok());
        assert!(validate_key("current_user").is_ok());
        assert!(validate_key("linktree_users").is_ok());
        assert!(validate_key("app-v2.users").is_ok());
    }

    #[test]
    fn reject_empty_key() {
        assert!(validate_key("").is_err());
    }

    #[test]
    fn reject_path_separators() {
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("a\\b").is_err());
        assert!(validate_key("../users").is_err());
    }

    #[test]
    fn reject_whitespace_and_control() {
        assert!(validate_key("has space").is_err());
        assert!(validate_key("has\ttab").is_err());
        assert!(validate_key("nul\0").is_err());
    }

    #[test]
    fn reject_leading_dot() {
        assert!(validate_key(".hidden").is_err());
    }

    #[test]
    fn error_names_the_key() {
        let err = validate_key("a b").unwrap_err();
        assert!(err.to_string().contains("\"a b\""), "got: {err}");
    }
}
