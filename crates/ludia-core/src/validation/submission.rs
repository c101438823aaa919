//! Submission text validation
//!
//! Length/shape constraints for user-entered text fields, applied at the
//! storage boundary before a record is created. Escaping for display is a
//! separate concern (see `crate::sanitize`) and happens on the read path.

use anyhow::Result;

/// Maximum length for comment bodies (characters).
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Maximum length for author display names (characters).
pub const MAX_AUTHOR_NAME_LENGTH: usize = 64;

/// Validate a comment body.
///
/// Rules:
/// - Must be non-empty after trimming
/// - Maximum 1000 characters
pub fn validate_comment_body(body: &str) -> Result<()> {
    if body.trim().is_empty() {
        anyhow::bail!("Comment body cannot be empty");
    }

    let length = body.chars().count();
    if length > MAX_COMMENT_LENGTH {
        anyhow::bail!(
            "Comment body is {} characters, but maximum allowed is {}",
            length,
            MAX_COMMENT_LENGTH
        );
    }

    Ok(())
}

/// Validate an author display name.
///
/// Rules:
/// - Must be non-empty after trimming
/// - Maximum 64 characters
/// - No control characters
pub fn validate_author_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Author name cannot be empty");
    }

    let length = name.chars().count();
    if length > MAX_AUTHOR_NAME_LENGTH {
        anyhow::bail!(
            "Author name is {} characters, but maximum allowed is {}",
            length,
            MAX_AUTHOR_NAME_LENGTH
        );
    }

    if name.chars().any(|c| c.is_control()) {
        anyhow::bail!("Author name contains control characters");
    }

    Ok(())
}
