//! Entry field validation.
//!
//! All user-supplied text is trimmed by the caller before it reaches these
//! checks. Lengths are counted in characters, matching `char_length` in the schema.

use crate::error::CoreError;

/// Maximum entry title length.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of short moderation texts (lock reason, notes, summaries).
pub const MAX_NOTE_LEN: usize = 255;

/// Display name for an owner, locker or verifier whose user row is gone.
pub const UNKNOWN_USER: &str = "Unknown";

/// Validate an entry title (non-empty, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate entry content (non-empty).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Content cannot be empty".into()));
    }
    Ok(())
}

/// Validate a dispute message (non-empty).
pub fn validate_dispute_message(message: &str) -> Result<(), CoreError> {
    if message.trim().is_empty() {
        return Err(CoreError::Validation(
            "Dispute message cannot be empty".into(),
        ));
    }
    Ok(())
}

/// Validate an optional short text such as a lock reason or note.
pub fn validate_note(field: &str, value: &str) -> Result<(), CoreError> {
    if value.chars().count() > MAX_NOTE_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NOTE_LEN} characters"
        )));
    }
    Ok(())
}

/// Trim an optional form field, treating `None` as empty.
pub fn normalize(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_valid() {
        assert!(validate_title("Python").is_ok());
    }

    #[test]
    fn title_empty_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn title_length_counts_characters() {
        let at_limit = "é".repeat(MAX_TITLE_LEN);
        assert!(validate_title(&at_limit).is_ok());
        let over = "a".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_title(&over).is_err());
    }

    #[test]
    fn content_blank_rejected() {
        assert!(validate_content("\n \t").is_err());
        assert!(validate_content("# Heading").is_ok());
    }

    #[test]
    fn dispute_message_blank_rejected() {
        assert!(validate_dispute_message("").is_err());
        assert!(validate_dispute_message("Wrong date").is_ok());
    }

    #[test]
    fn note_over_limit_rejected() {
        assert!(validate_note("Lock reason", &"x".repeat(MAX_NOTE_LEN)).is_ok());
        let err = validate_note("Lock reason", &"x".repeat(MAX_NOTE_LEN + 1)).unwrap_err();
        assert!(err.to_string().contains("Lock reason"));
    }

    #[test]
    fn normalize_trims_and_defaults() {
        assert_eq!(normalize(Some("  policy ")), "policy");
        assert_eq!(normalize(None), "");
    }
}
