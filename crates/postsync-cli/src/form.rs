//! Form validation
//!
//! Title and body are both required. Submissions are checked here, at the
//! presentation boundary, before the draft reaches the sync controller.

use postsync_core::Draft;

/// Check that a draft may be submitted
pub fn validate(draft: &Draft) -> Result<(), &'static str> {
    if draft.title.trim().is_empty() {
        return Err("Title is required");
    }
    if draft.body.trim().is_empty() {
        return Err("Body is required");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, body: &str) -> Draft {
        Draft {
            title: title.to_string(),
            body: body.to_string(),
            ..Draft::default()
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate(&draft("Title", "Body")).is_ok());
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(validate(&draft("", "Body")), Err("Title is required"));
        assert_eq!(validate(&draft("Title", "")), Err("Body is required"));
        assert_eq!(validate(&draft("  ", "   ")), Err("Title is required"));
        assert_eq!(validate(&Draft::default()), Err("Title is required"));
    }
}
