//! Form input validation.
//!
//! Keep the limits in sync with the page copy in
//! `crates/api/assets/index.html`.

use crate::error::CoreError;

/// Minimum length of an annotator name/ID.
pub const MIN_ANNOTATOR_ID_LENGTH: usize = 5;

/// Validate and normalize an annotator name/ID. Returns the trimmed value.
pub fn validate_annotator_id(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.len() < MIN_ANNOTATOR_ID_LENGTH {
        return Err(CoreError::Validation(format!(
            "Your name/ID must be at least {MIN_ANNOTATOR_ID_LENGTH} characters ({}/{MIN_ANNOTATOR_ID_LENGTH})",
            trimmed.len()
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a required free-text field. Returns the trimmed value. `field`
/// names the field in the error message ("explanation", "reflection").
pub fn validate_explanation(field: &'static str, raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!(
            "Please enter your {field} before submitting"
        )));
    }
    Ok(trimmed.to_string())
}
