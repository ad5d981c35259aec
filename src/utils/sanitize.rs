//! Project identifier validation.
//!
//! Project ids become a directory name under the output root, so they are
//! restricted to a path-safe alphabet before anything touches the filesystem.

use crate::ShotlistError;

const MAX_PROJECT_ID_LEN: usize = 128;

/// Allowed characters in a project id: alphanumeric, underscores, hyphens.
fn is_valid_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Validate that `project_id` is safe to use as a single path component.
///
/// ```ignore
/// assert!(validate_project_id("heist-2024").is_ok());
/// assert!(validate_project_id("../etc").is_err());
/// ```
pub fn validate_project_id(project_id: &str) -> Result<&str, ShotlistError> {
    if project_id.is_empty() {
        return Err(ShotlistError::Validation(
            "Invalid project id: must not be empty".to_string(),
        ));
    }

    if project_id.len() > MAX_PROJECT_ID_LEN {
        return Err(ShotlistError::Validation(format!(
            "Invalid project id: longer than {} characters",
            MAX_PROJECT_ID_LEN
        )));
    }

    if !project_id.chars().all(is_valid_id_char) {
        return Err(ShotlistError::Validation(format!(
            "Invalid project id '{}': must be alphanumeric with underscores or hyphens",
            project_id
        )));
    }

    Ok(project_id)
}

/// Derive a path-safe project id from a free-form title.
///
/// Runs of disallowed characters collapse to a single hyphen. Falls back to
/// `"untitled"` when nothing usable remains.
pub fn slugify_project_id(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed: String = out
        .trim_end_matches('-')
        .chars()
        .take(MAX_PROJECT_ID_LEN)
        .collect();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed
    }
}
