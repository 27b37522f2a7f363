//! Field validation for incoming note data
//!
//! The store only trims; length and non-emptiness rules are enforced here by
//! the request layers before they call into it.

use thiserror::Error;

use crate::store::NotePatch;

pub const MAX_TITLE_CHARS: usize = 80;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const MAX_AUTHOR_CHARS: usize = 40;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Validated, trimmed fields for a new note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub description: String,
    pub author: String,
}

fn check(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    let actual = trimmed.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(trimmed.to_string())
}

/// Blank values count as "not provided" and leave the stored field alone
fn check_optional(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => check(field, &v, max).map(Some),
        _ => Ok(None),
    }
}

pub fn validate_new(
    title: &str,
    description: &str,
    author: &str,
) -> Result<NewNote, ValidationError> {
    Ok(NewNote {
        title: check("title", title, MAX_TITLE_CHARS)?,
        description: check("description", description, MAX_DESCRIPTION_CHARS)?,
        author: check("author", author, MAX_AUTHOR_CHARS)?,
    })
}

pub fn validate_patch(
    title: Option<String>,
    description: Option<String>,
    author: Option<String>,
) -> Result<NotePatch, ValidationError> {
    Ok(NotePatch {
        title: check_optional("title", title, MAX_TITLE_CHARS)?,
        description: check_optional("description", description, MAX_DESCRIPTION_CHARS)?,
        author: check_optional("author", author, MAX_AUTHOR_CHARS)?,
    })
}
