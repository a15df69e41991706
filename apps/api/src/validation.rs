//! Field-level checks shared by the request schemas.
//!
//! Every endpoint deserializes into a struct of `Option`s and turns it into a
//! validated command with these helpers before touching a repository. Blank
//! strings count as absent.

use serde::Deserialize;

use crate::errors::AppError;

/// An integer id sent either as a JSON number or as a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlexibleId {
    Number(i64),
    Text(String),
}

impl FlexibleId {
    pub fn into_id(self, field: &str) -> Result<i64, AppError> {
        match self {
            FlexibleId::Number(id) => Ok(id),
            FlexibleId::Text(text) if text.trim().is_empty() => Err(AppError::missing(field)),
            FlexibleId::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| AppError::Validation(format!("{field} must be an integer"))),
        }
    }
}

/// Returns the id, or `MissingField` if absent or blank.
pub fn required_id(value: Option<FlexibleId>, field: &str) -> Result<i64, AppError> {
    value
        .ok_or_else(|| AppError::missing(field))?
        .into_id(field)
}

/// Returns the trimmed value, or `MissingField` if absent or blank.
pub fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    optional(value).ok_or_else(|| AppError::missing(field))
}

/// Normalizes blank strings to `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Like [`required`], but also checks the address shape.
pub fn required_email(value: Option<String>, field: &str) -> Result<String, AppError> {
    let email = required(value, field)?;
    validate_email(&email, field)?;
    Ok(email)
}

/// Minimal shape check: `local@domain.tld`, no whitespace, one `@`.
pub fn validate_email(email: &str, field: &str) -> Result<(), AppError> {
    let invalid = || AppError::Validation(format!("{field} must be a valid email address"));

    if email.chars().any(char::is_whitespace) || email.len() > 254 {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Rejects strings longer than the column they are stored in.
pub fn max_len(value: &str, max: usize, field: &str) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
