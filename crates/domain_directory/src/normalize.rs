//! Free-text field normalization
//!
//! Bank names, addresses and country names are stored uppercase and trimmed,
//! matching the casing of the published SWIFT directory exports.

use std::fmt;

use crate::error::DirectoryError;

/// Text fields that must not be blank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    BankName,
    CountryName,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::BankName => write!(f, "Bank name"),
            RequiredField::CountryName => write!(f, "Country name"),
        }
    }
}

/// Uppercases and trims a free-text value
pub fn normalize_text(raw: &str) -> String {
    raw.to_uppercase().trim().to_string()
}

/// Uppercases and trims a free-text value that must not end up empty
///
/// # Errors
///
/// Returns `DirectoryError::EmptyField` naming `field` when nothing but
/// whitespace was supplied
pub fn normalize_required_text(raw: &str, field: RequiredField) -> Result<String, DirectoryError> {
    let value = normalize_text(raw);
    if value.is_empty() {
        return Err(DirectoryError::EmptyField { field });
    }
    Ok(value)
}
