//! Directory domain errors
//!
//! This module defines the error taxonomy of the directory: client input
//! errors (format, empty fields, headquarter mismatch), lookup errors, write
//! conflicts and storage failures.

use thiserror::Error;

use core_kernel::{CountryCode, FormatError, PortError, SwiftCode};

use crate::normalize::RequiredField;

/// Errors that can occur in the directory domain
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Malformed SWIFT code or country code
    #[error("{0}")]
    InvalidFormat(#[from] FormatError),

    /// A required text field is blank after normalization
    #[error("{field} cannot be empty")]
    EmptyField { field: RequiredField },

    /// The supplied headquarter flag contradicts the code suffix
    #[error(
        "isHeadquarter is {supplied} but SWIFT code {code} implies {expected}: \
         headquarter codes end with XXX"
    )]
    HeadquarterMismatch {
        code: SwiftCode,
        supplied: bool,
        expected: bool,
    },

    /// Lookup or delete target is absent
    #[error("{0}")]
    NotFound(String),

    /// A record with the same SWIFT code is already stored
    #[error("SWIFT code {0} already exists")]
    AlreadyExists(SwiftCode),

    /// A branch was submitted before its headquarters
    #[error("Cannot create branch {branch}: headquarter not found (expected {headquarter})")]
    MissingHeadquarter {
        branch: SwiftCode,
        headquarter: SwiftCode,
    },

    /// The underlying store failed
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    /// Anything that does not fit the taxonomy above
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl DirectoryError {
    /// Creates a NotFound error for a SWIFT code
    pub fn code_not_found(code: &SwiftCode) -> Self {
        DirectoryError::NotFound(format!("SWIFT code {} not found", code))
    }

    /// Creates a NotFound error for a country with no records
    pub fn country_not_found(country: &CountryCode) -> Self {
        DirectoryError::NotFound(format!("No SWIFT codes found for country {}", country))
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            DirectoryError::InvalidFormat(_) => "invalid_format",
            DirectoryError::EmptyField { .. } => "empty_field",
            DirectoryError::HeadquarterMismatch { .. } => "headquarter_mismatch",
            DirectoryError::NotFound(_) => "not_found",
            DirectoryError::AlreadyExists(_) => "already_exists",
            DirectoryError::MissingHeadquarter { .. } => "missing_headquarter",
            DirectoryError::StorageFailure(_) => "storage_failure",
            DirectoryError::Unexpected(_) => "unexpected",
        }
    }

    /// Returns true if the caller's input caused the failure
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            DirectoryError::StorageFailure(_) | DirectoryError::Unexpected(_)
        )
    }
}

impl From<PortError> for DirectoryError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::NotFound { entity_type, id } => {
                DirectoryError::NotFound(format!("{} {} not found", entity_type, id))
            }
            PortError::Transformation { message } => DirectoryError::Unexpected(message),
            other => DirectoryError::StorageFailure(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_message_passes_through() {
        let error: DirectoryError = FormatError::Length { actual: 9 }.into();
        assert_eq!(error.to_string(), "SWIFT code must be 8 or 11 characters long");
        assert_eq!(error.kind(), "invalid_format");
        assert!(error.is_client_error());
    }

    #[test]
    fn test_missing_headquarter_message() {
        let error = DirectoryError::MissingHeadquarter {
            branch: SwiftCode::parse("CITIPLPP123").unwrap(),
            headquarter: SwiftCode::parse("CITIPLPPXXX").unwrap(),
        };
        assert!(error.to_string().contains("headquarter not found"));
        assert!(error.to_string().contains("CITIPLPPXXX"));
    }

    #[test]
    fn test_port_errors_become_storage_failures() {
        let error: DirectoryError = PortError::connection("connection refused").into();
        assert!(matches!(error, DirectoryError::StorageFailure(_)));
        assert!(!error.is_client_error());

        let error: DirectoryError = PortError::transformation("bad row").into();
        assert!(matches!(error, DirectoryError::Unexpected(_)));
    }
}
