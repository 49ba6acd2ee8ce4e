//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for directory types that give
//! more meaningful error messages than standard assertions.

use domain_directory::{BankRecord, DirectoryError};

/// Collects the codes of `records`, preserving order
pub fn codes_of(records: &[BankRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.swift_code().to_string())
        .collect()
}

/// Asserts that `branches` holds exactly `expected`, in any order
///
/// # Panics
///
/// Panics listing both sets when they differ
pub fn assert_branch_codes(branches: &[BankRecord], expected: &[&str]) {
    let mut actual = codes_of(branches);
    actual.sort();
    let mut expected: Vec<String> = expected.iter().map(|code| code.to_string()).collect();
    expected.sort();

    assert_eq!(
        actual, expected,
        "Branch set mismatch: actual={:?}, expected={:?}",
        actual, expected
    );
}

/// Asserts that every record satisfies the headquarter suffix rule
pub fn assert_headquarter_invariant(records: &[BankRecord]) {
    for record in records {
        assert_eq!(
            record.is_headquarter(),
            record.swift_code().as_str().ends_with("XXX"),
            "Headquarter flag disagrees with code {}",
            record.swift_code()
        );
    }
}

/// Asserts that a directory result failed with the given kind
///
/// # Panics
///
/// Panics if the result is `Ok` or carries another kind
pub fn assert_directory_error<T: std::fmt::Debug>(
    result: &Result<T, DirectoryError>,
    expected_kind: &str,
) {
    match result {
        Ok(value) => panic!("Expected {} error, got Ok({:?})", expected_kind, value),
        Err(error) => assert_eq!(
            error.kind(),
            expected_kind,
            "Expected {} error, got {:?}",
            expected_kind,
            error
        ),
    }
}
