//! Bank record model
//!
//! A `BankRecord` is the directory's single entity: one SWIFT code with the
//! bank it identifies. Records can only be built from validated input, so
//! every instance satisfies the headquarter invariant:
//!
//! ```text
//! is_headquarter == swift_code.ends_with("XXX")
//! ```
//!
//! Construction runs in a fixed order. The code and every text field are
//! validated and normalized first; the headquarter check runs last, against
//! the normalized code.

use core_kernel::{CountryCode, SwiftCode};

use crate::error::DirectoryError;
use crate::normalize::{normalize_required_text, normalize_text, RequiredField};

/// Unvalidated input for a bank record
///
/// Mirrors the creation payload and spreadsheet rows. `is_headquarter` is
/// optional: when absent it is derived from the code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBankRecord {
    pub swift_code: String,
    pub bank_name: String,
    pub address: String,
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: Option<bool>,
}

/// A validated, normalized directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankRecord {
    swift_code: SwiftCode,
    bank_name: String,
    address: String,
    country_iso2: CountryCode,
    country_name: String,
    is_headquarter: bool,
}

impl BankRecord {
    /// Validates and normalizes input into a record
    ///
    /// # Errors
    ///
    /// * `InvalidFormat` - malformed SWIFT code or country code
    /// * `EmptyField` - blank bank name or country name
    /// * `HeadquarterMismatch` - explicit flag contradicts the code suffix
    pub fn create(input: NewBankRecord) -> Result<Self, DirectoryError> {
        let swift_code = SwiftCode::parse(&input.swift_code)?;
        let country_iso2 = CountryCode::parse(&input.country_iso2)?;
        let bank_name = normalize_required_text(&input.bank_name, RequiredField::BankName)?;
        let address = normalize_text(&input.address);
        let country_name =
            normalize_required_text(&input.country_name, RequiredField::CountryName)?;

        let is_headquarter = resolve_headquarter_flag(&swift_code, input.is_headquarter)?;

        Ok(Self {
            swift_code,
            bank_name,
            address,
            country_iso2,
            country_name,
            is_headquarter,
        })
    }

    pub fn swift_code(&self) -> &SwiftCode {
        &self.swift_code
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn country_iso2(&self) -> &CountryCode {
        &self.country_iso2
    }

    pub fn country_name(&self) -> &str {
        &self.country_name
    }

    pub fn is_headquarter(&self) -> bool {
        self.is_headquarter
    }

    /// Whether this record is a branch of `headquarter`
    ///
    /// True when both codes share their first 8 characters, `headquarter`
    /// is a headquarters record, and the codes differ.
    pub fn is_branch_of(&self, headquarter: &BankRecord) -> bool {
        headquarter.is_headquarter
            && self.swift_code != headquarter.swift_code
            && self.swift_code.branch_prefix() == headquarter.swift_code.branch_prefix()
    }
}

/// Checks a supplied headquarter flag against the code, or derives it
///
/// # Errors
///
/// Returns `HeadquarterMismatch` carrying both values when `supplied`
/// disagrees with the code suffix
pub fn resolve_headquarter_flag(
    code: &SwiftCode,
    supplied: Option<bool>,
) -> Result<bool, DirectoryError> {
    let expected = code.is_headquarter();
    match supplied {
        Some(flag) if flag != expected => Err(DirectoryError::HeadquarterMismatch {
            code: code.clone(),
            supplied: flag,
            expected,
        }),
        _ => Ok(expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(code: &str, is_headquarter: Option<bool>) -> NewBankRecord {
        NewBankRecord {
            swift_code: code.to_string(),
            bank_name: "Citibank Poland".to_string(),
            address: "ul. Centralna 1, Warsaw".to_string(),
            country_iso2: "pl".to_string(),
            country_name: "Poland".to_string(),
            is_headquarter,
        }
    }

    #[test]
    fn test_create_normalizes_every_field() {
        let record = BankRecord::create(input(" citiplppxxx ", Some(true))).unwrap();

        assert_eq!(record.swift_code().as_str(), "CITIPLPPXXX");
        assert_eq!(record.bank_name(), "CITIBANK POLAND");
        assert_eq!(record.address(), "UL. CENTRALNA 1, WARSAW");
        assert_eq!(record.country_iso2().as_str(), "PL");
        assert_eq!(record.country_name(), "POLAND");
        assert!(record.is_headquarter());
    }

    #[test]
    fn test_flag_derived_when_absent() {
        assert!(BankRecord::create(input("CITIPLPPXXX", None)).unwrap().is_headquarter());
        assert!(!BankRecord::create(input("CITIPLPP123", None)).unwrap().is_headquarter());
    }

    #[test]
    fn test_mismatch_carries_both_values() {
        let error = BankRecord::create(input("CITIPLPP123", Some(true))).unwrap_err();
        match error {
            DirectoryError::HeadquarterMismatch { supplied, expected, .. } => {
                assert!(supplied);
                assert!(!expected);
            }
            other => panic!("Expected HeadquarterMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_format_checked_before_headquarter_flag() {
        let error = BankRecord::create(input("TESTHQXXX", Some(false))).unwrap_err();
        assert!(matches!(error, DirectoryError::InvalidFormat(_)));
    }

    #[test]
    fn test_empty_address_allowed() {
        let mut new_record = input("CITIPLPPXXX", None);
        new_record.address = "  ".to_string();
        assert_eq!(BankRecord::create(new_record).unwrap().address(), "");
    }

    #[test]
    fn test_is_branch_of() {
        let hq = BankRecord::create(input("CITIPLPPXXX", None)).unwrap();
        let branch = BankRecord::create(input("CITIPLPP123", None)).unwrap();
        let other = BankRecord::create(input("CITIPLPQ123", None)).unwrap();

        assert!(branch.is_branch_of(&hq));
        assert!(!hq.is_branch_of(&hq));
        assert!(!other.is_branch_of(&hq));
        assert!(!hq.is_branch_of(&branch));
    }
}
