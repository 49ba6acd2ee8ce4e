//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use domain_directory::{BankRecord, DirectoryError, ImportRow, NewBankRecord};

use crate::fixtures::CodeFixtures;

/// Builder for bank record input
#[derive(Debug, Clone)]
pub struct NewBankRecordBuilder {
    input: NewBankRecord,
}

impl Default for NewBankRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewBankRecordBuilder {
    /// Creates a new builder for a Polish headquarters
    pub fn new() -> Self {
        Self {
            input: NewBankRecord {
                swift_code: CodeFixtures::citi_headquarter().to_string(),
                bank_name: "Citibank Europe plc".to_string(),
                address: "Senatorska 16, 00-923 Warszawa".to_string(),
                country_iso2: "PL".to_string(),
                country_name: "Poland".to_string(),
                is_headquarter: None,
            },
        }
    }

    /// Sets the SWIFT code
    pub fn with_swift_code(mut self, code: impl Into<String>) -> Self {
        self.input.swift_code = code.into();
        self
    }

    /// Sets the bank name
    pub fn with_bank_name(mut self, name: impl Into<String>) -> Self {
        self.input.bank_name = name.into();
        self
    }

    /// Sets the address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.input.address = address.into();
        self
    }

    /// Sets the country code and name
    pub fn with_country(mut self, iso2: impl Into<String>, name: impl Into<String>) -> Self {
        self.input.country_iso2 = iso2.into();
        self.input.country_name = name.into();
        self
    }

    /// Supplies an explicit headquarter flag
    pub fn with_headquarter_flag(mut self, flag: bool) -> Self {
        self.input.is_headquarter = Some(flag);
        self
    }

    /// Builds the raw input
    pub fn build(self) -> NewBankRecord {
        self.input
    }

    /// Builds a validated record
    pub fn try_build_record(self) -> Result<BankRecord, DirectoryError> {
        BankRecord::create(self.input)
    }

    /// Builds a validated record, panicking on invalid input
    pub fn build_record(self) -> BankRecord {
        self.try_build_record().expect("builder input should be valid")
    }

    /// Builds a spreadsheet row with the same values
    pub fn build_import_row(self) -> ImportRow {
        ImportRow {
            country_iso2: self.input.country_iso2,
            swift_code: self.input.swift_code,
            bank_name: self.input.bank_name,
            address: self.input.address,
            town_name: "WARSZAWA".to_string(),
            country_name: self.input.country_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_build_headquarter() {
        let record = NewBankRecordBuilder::new().build_record();
        assert!(record.is_headquarter());
        assert_eq!(record.country_iso2().as_str(), "PL");
    }

    #[test]
    fn test_builder_overrides() {
        let record = NewBankRecordBuilder::new()
            .with_swift_code("deutdeff500")
            .with_country("de", "Germany")
            .with_bank_name("Deutsche Bank")
            .build_record();

        assert_eq!(record.swift_code().as_str(), "DEUTDEFF500");
        assert!(!record.is_headquarter());
        assert_eq!(record.country_name(), "GERMANY");
    }

    #[test]
    fn test_builder_flag_mismatch() {
        let result = NewBankRecordBuilder::new()
            .with_headquarter_flag(false)
            .try_build_record();
        assert!(matches!(result, Err(DirectoryError::HeadquarterMismatch { .. })));
    }
}
