//! Pre-built Test Fixtures
//!
//! Provides ready-to-use bank records modelled on real directory entries.
//! These fixtures are consistent and predictable for unit and integration tests.

use domain_directory::{BankRecord, MockBankStore, NewBankRecord};

/// Fixture for raw SWIFT codes
pub struct CodeFixtures;

impl CodeFixtures {
    /// Headquarters with two branches in `BankFixtures::directory`
    pub fn citi_headquarter() -> &'static str {
        "CITIPLPPXXX"
    }

    pub fn citi_branch() -> &'static str {
        "CITIPLPP123"
    }

    pub fn citi_second_branch() -> &'static str {
        "CITIPLPPABC"
    }

    /// Headquarters without branches
    pub fn pko_headquarter() -> &'static str {
        "BPKOPLPWXXX"
    }

    /// Headquarters in a second country
    pub fn deutsche_headquarter() -> &'static str {
        "DEUTDEFFXXX"
    }

    /// Well-formed code that no fixture stores
    pub fn unknown() -> &'static str {
        "ABCDEFGHXXX"
    }

    /// Nine characters: neither 8 nor 11
    pub fn wrong_length() -> &'static str {
        "TESTHQXXX"
    }
}

/// Fixture for bank records
pub struct BankFixtures;

impl BankFixtures {
    /// Creation input for a Polish bank
    pub fn polish(code: &str, bank_name: &str) -> NewBankRecord {
        NewBankRecord {
            swift_code: code.to_string(),
            bank_name: bank_name.to_string(),
            address: "Senatorska 16, 00-923 Warszawa".to_string(),
            country_iso2: "PL".to_string(),
            country_name: "Poland".to_string(),
            is_headquarter: None,
        }
    }

    /// Creation input for a German bank
    pub fn german(code: &str, bank_name: &str) -> NewBankRecord {
        NewBankRecord {
            swift_code: code.to_string(),
            bank_name: bank_name.to_string(),
            address: "Taunusanlage 12, Frankfurt am Main".to_string(),
            country_iso2: "DE".to_string(),
            country_name: "Germany".to_string(),
            is_headquarter: None,
        }
    }

    pub fn citi_headquarter() -> BankRecord {
        record(Self::polish(CodeFixtures::citi_headquarter(), "Citibank Europe plc"))
    }

    pub fn citi_branch() -> BankRecord {
        record(Self::polish(CodeFixtures::citi_branch(), "Citibank Europe plc"))
    }

    pub fn citi_second_branch() -> BankRecord {
        record(Self::polish(CodeFixtures::citi_second_branch(), "Citibank Europe plc"))
    }

    pub fn pko_headquarter() -> BankRecord {
        record(Self::polish(CodeFixtures::pko_headquarter(), "PKO Bank Polski"))
    }

    pub fn deutsche_headquarter() -> BankRecord {
        record(Self::german(CodeFixtures::deutsche_headquarter(), "Deutsche Bank AG"))
    }

    /// A small directory: one headquarters with two branches, one without,
    /// and one in another country
    pub fn directory() -> Vec<BankRecord> {
        vec![
            Self::citi_headquarter(),
            Self::citi_branch(),
            Self::citi_second_branch(),
            Self::pko_headquarter(),
            Self::deutsche_headquarter(),
        ]
    }

    /// An in-memory store holding `directory()`
    pub async fn directory_store() -> MockBankStore {
        MockBankStore::with_records(Self::directory()).await
    }
}

fn record(input: NewBankRecord) -> BankRecord {
    BankRecord::create(input).expect("fixture records are valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_shape() {
        let directory = BankFixtures::directory();
        let headquarters = directory.iter().filter(|r| r.is_headquarter()).count();

        assert_eq!(directory.len(), 5);
        assert_eq!(headquarters, 3);
    }

    #[test]
    fn test_branch_fixtures_belong_to_citi() {
        let hq = BankFixtures::citi_headquarter();
        assert!(BankFixtures::citi_branch().is_branch_of(&hq));
        assert!(BankFixtures::citi_second_branch().is_branch_of(&hq));
        assert!(!BankFixtures::pko_headquarter().is_branch_of(&hq));
    }
}
