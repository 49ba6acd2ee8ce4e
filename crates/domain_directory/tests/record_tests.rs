//! Property tests for bank record construction

use domain_directory::{BankRecord, DirectoryError, NewBankRecord};
use proptest::prelude::*;

fn swift_code() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z]{6}[A-Z0-9]{2}",
        "[A-Z]{6}[A-Z0-9]{2}[A-Z0-9]{3}",
        "[A-Z]{6}[A-Z0-9]{2}XXX",
    ]
}

fn input(code: String, is_headquarter: Option<bool>) -> NewBankRecord {
    NewBankRecord {
        swift_code: code,
        bank_name: "Test Bank".to_string(),
        address: String::new(),
        country_iso2: "PL".to_string(),
        country_name: "Poland".to_string(),
        is_headquarter,
    }
}

proptest! {
    #[test]
    fn derived_flag_matches_suffix(code in swift_code()) {
        let record = BankRecord::create(input(code.clone(), None)).unwrap();
        prop_assert_eq!(record.is_headquarter(), code.ends_with("XXX"));
    }

    #[test]
    fn supplied_flag_accepted_only_when_consistent(code in swift_code(), flag in any::<bool>()) {
        let result = BankRecord::create(input(code.clone(), Some(flag)));
        if flag == code.ends_with("XXX") {
            prop_assert_eq!(result.unwrap().is_headquarter(), flag);
        } else {
            let is_mismatch = matches!(result, Err(DirectoryError::HeadquarterMismatch { .. }));
            prop_assert!(is_mismatch);
        }
    }

    #[test]
    fn text_fields_are_uppercase_and_trimmed(name in "[ ]{0,3}[a-zA-Z][a-zA-Z ]{0,20}[a-zA-Z][ ]{0,3}") {
        let mut new_record = input("CITIPLPPXXX".to_string(), None);
        new_record.bank_name = name.clone();
        let record = BankRecord::create(new_record).unwrap();
        prop_assert_eq!(record.bank_name(), name.trim().to_uppercase());
    }

    #[test]
    fn branches_share_headquarter_prefix(code in "[A-Z]{6}[A-Z0-9]{2}[0-9]{3}") {
        let branch = BankRecord::create(input(code.clone(), None)).unwrap();
        let hq = BankRecord::create(input(format!("{}XXX", &code[..8]), None)).unwrap();
        prop_assert!(branch.is_branch_of(&hq));
        prop_assert_eq!(branch.swift_code().headquarter_code(), hq.swift_code().clone());
    }
}
