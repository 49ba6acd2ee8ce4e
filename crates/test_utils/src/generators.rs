//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains directory invariants.

use domain_directory::{BankRecord, NewBankRecord};
use proptest::prelude::*;

/// Strategy for 8 character codes
pub fn short_swift_code_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{6}[A-Z0-9]{2}"
}

/// Strategy for 11 character headquarter codes
pub fn headquarter_code_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{6}[A-Z0-9]{2}XXX"
}

/// Strategy for 11 character branch codes
///
/// The branch part is generated with a leading digit so it never ends up `XXX`.
pub fn branch_code_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{6}[A-Z0-9]{2}[0-9][A-Z0-9]{2}"
}

/// Strategy for any well-formed code
pub fn swift_code_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        short_swift_code_strategy(),
        headquarter_code_strategy(),
        branch_code_strategy(),
    ]
}

/// Strategy for codes whose length is neither 8 nor 11
pub fn wrong_length_code_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[A-Z]{1,7}", "[A-Z]{9,10}", "[A-Z]{12,20}"]
}

/// Strategy for ISO2 country codes
pub fn country_code_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{2}"
}

/// Strategy for non-blank bank names
pub fn bank_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z .&-]{0,40}"
}

/// Strategy for valid record input with the headquarter flag left to derivation
pub fn new_bank_record_strategy() -> impl Strategy<Value = NewBankRecord> {
    (
        swift_code_strategy(),
        bank_name_strategy(),
        country_code_strategy(),
    )
        .prop_map(|(swift_code, bank_name, country_iso2)| NewBankRecord {
            swift_code,
            bank_name,
            address: "Main Street 1".to_string(),
            country_iso2,
            country_name: "Testland".to_string(),
            is_headquarter: None,
        })
}

/// Strategy for validated records
pub fn bank_record_strategy() -> impl Strategy<Value = BankRecord> {
    new_bank_record_strategy().prop_filter_map("valid record", |input| BankRecord::create(input).ok())
}
